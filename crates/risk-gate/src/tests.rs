#[cfg(test)]
mod risk_gate_tests {
    use std::time::Duration;

    use chrono::Utc;
    use market_core::{Decision, HoldingPeriod, Position, PositionSide, RiskTier, TradeAction};

    use crate::gate::RiskGate;
    use crate::models::RiskLimits;
    use crate::state::RiskState;

    fn limits() -> RiskLimits {
        RiskLimits {
            max_open_positions: 3,
            max_leverage: 10,
            max_drawdown: 0.05,
            daily_loss_limit: 0.02,
            position_risk_per_trade: 0.01,
            max_total_exposure: 0.25,
            min_risk_reward_ratio: 2.0,
        }
    }

    fn open_long(confidence: f64, stop_loss: f64, take_profit: f64) -> Decision {
        Decision {
            action: TradeAction::OpenLong,
            confidence,
            size_fraction: 0.05,
            leverage: 5,
            reason: "test".to_string(),
            stop_loss,
            take_profit,
            risk_tier: RiskTier::Medium,
            expected_holding_period: HoldingPeriod::Short,
        }
    }

    fn long_position(size: f64, entry: f64) -> Position {
        Position {
            symbol: "ETH".to_string(),
            side: PositionSide::Long,
            size,
            entry_price: entry,
            unrealized_pnl: 0.0,
            pnl_percent: 0.0,
            holding: Duration::from_secs(3600),
        }
    }

    #[test]
    fn valid_long_is_approved_unchanged() {
        let mut gate = RiskGate::new(limits());

        // Risk 100, reward 200: exactly the 2.0 minimum.
        let decision = open_long(0.8, 1900.0, 2200.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(verdict.approved, "rejected: {:?}", verdict.reason);
        assert!(verdict.reason.is_none());
        assert_eq!(verdict.adjusted_leverage, 5);
        assert!((verdict.adjusted_size_fraction - 0.05).abs() < 1e-12);
    }

    #[test]
    fn low_confidence_is_rejected() {
        let mut gate = RiskGate::new(limits());

        let decision = open_long(0.5, 1800.0, 2400.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.as_deref().unwrap().contains("confidence"));
    }

    #[test]
    fn confidence_rejection_wins_over_risk_reward() {
        let mut gate = RiskGate::new(limits());

        // Fails both the confidence floor and the 2.0 risk/reward minimum
        // (1:1 stops); the first check in order must supply the reason.
        let decision = open_long(0.5, 1900.0, 2100.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        let reason = verdict.reason.unwrap();
        assert!(reason.contains("confidence"), "reason was: {reason}");
    }

    #[test]
    fn poor_risk_reward_is_rejected() {
        let mut gate = RiskGate::new(limits());

        // Risk 100, reward 100 => 1.0 < 2.0.
        let decision = open_long(0.8, 1900.0, 2100.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("risk-reward"));
    }

    #[test]
    fn long_stop_above_price_is_rejected() {
        let mut gate = RiskGate::new(limits());

        // The stop above price makes the directional risk negative, which
        // skips the ratio check and lands on side validation.
        let decision = open_long(0.8, 2100.0, 2200.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("stop loss"));
    }

    #[test]
    fn short_stop_below_price_is_rejected() {
        let mut gate = RiskGate::new(limits());

        let decision = Decision {
            action: TradeAction::OpenShort,
            stop_loss: 1900.0,
            take_profit: 1700.0,
            ..open_long(0.8, 0.0, 0.0)
        };
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("short"));
    }

    #[test]
    fn missing_stops_are_rejected() {
        let mut gate = RiskGate::new(limits());

        let decision = open_long(0.8, 0.0, 0.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("must be set"));
    }

    #[test]
    fn excess_leverage_is_clamped_not_rejected() {
        let mut gate = RiskGate::new(limits());

        let decision = Decision {
            leverage: 20,
            ..open_long(0.8, 1900.0, 2200.0)
        };
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(verdict.approved, "rejected: {:?}", verdict.reason);
        assert_eq!(verdict.adjusted_leverage, 10);
    }

    #[test]
    fn oversized_fraction_is_clamped_to_ten_x_trade_risk() {
        let mut gate = RiskGate::new(limits());

        let decision = Decision {
            size_fraction: 0.5,
            ..open_long(0.8, 1900.0, 2200.0)
        };
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(verdict.approved, "rejected: {:?}", verdict.reason);
        assert!((verdict.adjusted_size_fraction - 0.1).abs() < 1e-12);
    }

    #[test]
    fn exposure_over_limit_is_rejected() {
        let mut gate = RiskGate::new(limits());

        // Existing position worth 2400 at the current price on a 10k account
        // is 24% exposure; any added size breaks the 25% cap.
        let position = long_position(1.2, 1950.0);
        let decision = Decision {
            action: TradeAction::AddPosition,
            ..open_long(0.8, 1900.0, 2200.0)
        };
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &position, 1);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("exposure"));
    }

    #[test]
    fn position_count_limit_is_rejected_first() {
        let mut gate = RiskGate::new(limits());

        // Low confidence too, but the position-count check comes first.
        let decision = open_long(0.5, 1900.0, 2200.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 3);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("open positions"));
    }

    #[test]
    fn daily_loss_limit_is_rejected() {
        let mut gate = RiskGate::new(limits());
        gate.state_mut().daily_pnl = -300.0; // 3% of 10k > 2% limit

        let decision = open_long(0.8, 1900.0, 2200.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("daily loss"));
    }

    #[test]
    fn drawdown_over_limit_is_rejected() {
        let mut gate = RiskGate::with_state(
            limits(),
            RiskState {
                peak_balance: 12_000.0,
                daily_pnl: 0.0,
                window_start: Utc::now(),
            },
        );

        // 10k from a 12k peak is a 16.7% drawdown against the 5% limit.
        let decision = open_long(0.8, 1900.0, 2200.0);
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &Position::flat("ETH"), 0);

        assert!(!verdict.approved);
        assert!(verdict.reason.unwrap().contains("drawdown"));
    }

    #[test]
    fn peak_balance_is_monotone_across_rejections() {
        let mut gate = RiskGate::new(limits());

        // Low confidence: every evaluation rejects, yet the high-water mark
        // must still track [100, 100, 110, 110].
        let decision = open_long(0.1, 1900.0, 2200.0);
        let balances = [100.0, 90.0, 110.0, 95.0];
        let expected_peaks = [100.0, 100.0, 110.0, 110.0];

        for (balance, expected) in balances.iter().zip(expected_peaks) {
            let verdict = gate.evaluate(&decision, 2000.0, *balance, &Position::flat("ETH"), 0);
            assert!(!verdict.approved);
            assert_eq!(gate.state().peak_balance, expected);
        }
    }

    #[test]
    fn daily_pnl_resets_on_date_rollover() {
        let mut gate = RiskGate::new(limits());
        gate.record_pnl(100.0);
        assert_eq!(gate.state().daily_pnl, 100.0);

        gate.record_pnl(-50.0);
        assert_eq!(gate.state().daily_pnl, 50.0);

        // Pretend the window opened yesterday; the next read must reset it.
        gate.state_mut().window_start = Utc::now() - chrono::Duration::days(1);
        assert_eq!(gate.state_mut().daily_pnl(Utc::now()), 0.0);
    }

    #[test]
    fn holding_advisory_never_rejects() {
        let mut gate = RiskGate::new(limits());

        // Held 30h against a 4h SHORT budget; HOLD skips the opening checks
        // and the advisory must not turn into a rejection.
        let mut position = long_position(0.5, 2000.0);
        position.holding = Duration::from_secs(30 * 3600);
        let decision = Decision {
            action: TradeAction::Hold,
            ..open_long(0.9, 0.0, 0.0)
        };
        let verdict = gate.evaluate(&decision, 2000.0, 10_000.0, &position, 1);

        assert!(verdict.approved, "rejected: {:?}", verdict.reason);
    }

    #[test]
    fn stop_loss_predicate_by_side() {
        let gate = RiskGate::new(limits());
        let mut position = long_position(1.0, 2000.0);

        assert!(gate.stop_loss_hit(&position, 1800.0, 1900.0));
        assert!(!gate.stop_loss_hit(&position, 2000.0, 1900.0));

        position.side = PositionSide::Short;
        assert!(gate.stop_loss_hit(&position, 2100.0, 2000.0));
        assert!(!gate.stop_loss_hit(&position, 1900.0, 2000.0));

        // Flat positions and unset stops never trigger.
        assert!(!gate.stop_loss_hit(&Position::flat("ETH"), 1800.0, 1900.0));
        assert!(!gate.stop_loss_hit(&position, 2100.0, 0.0));
    }

    #[test]
    fn take_profit_predicate_by_side() {
        let gate = RiskGate::new(limits());
        let mut position = long_position(1.0, 2000.0);

        assert!(gate.take_profit_hit(&position, 2200.0, 2100.0));
        assert!(!gate.take_profit_hit(&position, 2000.0, 2100.0));

        position.side = PositionSide::Short;
        assert!(gate.take_profit_hit(&position, 1800.0, 1900.0));
        assert!(!gate.take_profit_hit(&position, 2000.0, 1900.0));
    }
}
