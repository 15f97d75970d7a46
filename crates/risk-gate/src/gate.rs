use std::time::Duration;

use chrono::Utc;
use market_core::{Decision, HoldingPeriod, Position, PositionSide, TradeAction};

use crate::models::{RiskLimits, RiskVerdict};
use crate::state::RiskState;

/// Minimum oracle confidence for any decision to pass.
const MIN_CONFIDENCE: f64 = 0.6;

/// Sequential, short-circuiting policy evaluator for proposed trades.
///
/// Checks run in a fixed order; the first rejecting check ends the
/// evaluation. Clamping checks (leverage, size) adjust the verdict and
/// continue. A rejected decision is not an error, just no order this cycle.
pub struct RiskGate {
    limits: RiskLimits,
    state: RiskState,
}

impl RiskGate {
    pub fn new(limits: RiskLimits) -> Self {
        Self {
            limits,
            state: RiskState::new(Utc::now()),
        }
    }

    /// Build a gate over pre-seeded state (tests, process restart).
    pub fn with_state(limits: RiskLimits, state: RiskState) -> Self {
        Self { limits, state }
    }

    pub fn state(&self) -> &RiskState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RiskState {
        &mut self.state
    }

    /// Record a realized trade PnL into the daily window.
    pub fn record_pnl(&mut self, pnl: f64) {
        self.state.record_pnl(pnl, Utc::now());
    }

    /// Evaluate a proposed decision against account and position state.
    pub fn evaluate(
        &mut self,
        decision: &Decision,
        current_price: f64,
        balance: f64,
        position: &Position,
        open_position_count: usize,
    ) -> RiskVerdict {
        let now = Utc::now();
        self.state.roll_window(now);

        // The high-water mark advances on every evaluation, before any check
        // gets a chance to short-circuit.
        self.state.observe_balance(balance);

        let mut verdict = RiskVerdict::approving(decision);

        // Check 1: maximum open positions.
        if decision.action.affects_exposure()
            && self.limits.max_open_positions > 0
            && open_position_count >= self.limits.max_open_positions
        {
            return self.reject(
                verdict,
                format!(
                    "maximum open positions reached: {} >= {}",
                    open_position_count, self.limits.max_open_positions
                ),
            );
        }

        // Check 2: leverage cap. Clamp, don't reject.
        if decision.action.affects_exposure()
            && self.limits.max_leverage > 0
            && decision.leverage > self.limits.max_leverage
        {
            verdict.adjusted_leverage = self.limits.max_leverage;
            tracing::warn!(
                requested = decision.leverage,
                adjusted = verdict.adjusted_leverage,
                "leverage clamped to limit"
            );
        }

        // Check 3: confidence floor.
        if decision.confidence < MIN_CONFIDENCE {
            return self.reject(
                verdict,
                format!(
                    "confidence too low: {:.2} < {:.2}",
                    decision.confidence, MIN_CONFIDENCE
                ),
            );
        }

        // Check 4: daily loss limit.
        if self.state.daily_pnl < 0.0
            && -self.state.daily_pnl / balance > self.limits.daily_loss_limit
        {
            return self.reject(
                verdict,
                format!(
                    "daily loss limit exceeded: {:.2}% > {:.2}%",
                    -self.state.daily_pnl / balance * 100.0,
                    self.limits.daily_loss_limit * 100.0
                ),
            );
        }

        // Check 5: maximum drawdown from the high-water mark.
        if self.state.peak_balance > 0.0 {
            let drawdown = (self.state.peak_balance - balance) / self.state.peak_balance;
            if drawdown > self.limits.max_drawdown {
                return self.reject(
                    verdict,
                    format!(
                        "max drawdown exceeded: {:.2}% > {:.2}%",
                        drawdown * 100.0,
                        self.limits.max_drawdown * 100.0
                    ),
                );
            }
        }

        // Check 6: size clamp, then total exposure.
        if decision.action.affects_exposure() {
            let size_cap = self.limits.position_risk_per_trade * 10.0;
            if verdict.adjusted_size_fraction > size_cap {
                tracing::warn!(
                    requested = verdict.adjusted_size_fraction,
                    adjusted = size_cap,
                    "position size clamped"
                );
                verdict.adjusted_size_fraction = size_cap;
            }

            let current_exposure = if position.size > 0.0 {
                position.size * current_price / balance
            } else {
                0.0
            };

            let new_exposure = current_exposure + verdict.adjusted_size_fraction;
            if new_exposure > self.limits.max_total_exposure {
                return self.reject(
                    verdict,
                    format!(
                        "total exposure would exceed limit: {:.2}% > {:.2}%",
                        new_exposure * 100.0,
                        self.limits.max_total_exposure * 100.0
                    ),
                );
            }
        }

        // Check 7: risk/reward ratio for opening trades with stops set.
        if decision.action.is_opening() && decision.stop_loss > 0.0 && decision.take_profit > 0.0 {
            let (risk, reward) = match decision.action {
                TradeAction::OpenLong => (
                    current_price - decision.stop_loss,
                    decision.take_profit - current_price,
                ),
                _ => (
                    decision.stop_loss - current_price,
                    current_price - decision.take_profit,
                ),
            };

            // A non-positive risk means the stop sits on the wrong side of
            // the price; that is check 8's finding, not a ratio problem.
            if risk > 0.0 {
                let risk_reward = reward / risk;
                if risk_reward < self.limits.min_risk_reward_ratio {
                    return self.reject(
                        verdict,
                        format!(
                            "risk-reward ratio too low: {:.2} < {:.2}",
                            risk_reward, self.limits.min_risk_reward_ratio
                        ),
                    );
                }
            }
        }

        // Check 8: stop-loss presence and side.
        if decision.action.is_opening() {
            if decision.stop_loss <= 0.0 || decision.take_profit <= 0.0 {
                return self.reject(
                    verdict,
                    "stop loss and take profit must be set".to_string(),
                );
            }

            if decision.action == TradeAction::OpenLong && decision.stop_loss >= current_price {
                return self.reject(
                    verdict,
                    "stop loss for long position must be below current price".to_string(),
                );
            }

            if decision.action == TradeAction::OpenShort && decision.stop_loss <= current_price {
                return self.reject(
                    verdict,
                    "stop loss for short position must be above current price".to_string(),
                );
            }
        }

        // Check 9: holding-time advisory. Logged only, never rejects.
        if position.is_open() {
            let budget = max_holding_time(decision.expected_holding_period);
            if position.holding > budget && decision.action != TradeAction::ClosePosition {
                tracing::warn!(
                    holding_secs = position.holding.as_secs(),
                    budget_secs = budget.as_secs(),
                    "position held past its expected horizon, consider closing"
                );
            }
        }

        tracing::info!(
            approved = verdict.approved,
            adjusted_size = verdict.adjusted_size_fraction,
            adjusted_leverage = verdict.adjusted_leverage,
            "risk check completed"
        );

        verdict
    }

    /// Whether the current price has crossed the position's stop level.
    pub fn stop_loss_hit(&self, position: &Position, current_price: f64, stop_loss: f64) -> bool {
        if !position.is_open() || stop_loss <= 0.0 {
            return false;
        }

        match position.side {
            PositionSide::Long if current_price <= stop_loss => {
                tracing::warn!(current_price, stop_loss, side = "LONG", "stop loss triggered");
                true
            }
            PositionSide::Short if current_price >= stop_loss => {
                tracing::warn!(current_price, stop_loss, side = "SHORT", "stop loss triggered");
                true
            }
            _ => false,
        }
    }

    /// Whether the current price has reached the position's target level.
    pub fn take_profit_hit(
        &self,
        position: &Position,
        current_price: f64,
        take_profit: f64,
    ) -> bool {
        if !position.is_open() || take_profit <= 0.0 {
            return false;
        }

        match position.side {
            PositionSide::Long if current_price >= take_profit => {
                tracing::info!(current_price, take_profit, side = "LONG", "take profit triggered");
                true
            }
            PositionSide::Short if current_price <= take_profit => {
                tracing::info!(current_price, take_profit, side = "SHORT", "take profit triggered");
                true
            }
            _ => false,
        }
    }

    fn reject(&self, mut verdict: RiskVerdict, reason: String) -> RiskVerdict {
        tracing::warn!(reason = %reason, "decision rejected");
        verdict.approved = false;
        verdict.reason = Some(reason);
        verdict
    }
}

/// Duration budget implied by the oracle's expected holding period.
fn max_holding_time(period: HoldingPeriod) -> Duration {
    match period {
        HoldingPeriod::Short => Duration::from_secs(4 * 3600),
        HoldingPeriod::Medium => Duration::from_secs(24 * 3600),
        HoldingPeriod::Long => Duration::from_secs(7 * 24 * 3600),
    }
}
