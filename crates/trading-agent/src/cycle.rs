use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use hyperliquid_broker::Trader;
use indicator_engine::IndicatorError;
use market_core::{Decision, HoldingPeriod, MarketSnapshot, Position, RiskTier, TradeAction};
use oracle_client::{DecisionOracle, MarketContext};
use risk_gate::RiskGate;

use crate::config::AgentConfig;
use crate::executor::TradeExecutor;

/// Candles fetched per cycle; comfortably above the indicator engine's
/// 120-bar minimum.
const CANDLE_FETCH_LIMIT: usize = 150;

/// One agent drives the whole pipeline for every configured symbol.
///
/// Symbols are processed strictly one after another; a failure on one symbol
/// is logged and the loop moves on. Cycles themselves never overlap: the
/// caller drives [`TradingAgent::run_cycle`] from a single task.
pub struct TradingAgent {
    config: AgentConfig,
    trader: Arc<Trader>,
    oracle: Arc<dyn DecisionOracle>,
    gate: RiskGate,
    executor: TradeExecutor,
    /// Stop-loss / take-profit levels of the last opening order, per symbol.
    protective_levels: HashMap<String, (f64, f64)>,
}

impl TradingAgent {
    pub fn new(config: AgentConfig, trader: Arc<Trader>, oracle: Arc<dyn DecisionOracle>) -> Self {
        let gate = RiskGate::new(config.risk.clone());
        let executor = TradeExecutor::new(Arc::clone(&trader));

        Self {
            config,
            trader,
            oracle,
            gate,
            executor,
            protective_levels: HashMap::new(),
        }
    }

    /// Run one full trading cycle across all configured symbols.
    pub async fn run_cycle(&mut self) {
        tracing::info!("========== starting trading cycle ==========");
        let started = std::time::Instant::now();

        for symbol in self.config.symbols.clone() {
            if let Err(e) = self.process_symbol(&symbol).await {
                // The per-symbol boundary: log and continue, never abort the
                // cycle for the remaining symbols.
                tracing::error!(symbol, error = format!("{e:#}"), "symbol cycle failed");
            }
        }

        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "trading cycle completed");
    }

    /// Process one symbol end to end. Idempotent: every call reads fresh
    /// market, position, and balance state.
    pub async fn process_symbol(&mut self, symbol: &str) -> Result<()> {
        let client = self.trader.client();

        let market = client
            .market_snapshot(symbol)
            .await
            .context("fetching market snapshot")?;
        tracing::info!(symbol, price = market.price, volume = market.day_volume, "market data fetched");

        let candles = client
            .candles(symbol, self.config.timeframe, CANDLE_FETCH_LIMIT)
            .await
            .context("fetching candles")?;

        let indicators = match indicator_engine::compute(&candles) {
            Ok(snapshot) => snapshot,
            Err(IndicatorError::InsufficientData { have, need }) => {
                // Not enough history is a skip, not a failure.
                tracing::warn!(symbol, have, need, "insufficient candle data, skipping symbol");
                return Ok(());
            }
        };
        tracing::info!(
            symbol,
            trend = indicators.trend.label(),
            momentum = indicators.momentum.label(),
            rsi = indicators.rsi14,
            "indicators calculated"
        );

        let position = client
            .position(symbol, self.trader.address())
            .await
            .context("fetching position")?;
        tracing::info!(
            symbol,
            side = position.side.label(),
            size = position.size,
            pnl_percent = position.pnl_percent,
            "position fetched"
        );

        // Protective exits take priority over a fresh oracle round-trip.
        if position.is_open() {
            if let Some(&(stop_loss, take_profit)) = self.protective_levels.get(symbol) {
                if self.gate.stop_loss_hit(&position, market.price, stop_loss) {
                    tracing::warn!(symbol, "stop loss triggered, closing position");
                    let decision = forced_close("stop loss triggered");
                    return self.execute_decision(symbol, &decision, &market, &position).await;
                }

                if self.gate.take_profit_hit(&position, market.price, take_profit) {
                    tracing::info!(symbol, "take profit triggered, closing position");
                    let decision = forced_close("take profit triggered");
                    return self.execute_decision(symbol, &decision, &market, &position).await;
                }
            }
        }

        let ctx = MarketContext {
            symbol: symbol.to_string(),
            timestamp: Utc::now(),
            market: market.clone(),
            indicators,
            position: position.clone(),
        };

        let decision = self.oracle.decide(&ctx).await.context("oracle decision")?;
        tracing::info!(
            symbol,
            action = decision.action.label(),
            confidence = decision.confidence,
            reason = %decision.reason,
            "oracle decision received"
        );

        self.execute_decision(symbol, &decision, &market, &position).await
    }

    async fn execute_decision(
        &mut self,
        symbol: &str,
        decision: &Decision,
        market: &MarketSnapshot,
        position: &Position,
    ) -> Result<()> {
        let client = self.trader.client();

        let balance = client
            .account_balance(self.trader.address())
            .await
            .context("fetching account balance")?;
        tracing::info!(balance, "account balance fetched");

        // Open positions across every tracked symbol feed the count check.
        let mut open_position_count = 0;
        for sym in &self.config.symbols {
            if let Ok(pos) = client.position(sym, self.trader.address()).await {
                if pos.is_open() {
                    open_position_count += 1;
                }
            }
        }

        let verdict =
            self.gate
                .evaluate(decision, market.price, balance, position, open_position_count);

        if !verdict.approved {
            // A rejection is a normal outcome: no order this cycle, fresh
            // evaluation next cycle.
            tracing::warn!(
                symbol,
                reason = verdict.reason.as_deref().unwrap_or(""),
                "decision rejected by risk gate"
            );
            return Ok(());
        }

        if !self.config.trading_enabled {
            tracing::warn!(
                symbol,
                action = decision.action.label(),
                size_fraction = verdict.adjusted_size_fraction,
                leverage = verdict.adjusted_leverage,
                price = market.price,
                "trading disabled, simulated order only"
            );
            return Ok(());
        }

        let report = self
            .executor
            .execute(symbol, decision, &verdict, market.price, balance)
            .await
            .context("trade execution")?;

        if decision.action.is_opening() {
            self.protective_levels
                .insert(symbol.to_string(), (decision.stop_loss, decision.take_profit));
        }

        tracing::info!(
            symbol,
            success = report.success,
            action = report.action.label(),
            size = report.size,
            price = report.price,
            order_id = report.order_id.as_deref().unwrap_or(""),
            message = %report.message,
            "trade executed"
        );

        Ok(())
    }
}

/// A synthetic close decision for stop-loss / take-profit exits.
fn forced_close(reason: &str) -> Decision {
    Decision {
        action: TradeAction::ClosePosition,
        confidence: 1.0,
        size_fraction: 0.0,
        leverage: 1,
        reason: reason.to_string(),
        stop_loss: 0.0,
        take_profit: 0.0,
        risk_tier: RiskTier::Low,
        expected_holding_period: HoldingPeriod::Short,
    }
}
