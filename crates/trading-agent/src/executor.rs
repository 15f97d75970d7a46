use std::sync::Arc;

use anyhow::Result;
use hyperliquid_broker::Trader;
use market_core::{Decision, PositionSide, TradeAction};
use risk_gate::RiskVerdict;

use crate::types::ExecutionReport;

/// Turns an approved decision into exchange orders.
pub struct TradeExecutor {
    trader: Arc<Trader>,
}

impl TradeExecutor {
    pub fn new(trader: Arc<Trader>) -> Self {
        Self { trader }
    }

    /// Execute an approved decision. Size fraction and leverage come from the
    /// risk verdict, which may have clamped the oracle's request.
    pub async fn execute(
        &self,
        symbol: &str,
        decision: &Decision,
        verdict: &RiskVerdict,
        current_price: f64,
        balance: f64,
    ) -> Result<ExecutionReport> {
        let mut report =
            ExecutionReport::new(symbol, decision.action, decision.confidence, &decision.reason);
        report.price = current_price;

        tracing::info!(
            action = decision.action.label(),
            confidence = decision.confidence,
            size_fraction = verdict.adjusted_size_fraction,
            leverage = verdict.adjusted_leverage,
            "executing decision"
        );

        match decision.action {
            TradeAction::OpenLong => {
                let size = position_size(balance, verdict.adjusted_size_fraction, current_price);
                let result = self.trader.open_long(symbol, size, current_price).await?;

                report.success = result.success;
                report.side = Some(PositionSide::Long);
                report.size = size;
                report.order_id = result.order_id;
                report.message = result.message;
            }

            TradeAction::OpenShort => {
                let size = position_size(balance, verdict.adjusted_size_fraction, current_price);
                let result = self.trader.open_short(symbol, size, current_price).await?;

                report.success = result.success;
                report.side = Some(PositionSide::Short);
                report.size = size;
                report.order_id = result.order_id;
                report.message = result.message;
            }

            TradeAction::AddPosition => {
                let position = self
                    .trader
                    .client()
                    .position(symbol, self.trader.address())
                    .await?;

                if !position.is_open() {
                    report.message = "no existing position to add to".to_string();
                    tracing::warn!(symbol, "cannot add: no open position");
                    return Ok(report);
                }

                let size = position_size(balance, verdict.adjusted_size_fraction, current_price);
                let result = match position.side {
                    PositionSide::Short => self.trader.open_short(symbol, size, current_price).await?,
                    _ => self.trader.open_long(symbol, size, current_price).await?,
                };

                report.success = result.success;
                report.side = Some(position.side);
                report.size = size;
                report.order_id = result.order_id;
                report.message = result.message;
            }

            TradeAction::ClosePosition => {
                let position = self
                    .trader
                    .client()
                    .position(symbol, self.trader.address())
                    .await?;

                if !position.is_open() {
                    report.success = true;
                    report.message = "no position to close".to_string();
                    tracing::info!(symbol, "no position to close");
                    return Ok(report);
                }

                let result = self
                    .trader
                    .close_position(symbol, position.side, position.size, current_price)
                    .await?;

                report.success = result.success;
                report.side = Some(position.side);
                report.size = position.size;
                report.order_id = result.order_id;
                report.message = format!(
                    "position closed, PnL {:.2}% ({})",
                    position.pnl_percent, result.message
                );
            }

            TradeAction::Hold => {
                report.success = true;
                report.message = "holding current position".to_string();
                tracing::info!(symbol, "HOLD, no action taken");
            }
        }

        Ok(report)
    }
}

fn position_size(balance: f64, size_fraction: f64, price: f64) -> f64 {
    balance * size_fraction / price
}
