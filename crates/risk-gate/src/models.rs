use market_core::Decision;
use serde::{Deserialize, Serialize};

/// Account-level risk limits. All ratios are fractions of balance, not
/// percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum simultaneously open positions across all symbols; 0 disables
    /// the check.
    pub max_open_positions: usize,
    /// Hard leverage cap; requests above it are clamped, not rejected.
    /// 0 disables the clamp.
    pub max_leverage: u32,
    /// Maximum tolerated drawdown from the balance high-water mark.
    pub max_drawdown: f64,
    /// Maximum tolerated daily loss as a fraction of balance.
    pub daily_loss_limit: f64,
    /// Per-trade risk budget; size fractions are clamped to 10x this value.
    pub position_risk_per_trade: f64,
    /// Cap on total exposure (existing position value plus new size) as a
    /// fraction of balance.
    pub max_total_exposure: f64,
    /// Minimum reward-to-risk ratio for opening trades with stops set.
    pub min_risk_reward_ratio: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_open_positions: 3,
            max_leverage: 10,
            max_drawdown: 0.10,
            daily_loss_limit: 0.05,
            position_risk_per_trade: 0.01,
            max_total_exposure: 0.25,
            min_risk_reward_ratio: 2.0,
        }
    }
}

/// Outcome of one risk evaluation. Produced fresh per call, never mutated
/// after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub approved: bool,
    /// Populated exactly when `approved` is false.
    pub reason: Option<String>,
    pub adjusted_size_fraction: f64,
    pub adjusted_leverage: u32,
}

impl RiskVerdict {
    /// Start from an approving verdict carrying the decision's own size and
    /// leverage; checks clamp or reject from here.
    pub(crate) fn approving(decision: &Decision) -> Self {
        Self {
            approved: true,
            reason: None,
            adjusted_size_fraction: decision.size_fraction,
            adjusted_leverage: decision.leverage,
        }
    }
}
