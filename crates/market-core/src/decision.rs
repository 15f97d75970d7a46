use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Action proposed by the decision oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    OpenLong,
    OpenShort,
    AddPosition,
    ClosePosition,
    Hold,
}

impl TradeAction {
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::OpenLong => "OPEN_LONG",
            TradeAction::OpenShort => "OPEN_SHORT",
            TradeAction::AddPosition => "ADD_POSITION",
            TradeAction::ClosePosition => "CLOSE_POSITION",
            TradeAction::Hold => "HOLD",
        }
    }

    /// Actions that open a fresh position.
    pub fn is_opening(&self) -> bool {
        matches!(self, TradeAction::OpenLong | TradeAction::OpenShort)
    }

    /// Actions that change exposure (open or add).
    pub fn affects_exposure(&self) -> bool {
        matches!(
            self,
            TradeAction::OpenLong | TradeAction::OpenShort | TradeAction::AddPosition
        )
    }
}

/// Oracle's own assessment of how risky the proposed trade is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Horizon the oracle expects the position to be held for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldingPeriod {
    Short,
    Medium,
    Long,
}

/// A proposed trade from the decision oracle.
///
/// Every field is validated at the oracle boundary via [`Decision::validate`];
/// downstream consumers may assume the declared domains hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub action: TradeAction,
    /// Oracle confidence in [0, 1].
    pub confidence: f64,
    /// Fraction of account balance to deploy, in [0, 1].
    #[serde(rename = "size")]
    pub size_fraction: f64,
    /// Requested leverage, integer in [1, 20].
    pub leverage: u32,
    pub reason: String,
    pub stop_loss: f64,
    pub take_profit: f64,
    #[serde(rename = "risk_level")]
    pub risk_tier: RiskTier,
    pub expected_holding_period: HoldingPeriod,
}

impl Decision {
    /// Check numeric field domains. Enum fields are closed by construction;
    /// out-of-domain strings already fail deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::OutOfRange {
                field: "confidence",
                value: self.confidence,
            });
        }
        if !(0.0..=1.0).contains(&self.size_fraction) {
            return Err(ValidationError::OutOfRange {
                field: "size",
                value: self.size_fraction,
            });
        }
        if !(1..=20).contains(&self.leverage) {
            return Err(ValidationError::OutOfRange {
                field: "leverage",
                value: self.leverage as f64,
            });
        }
        if self.stop_loss < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "stop_loss",
                value: self.stop_loss,
            });
        }
        if self.take_profit < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "take_profit",
                value: self.take_profit,
            });
        }
        Ok(())
    }
}
