use chrono::{DateTime, Utc};
use market_core::{PositionSide, TradeAction};
use serde::{Deserialize, Serialize};

/// What actually happened when an approved decision was executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub success: bool,
    pub action: TradeAction,
    pub symbol: String,
    pub side: Option<PositionSide>,
    pub size: f64,
    pub price: f64,
    pub order_id: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
    pub reason: String,
}

impl ExecutionReport {
    pub fn new(symbol: &str, action: TradeAction, confidence: f64, reason: &str) -> Self {
        Self {
            success: false,
            action,
            symbol: symbol.to_string(),
            side: None,
            size: 0.0,
            price: 0.0,
            order_id: None,
            message: String::new(),
            timestamp: Utc::now(),
            confidence,
            reason: reason.to_string(),
        }
    }
}
