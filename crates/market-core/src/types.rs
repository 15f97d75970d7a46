use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar data, oldest first in any sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Point-in-time market summary for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub price: f64,
    /// 24h change in percent.
    pub day_change_percent: f64,
    /// 24h notional volume.
    pub day_volume: f64,
}

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    Long,
    Short,
    /// No position. Size is always 0 when flat.
    #[serde(rename = "NONE")]
    Flat,
}

impl PositionSide {
    pub fn label(&self) -> &'static str {
        match self {
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
            PositionSide::Flat => "NONE",
        }
    }
}

/// Current position for a symbol, read fresh from the exchange each cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub side: PositionSide,
    /// Contract size, always non-negative (side carries the direction).
    pub size: f64,
    pub entry_price: f64,
    pub unrealized_pnl: f64,
    pub pnl_percent: f64,
    /// Time since the position was opened.
    pub holding: Duration,
}

impl Position {
    /// An empty position for the given symbol.
    pub fn flat(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            side: PositionSide::Flat,
            size: 0.0,
            entry_price: 0.0,
            unrealized_pnl: 0.0,
            pnl_percent: 0.0,
            holding: Duration::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.side != PositionSide::Flat && self.size > 0.0
    }
}
