pub mod decision;
pub mod error;
pub mod types;

pub use decision::{Decision, HoldingPeriod, RiskTier, TradeAction};
pub use error::ValidationError;
pub use types::{Bar, MarketSnapshot, Position, PositionSide};
