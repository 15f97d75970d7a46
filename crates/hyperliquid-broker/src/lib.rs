pub mod client;
pub mod error;
pub mod models;
pub mod signing;
pub mod trader;

pub use client::HyperliquidClient;
pub use error::ExchangeError;
pub use models::{Interval, OrderResult, Signature};
pub use trader::Trader;
