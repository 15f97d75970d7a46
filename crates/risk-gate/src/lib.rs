pub mod gate;
pub mod models;
pub mod state;

#[cfg(test)]
mod tests;

pub use gate::RiskGate;
pub use models::{RiskLimits, RiskVerdict};
pub use state::RiskState;
