pub mod indicators;
pub mod snapshot;

#[cfg(test)]
mod indicators_tests;

pub use indicators::*;
pub use snapshot::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("insufficient data: {have} bars, need {need}")]
    InsufficientData { have: usize, need: usize },
}
