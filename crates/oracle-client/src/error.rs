use market_core::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("oracle returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("decision failed validation: {0}")]
    Validation(#[from] ValidationError),
}

pub type OracleResult<T> = Result<T, OracleError>;
