use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("symbol {0} not found in asset universe")]
    UnknownAsset(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
}
