pub mod chat;
pub mod context;
pub mod error;
pub mod provider;

pub use chat::ChatOracle;
pub use context::MarketContext;
pub use error::{OracleError, OracleResult};
pub use provider::DecisionOracle;

use std::time::Duration;

/// Connection settings for the decision oracle endpoint.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("ORACLE_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string()),
            api_key: std::env::var("ORACLE_API_KEY").unwrap_or_default(),
            model: std::env::var("ORACLE_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            temperature: 0.3,
            max_tokens: 1024,
            timeout: Duration::from_secs(60),
        }
    }
}
