use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use hyperliquid_broker::Interval;
use oracle_client::OracleConfig;
use risk_gate::RiskLimits;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    // Trading parameters
    pub symbols: Vec<String>,
    pub timeframe: Interval,
    pub cycle_interval_seconds: u64,
    /// Kill switch: when false the full pipeline runs but orders are only
    /// logged, never submitted.
    pub trading_enabled: bool,

    // Risk limits
    pub risk: RiskLimits,

    // Oracle
    pub oracle: OracleConfig,

    // Exchange
    pub exchange_api_url: String,
    pub private_key: String,
    pub account_address: String,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self> {
        let timeframe_raw = env::var("TIMEFRAME").unwrap_or_else(|_| "5m".to_string());
        let timeframe = Interval::parse(&timeframe_raw)
            .with_context(|| format!("unsupported TIMEFRAME: {timeframe_raw}"))?;

        let config = Self {
            symbols: env::var("SYMBOLS")
                .unwrap_or_else(|_| "ETH,BTC".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            timeframe,
            cycle_interval_seconds: env::var("CYCLE_INTERVAL")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            trading_enabled: env::var("TRADING_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,

            risk: RiskLimits {
                max_open_positions: env::var("MAX_OPEN_POSITIONS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()?,
                max_leverage: env::var("MAX_LEVERAGE")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                max_drawdown: env::var("MAX_DRAWDOWN")
                    .unwrap_or_else(|_| "0.10".to_string())
                    .parse()?,
                daily_loss_limit: env::var("DAILY_LOSS_LIMIT")
                    .unwrap_or_else(|_| "0.05".to_string())
                    .parse()?,
                position_risk_per_trade: env::var("POSITION_RISK_PER_TRADE")
                    .unwrap_or_else(|_| "0.01".to_string())
                    .parse()?,
                max_total_exposure: env::var("MAX_TOTAL_EXPOSURE")
                    .unwrap_or_else(|_| "0.25".to_string())
                    .parse()?,
                min_risk_reward_ratio: env::var("MIN_RISK_REWARD_RATIO")
                    .unwrap_or_else(|_| "2.0".to_string())
                    .parse()?,
            },

            oracle: OracleConfig {
                base_url: env::var("ORACLE_BASE_URL")
                    .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string()),
                api_key: env::var("ORACLE_API_KEY").context("ORACLE_API_KEY not set")?,
                model: env::var("ORACLE_MODEL")
                    .unwrap_or_else(|_| "deepseek-chat".to_string()),
                temperature: env::var("ORACLE_TEMPERATURE")
                    .unwrap_or_else(|_| "0.3".to_string())
                    .parse()?,
                max_tokens: env::var("ORACLE_MAX_TOKENS")
                    .unwrap_or_else(|_| "1024".to_string())
                    .parse()?,
                timeout: Duration::from_secs(
                    env::var("ORACLE_TIMEOUT")
                        .unwrap_or_else(|_| "60".to_string())
                        .parse()?,
                ),
            },

            exchange_api_url: env::var("HYPERLIQUID_API_URL")
                .unwrap_or_else(|_| "https://api.hyperliquid.xyz".to_string()),
            private_key: env::var("HYPERLIQUID_PRIVATE_KEY")
                .context("HYPERLIQUID_PRIVATE_KEY not set")?,
            account_address: env::var("HYPERLIQUID_ACCOUNT_ADDRESS")
                .context("HYPERLIQUID_ACCOUNT_ADDRESS not set")?,
        };

        Ok(config)
    }
}
