use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hyperliquid_broker::{HyperliquidClient, Trader};
use oracle_client::ChatOracle;
use tokio::time::{self, MissedTickBehavior};

mod config;
mod cycle;
mod executor;
mod types;

use config::AgentConfig;
use cycle::TradingAgent;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("starting AI trading agent");

    let config = AgentConfig::from_env()?;
    tracing::info!("configuration loaded");
    tracing::info!("  symbols: {}", config.symbols.join(","));
    tracing::info!("  timeframe: {}", config.timeframe.as_str());
    tracing::info!("  cycle interval: {}s", config.cycle_interval_seconds);
    tracing::info!("  max leverage: {}x", config.risk.max_leverage);
    tracing::info!("  max open positions: {}", config.risk.max_open_positions);

    if !config.trading_enabled {
        tracing::warn!("TRADING_ENABLED=false, running in simulation mode");
    }

    let client = HyperliquidClient::new(config.exchange_api_url.clone())
        .map_err(|e| anyhow::anyhow!("failed to build exchange client: {e}"))?;

    let trader = Arc::new(
        Trader::new(client, &config.private_key, config.account_address.clone())
            .map_err(|e| anyhow::anyhow!("failed to build trader: {e}"))?,
    );

    let oracle = Arc::new(
        ChatOracle::new(config.oracle.clone())
            .map_err(|e| anyhow::anyhow!("failed to build oracle client: {e}"))?,
    );
    tracing::info!(model = %config.oracle.model, "oracle client ready");

    // Startup connectivity check: the balance read exercises the whole
    // exchange path before the first cycle.
    match trader.client().account_balance(trader.address()).await {
        Ok(balance) => tracing::info!(balance, "startup check: exchange OK"),
        Err(e) => tracing::warn!(error = %e, "startup check: exchange unreachable"),
    }

    let mut agent = TradingAgent::new(config.clone(), trader, oracle);

    // One task drives every cycle; Delay keeps a slow cycle from stacking a
    // second one on top of the shared risk state.
    let mut ticker = time::interval(Duration::from_secs(config.cycle_interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received, stopping agent");
                break;
            }
            _ = ticker.tick() => {
                agent.run_cycle().await;
            }
        }
    }

    Ok(())
}
