use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use market_core::{Bar, MarketSnapshot, Position, PositionSide};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::error::ExchangeError;
use crate::models::{
    AssetCtx, CandleDto, ClearinghouseState, ExchangeResponse, Interval, Meta,
};

/// Read-side client for the exchange's `/info` endpoint, plus the raw
/// `/exchange` POST used by the trader.
pub struct HyperliquidClient {
    client: Client,
    base_url: String,
}

/// Exchange numbers arrive as decimal text; unparsable fields read as 0.
fn parse_f64(s: &str) -> f64 {
    s.parse().unwrap_or_default()
}

impl HyperliquidClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn info<T: DeserializeOwned>(&self, body: serde_json::Value) -> Result<T, ExchangeError> {
        let url = format!("{}/info", self.base_url);
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    /// POST a signed payload to the order endpoint.
    pub(crate) async fn exchange<A: Serialize>(
        &self,
        payload: &A,
    ) -> Result<ExchangeResponse, ExchangeError> {
        let url = format!("{}/exchange", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api { status, body });
        }

        Ok(response.json::<ExchangeResponse>().await?)
    }

    /// Historical candles, oldest first.
    pub async fn candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>, ExchangeError> {
        let end_time = Utc::now().timestamp_millis();
        let start_time = end_time - limit as i64 * interval.to_millis();

        let candles: Vec<CandleDto> = self
            .info(json!({
                "type": "candleSnapshot",
                "req": {
                    "coin": symbol,
                    "interval": interval.as_str(),
                    "startTime": start_time,
                    "endTime": end_time,
                },
            }))
            .await?;

        Ok(candles
            .into_iter()
            .map(|c| Bar {
                timestamp: DateTime::from_timestamp_millis(c.t).unwrap_or_else(Utc::now),
                open: parse_f64(&c.o),
                high: parse_f64(&c.h),
                low: parse_f64(&c.l),
                close: parse_f64(&c.c),
                volume: parse_f64(&c.v),
            })
            .collect())
    }

    /// Point-in-time market summary: mid price from `allMids`, 24h context
    /// from `metaAndAssetCtxs`.
    pub async fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, ExchangeError> {
        let mids: HashMap<String, String> = self.info(json!({"type": "allMids"})).await?;
        let mut price = mids.get(symbol).map(|p| parse_f64(p)).unwrap_or_default();

        // The context response is a two-element array: [meta, assetCtxs],
        // aligned by universe index.
        let (meta, ctxs): (Meta, Vec<AssetCtx>) =
            self.info(json!({"type": "metaAndAssetCtxs"})).await?;

        let mut day_change_percent = 0.0;
        let mut day_volume = 0.0;

        let index = meta.universe.iter().position(|a| a.name == symbol);
        if let Some(ctx) = index.and_then(|i| ctxs.get(i)) {
            if let Some(v) = &ctx.day_ntl_vlm {
                day_volume = parse_f64(v);
            }

            let prev = ctx.prev_day_px.as_deref().map(parse_f64).unwrap_or_default();
            let mark = ctx.mark_px.as_deref().map(parse_f64).unwrap_or_default();

            // Fall back to the mark price when the mid is missing.
            if price == 0.0 {
                price = mark;
            }
            if prev > 0.0 && mark > 0.0 {
                day_change_percent = (mark - prev) / prev * 100.0;
            }
        }

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            price,
            day_change_percent,
            day_volume,
        })
    }

    /// Current position for a symbol, flat when the account holds none.
    pub async fn position(&self, symbol: &str, user: &str) -> Result<Position, ExchangeError> {
        let state: ClearinghouseState = self
            .info(json!({"type": "clearinghouseState", "user": user}))
            .await?;

        for asset_position in state.asset_positions {
            let dto = asset_position.position;
            if dto.coin != symbol {
                continue;
            }

            let signed_size = parse_f64(&dto.szi);
            let (side, size) = if signed_size > 0.0 {
                (PositionSide::Long, signed_size)
            } else if signed_size < 0.0 {
                (PositionSide::Short, -signed_size)
            } else {
                (PositionSide::Flat, 0.0)
            };

            let entry_price = dto.entry_px.as_deref().map(parse_f64).unwrap_or_default();
            let unrealized_pnl = dto
                .unrealized_pnl
                .as_deref()
                .map(parse_f64)
                .unwrap_or_default();
            let pnl_percent = if entry_price > 0.0 {
                unrealized_pnl / entry_price * 100.0
            } else {
                0.0
            };

            return Ok(Position {
                symbol: symbol.to_string(),
                side,
                size,
                entry_price,
                unrealized_pnl,
                pnl_percent,
                // The clearinghouse state does not report the open time.
                holding: std::time::Duration::ZERO,
            });
        }

        Ok(Position::flat(symbol))
    }

    /// Account equity from the clearinghouse margin summary.
    pub async fn account_balance(&self, user: &str) -> Result<f64, ExchangeError> {
        let state: ClearinghouseState = self
            .info(json!({"type": "clearinghouseState", "user": user}))
            .await?;

        state
            .margin_summary
            .map(|m| parse_f64(&m.account_value))
            .ok_or_else(|| {
                ExchangeError::InvalidResponse("clearinghouse state without margin summary".into())
            })
    }

    /// Resolve a symbol to its asset index by scanning the universe. Looked
    /// up fresh for every order; the registry is never cached.
    pub async fn asset_index(&self, symbol: &str) -> Result<u32, ExchangeError> {
        let meta: Meta = self.info(json!({"type": "meta"})).await?;

        meta.universe
            .iter()
            .position(|asset| asset.name == symbol)
            .map(|i| i as u32)
            .ok_or_else(|| ExchangeError::UnknownAsset(symbol.to_string()))
    }
}
