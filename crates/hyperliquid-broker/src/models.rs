use serde::{Deserialize, Serialize};

/// Candle interval accepted by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Minute1,
    Minute5,
    Minute15,
    Hour1,
    Hour4,
    Day1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Hour1 => "1h",
            Interval::Hour4 => "4h",
            Interval::Day1 => "1d",
        }
    }

    pub fn to_millis(&self) -> i64 {
        match self {
            Interval::Minute1 => 60 * 1000,
            Interval::Minute5 => 5 * 60 * 1000,
            Interval::Minute15 => 15 * 60 * 1000,
            Interval::Hour1 => 60 * 60 * 1000,
            Interval::Hour4 => 4 * 60 * 60 * 1000,
            Interval::Day1 => 24 * 60 * 60 * 1000,
        }
    }

    /// Parse an interval name as configured ("5m", "1h", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1m" => Some(Interval::Minute1),
            "5m" => Some(Interval::Minute5),
            "15m" => Some(Interval::Minute15),
            "1h" => Some(Interval::Hour1),
            "4h" => Some(Interval::Hour4),
            "1d" => Some(Interval::Day1),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// /info wire types (read side)
// ---------------------------------------------------------------------------

/// One candle as served by `candleSnapshot`. Prices come as decimal text.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleDto {
    pub t: i64,
    pub o: String,
    pub h: String,
    pub l: String,
    pub c: String,
    pub v: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub universe: Vec<AssetMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetMeta {
    pub name: String,
}

/// Per-asset day context from `metaAndAssetCtxs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCtx {
    #[serde(default)]
    pub day_ntl_vlm: Option<String>,
    #[serde(default)]
    pub prev_day_px: Option<String>,
    #[serde(default)]
    pub mark_px: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub margin_summary: Option<MarginSummary>,
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    pub account_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetPosition {
    pub position: PositionDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub coin: String,
    /// Signed size; negative means short.
    pub szi: String,
    #[serde(default)]
    pub entry_px: Option<String>,
    #[serde(default)]
    pub unrealized_pnl: Option<String>,
}

// ---------------------------------------------------------------------------
// /exchange wire types (write side)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LimitOrderType {
    pub tif: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderType {
    pub limit: LimitOrderType,
}

/// Single order in the canonical action encoding. Field names are the
/// exchange's one-letter keys; declaration order is the canonical order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "p")]
    pub price: String,
    #[serde(rename = "s")]
    pub size: String,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    #[serde(rename = "t")]
    pub order_type: OrderType,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderAction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub orders: Vec<OrderRequest>,
    pub grouping: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelRequest {
    pub asset: String,
    pub oid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelAction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub cancels: Vec<CancelRequest>,
}

/// Ethereum-convention ECDSA signature over the Keccak-256 of the action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// 32-byte big-endian, 0x-prefixed hex.
    pub r: String,
    /// 32-byte big-endian, 0x-prefixed hex.
    pub s: String,
    /// Recovery id, 27 or 28.
    pub v: u8,
}

/// Envelope POSTed to `/exchange`.
#[derive(Debug, Clone, Serialize)]
pub struct SignedRequest<A> {
    pub action: A,
    /// Epoch milliseconds at submission time; monotonic per account.
    pub nonce: i64,
    pub signature: Signature,
}

// ---------------------------------------------------------------------------
// /exchange response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<ExchangeResponseBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponseBody {
    #[serde(default)]
    pub data: Option<ExchangeResponseData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponseData {
    #[serde(default)]
    pub statuses: Vec<OrderStatusDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusDto {
    #[serde(default)]
    pub filled: Option<FillDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillDto {
    #[serde(default)]
    pub oid: Option<OrderId>,
}

/// Order ids arrive as JSON numbers or strings depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Num(u64),
    Text(String),
}

impl OrderId {
    pub fn as_text(&self) -> String {
        match self {
            OrderId::Num(n) => n.to_string(),
            OrderId::Text(s) => s.clone(),
        }
    }
}

/// Parsed outcome of an order submission.
#[derive(Debug, Clone)]
pub struct OrderResult {
    pub success: bool,
    pub order_id: Option<String>,
    pub message: String,
}

impl ExchangeResponse {
    /// Flatten the nested response into an [`OrderResult`]: top-level status
    /// drives success, the first filled status supplies the order id.
    pub fn into_order_result(self) -> OrderResult {
        let status = self.status.unwrap_or_default();
        let success = status == "ok";

        let order_id = self
            .response
            .and_then(|r| r.data)
            .and_then(|d| d.statuses.into_iter().next())
            .and_then(|s| s.filled)
            .and_then(|f| f.oid)
            .map(|oid| oid.as_text());

        OrderResult {
            success,
            order_id,
            message: status,
        }
    }
}
