use chrono::Utc;
use k256::ecdsa::SigningKey;
use market_core::PositionSide;

use crate::client::HyperliquidClient;
use crate::error::ExchangeError;
use crate::models::{
    CancelAction, CancelRequest, LimitOrderType, OrderAction, OrderRequest, OrderResult,
    OrderType, SignedRequest,
};
use crate::signing::{parse_private_key, sign_action_bytes};

/// Write-side of the exchange: encodes, signs, and submits orders.
pub struct Trader {
    client: HyperliquidClient,
    signing_key: SigningKey,
    address: String,
}

impl Trader {
    pub fn new(
        client: HyperliquidClient,
        private_key_hex: &str,
        account_address: impl Into<String>,
    ) -> Result<Self, ExchangeError> {
        Ok(Self {
            client,
            signing_key: parse_private_key(private_key_hex)?,
            address: account_address.into(),
        })
    }

    /// Account address the trader submits for.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn client(&self) -> &HyperliquidClient {
        &self.client
    }

    pub async fn open_long(
        &self,
        symbol: &str,
        size: f64,
        price: f64,
    ) -> Result<OrderResult, ExchangeError> {
        self.place_order(symbol, true, size, price, false).await
    }

    pub async fn open_short(
        &self,
        symbol: &str,
        size: f64,
        price: f64,
    ) -> Result<OrderResult, ExchangeError> {
        self.place_order(symbol, false, size, price, false).await
    }

    /// Close an existing position with a reduce-only order on the opposite
    /// side.
    pub async fn close_position(
        &self,
        symbol: &str,
        side: PositionSide,
        size: f64,
        price: f64,
    ) -> Result<OrderResult, ExchangeError> {
        let is_buy = side == PositionSide::Short;
        self.place_order(symbol, is_buy, size, price, true).await
    }

    async fn place_order(
        &self,
        symbol: &str,
        is_buy: bool,
        size: f64,
        price: f64,
        reduce_only: bool,
    ) -> Result<OrderResult, ExchangeError> {
        // The asset registry is revalidated on every order.
        let asset = self.client.asset_index(symbol).await?;

        let action = OrderAction {
            kind: "order",
            orders: vec![OrderRequest {
                asset,
                is_buy,
                price: format_decimal(price),
                size: format_decimal(size),
                reduce_only,
                order_type: OrderType {
                    limit: LimitOrderType { tif: "Gtc" },
                },
            }],
            grouping: "na",
        };

        tracing::info!(
            symbol,
            asset,
            is_buy,
            price = %action.orders[0].price,
            size = %action.orders[0].size,
            reduce_only,
            "placing order"
        );

        let response = self.submit_signed(action).await?;
        let result = response.into_order_result();

        tracing::info!(
            success = result.success,
            order_id = result.order_id.as_deref().unwrap_or(""),
            message = %result.message,
            "order response"
        );

        Ok(result)
    }

    /// Cancel an order by id. Transport errors propagate; the response body
    /// is not interpreted further.
    pub async fn cancel_order(&self, symbol: &str, order_id: &str) -> Result<(), ExchangeError> {
        let action = CancelAction {
            kind: "cancel",
            cancels: vec![CancelRequest {
                asset: symbol.to_string(),
                oid: order_id.to_string(),
            }],
        };

        tracing::info!(symbol, order_id, "cancelling order");
        self.submit_signed(action).await?;
        Ok(())
    }

    /// Serialize the action to canonical bytes, sign them, and POST the
    /// signed envelope.
    async fn submit_signed<A: serde::Serialize>(
        &self,
        action: A,
    ) -> Result<crate::models::ExchangeResponse, ExchangeError> {
        let action_bytes = serde_json::to_vec(&action)
            .map_err(|e| ExchangeError::Signing(format!("action encoding failed: {e}")))?;

        let signature = sign_action_bytes(&self.signing_key, &action_bytes)?;

        let payload = SignedRequest {
            action,
            nonce: Utc::now().timestamp_millis(),
            signature,
        };

        self.client.exchange(&payload).await
    }
}

/// Render a price or size the way the exchange wants it: up to 12 fractional
/// digits with trailing zeros stripped, then a trailing dot stripped. No
/// tick-size rounding happens here; precision rejections surface as-is.
pub fn format_decimal(value: f64) -> String {
    let mut text = format!("{value:.12}");

    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }

    text
}
