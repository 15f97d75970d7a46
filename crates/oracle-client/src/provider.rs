use async_trait::async_trait;
use market_core::Decision;

use crate::context::MarketContext;
use crate::error::OracleResult;

/// Backend-agnostic interface to the decision oracle.
///
/// The oracle is an opaque black box: it receives the serialized market
/// context and returns a proposed decision. Nothing downstream inspects how
/// it reasons; everything downstream relies on the decision having passed
/// field-domain validation.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(&self, ctx: &MarketContext) -> OracleResult<Decision>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
