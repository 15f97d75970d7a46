use async_trait::async_trait;
use market_core::Decision;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::context::MarketContext;
use crate::error::{OracleError, OracleResult};
use crate::provider::DecisionOracle;
use crate::OracleConfig;

/// Decision oracle backed by an OpenAI-compatible chat-completions endpoint.
pub struct ChatOracle {
    client: Client,
    config: OracleConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatOracle {
    pub fn new(config: OracleConfig) -> OracleResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = json!({
            "model": &self.config.model,
            "messages": [ChatMessage { role: "user", content: prompt }],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OracleError::InvalidResponse(format!(
                "oracle API error (status {status}): {text}"
            )));
        }

        let parsed = response.json::<ChatResponse>().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OracleError::InvalidResponse("response carried no choices".to_string()))
    }
}

#[async_trait]
impl DecisionOracle for ChatOracle {
    async fn decide(&self, ctx: &MarketContext) -> OracleResult<Decision> {
        let prompt = ctx.render_prompt();
        let response = self.complete(&prompt).await?;

        let decision = parse_decision(&response)?;
        tracing::debug!(
            action = decision.action.label(),
            confidence = decision.confidence,
            "oracle decision parsed"
        );
        Ok(decision)
    }

    fn backend_name(&self) -> &'static str {
        "chat"
    }
}

/// Extract and validate the decision JSON from an oracle reply.
///
/// Oracles tend to wrap the object in prose or markdown fences, so the
/// outermost `{...}` span is cut out before deserializing.
pub fn parse_decision(response: &str) -> OracleResult<Decision> {
    let start = response
        .find('{')
        .ok_or_else(|| OracleError::InvalidResponse("no JSON object in response".to_string()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| OracleError::InvalidResponse("no JSON object in response".to_string()))?;

    if end < start {
        return Err(OracleError::InvalidResponse(
            "no JSON object in response".to_string(),
        ));
    }

    let decision: Decision = serde_json::from_str(&response[start..=end])
        .map_err(|e| OracleError::InvalidResponse(format!("malformed decision JSON: {e}")))?;

    decision.validate()?;
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::{RiskTier, TradeAction};

    const GOOD_JSON: &str = r#"{
        "action": "OPEN_LONG",
        "confidence": 0.82,
        "size": 0.05,
        "leverage": 5,
        "reason": "EMA stack aligned, MACD histogram positive",
        "stop_loss": 1900.0,
        "take_profit": 2200.0,
        "risk_level": "MEDIUM",
        "expected_holding_period": "SHORT"
    }"#;

    #[test]
    fn parses_bare_json() {
        let d = parse_decision(GOOD_JSON).unwrap();
        assert_eq!(d.action, TradeAction::OpenLong);
        assert_eq!(d.risk_tier, RiskTier::Medium);
        assert_eq!(d.leverage, 5);
    }

    #[test]
    fn parses_json_wrapped_in_markdown() {
        let wrapped = format!("Here is my analysis:\n```json\n{GOOD_JSON}\n```\nGood luck!");
        let d = parse_decision(&wrapped).unwrap();
        assert_eq!(d.action, TradeAction::OpenLong);
    }

    #[test]
    fn response_without_json_is_invalid() {
        let err = parse_decision("I would rather not say.").unwrap_err();
        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }

    #[test]
    fn out_of_domain_confidence_fails_validation() {
        let bad = GOOD_JSON.replace("0.82", "1.5");
        let err = parse_decision(&bad).unwrap_err();
        assert!(matches!(err, OracleError::Validation(_)));
    }

    #[test]
    fn unknown_action_is_invalid_response() {
        let bad = GOOD_JSON.replace("OPEN_LONG", "MOON");
        let err = parse_decision(&bad).unwrap_err();
        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }

    #[test]
    fn out_of_domain_leverage_fails_validation() {
        let bad = GOOD_JSON.replace("\"leverage\": 5", "\"leverage\": 50");
        let err = parse_decision(&bad).unwrap_err();
        assert!(matches!(err, OracleError::Validation(_)));
    }
}
