//! Dialogflow ES v2 fulfillment request/response types
//!
//! Only the fields the webhook reads or writes are modelled; everything else
//! in the platform payload is ignored.

use serde::{Deserialize, Serialize};

use crate::context::{Context, ContextExpiry, EXPIRED_LIFESPAN_COUNT};

/// Fulfillment request sent by the platform when an intent matches
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub response_id: Option<String>,
    /// Session path, e.g. `projects/p/agent/sessions/s`
    #[serde(default)]
    pub session: String,
    pub query_result: QueryResult,
}

/// Result of the platform's intent matching
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub intent: Option<MatchedIntent>,
    /// Contexts active after the match
    #[serde(default)]
    pub output_contexts: Vec<Context>,
}

/// Matched intent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIntent {
    #[serde(default)]
    pub display_name: String,
}

impl WebhookRequest {
    /// Display name of the matched intent, empty if none
    #[must_use]
    pub fn intent_name(&self) -> &str {
        self.query_result
            .intent
            .as_ref()
            .map_or("", |i| i.display_name.as_str())
    }
}

/// Fulfillment response returned to the platform
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<FulfillmentMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<OutputContext>,
}

/// Rich response message (text variant only)
#[derive(Debug, Serialize)]
pub struct FulfillmentMessage {
    pub text: MessageText,
}

/// Text payload of a fulfillment message
#[derive(Debug, Serialize)]
pub struct MessageText {
    pub text: Vec<String>,
}

impl FulfillmentMessage {
    /// Single-line text message
    #[must_use]
    pub fn text(line: impl Into<String>) -> Self {
        Self {
            text: MessageText {
                text: vec![line.into()],
            },
        }
    }
}

/// Context update sent back to the platform
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputContext {
    pub name: String,
    pub lifespan_count: u32,
}

impl OutputContext {
    /// Render an expiry against the session it belongs to
    ///
    /// The platform addresses contexts by full path, so the short name is
    /// re-anchored under `<session>/contexts/`.
    #[must_use]
    pub fn from_expiry(session: &str, expiry: &ContextExpiry) -> Self {
        let name = if session.is_empty() {
            expiry.name.clone()
        } else {
            format!("{session}/contexts/{}", expiry.name)
        };

        Self {
            name,
            lifespan_count: EXPIRED_LIFESPAN_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let json = r#"{
            "responseId": "r-1",
            "session": "projects/p/agent/sessions/s",
            "queryResult": {
                "queryText": "yes",
                "languageCode": "en",
                "parameters": {},
                "intent": {
                    "name": "projects/p/agent/intents/123",
                    "displayName": "nice-tier-a-yes"
                },
                "outputContexts": [
                    {"name": "projects/p/agent/sessions/s/contexts/nice-tier-a", "lifespanCount": 2},
                    {"name": "projects/p/agent/sessions/s/contexts/__system_counters__"}
                ]
            },
            "originalDetectIntentRequest": {"source": "DIALOGFLOW_CONSOLE"}
        }"#;

        let request: WebhookRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.intent_name(), "nice-tier-a-yes");
        assert_eq!(request.query_result.language_code.as_deref(), Some("en"));
        assert_eq!(request.query_result.output_contexts.len(), 2);
        assert_eq!(
            request.query_result.output_contexts[1].short_name(),
            "__system_counters__"
        );
    }

    #[test]
    fn test_request_without_intent() {
        let request: WebhookRequest = serde_json::from_str(r#"{"queryResult": {}}"#).unwrap();
        assert_eq!(request.intent_name(), "");
        assert!(request.query_result.output_contexts.is_empty());
    }

    #[test]
    fn test_output_context_from_expiry() {
        let expiry = ContextExpiry::new("dpia");

        assert_eq!(
            OutputContext::from_expiry("projects/p/agent/sessions/s", &expiry),
            OutputContext {
                name: "projects/p/agent/sessions/s/contexts/dpia".to_string(),
                lifespan_count: EXPIRED_LIFESPAN_COUNT,
            }
        );
        assert_eq!(OutputContext::from_expiry("", &expiry).name, "dpia");
    }

    #[test]
    fn test_empty_response_serializes_to_empty_object() {
        let json = serde_json::to_value(WebhookResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
