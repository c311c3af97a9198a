//! Shared test utilities

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use tower::ServiceExt;
use triage_webhook::{ApiServerBuilder, IntentTable};

/// Small intent table used across integration tests
pub const TEST_TABLE: &str = r#"
[clarification]
intent = "clarification"
default_hint = "Could you repeat your last answer?"

[clarification.hints]
nice-tier-a = "Tier A products provide system service benefits."
dpia = "A DPIA assesses data protection risk."
dspt = "The DSPT is the NHS data security self-assessment."

[[intent]]
name = "nice-tier-a-yes"
text = "Your product falls into NICE tier A."

[[intent]]
name = "dpia"
text = "Is your organisation registered with the ICO?"
"#;

/// Parse the shared test table
#[must_use]
pub fn test_table() -> Arc<IntentTable> {
    Arc::new(IntentTable::parse(TEST_TABLE).expect("test table parses"))
}

/// Build a router over the test table
#[must_use]
pub fn build_test_router(token: Option<&str>) -> Router {
    ApiServerBuilder::new(test_table(), "127.0.0.1:0".to_string())
        .webhook_token(token.map(ToString::to_string))
        .build()
        .router()
}

/// POST a JSON body to `uri`, optionally with a bearer token
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A fulfillment request for `intent` with `(short name, lifespan)` contexts
#[must_use]
pub fn fulfillment_request(intent: &str, contexts: &[(&str, Option<u32>)]) -> serde_json::Value {
    let session = "projects/triage/agent/sessions/abc123";
    let output_contexts: Vec<serde_json::Value> = contexts
        .iter()
        .map(|(name, lifespan)| {
            let mut ctx = serde_json::json!({ "name": format!("{session}/contexts/{name}") });
            if let Some(count) = lifespan {
                ctx["lifespanCount"] = serde_json::json!(count);
            }
            ctx
        })
        .collect();

    serde_json::json!({
        "responseId": "resp-1",
        "session": session,
        "queryResult": {
            "queryText": "yes",
            "intent": {
                "name": "projects/triage/agent/intents/1",
                "displayName": intent
            },
            "outputContexts": output_contexts
        }
    })
}
