//! Dialogflow fulfillment handler
//!
//! Receives "intent matched" calls, runs the generic intent handler over the
//! session's active contexts and answers with the intent's text plus expiry
//! instructions for stale contexts.

pub mod types;

use std::sync::Arc;

use axum::{Json, extract::State};

pub use types::{FulfillmentMessage, OutputContext, WebhookRequest, WebhookResponse};

use crate::api::ApiState;
use crate::dispatch::Fulfillment;

/// Handle a fulfillment request
pub async fn handle_fulfillment(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<WebhookRequest>,
) -> Json<WebhookResponse> {
    if state.debug {
        tracing::debug!(?request, "webhook request");
    }

    let intent = request.intent_name();
    let contexts = &request.query_result.output_contexts;

    tracing::info!(
        response_id = request.response_id.as_deref().unwrap_or_default(),
        intent = %intent,
        language = request.query_result.language_code.as_deref().unwrap_or_default(),
        contexts = contexts.len(),
        "fulfillment request received"
    );

    let fulfillment = state.dispatcher.fulfill(intent, contexts);
    let response = build_response(&request.session, &fulfillment);

    if state.debug {
        tracing::debug!(?response, "webhook response");
    }

    Json(response)
}

/// Translate a fulfillment into the platform's response shape
#[must_use]
pub fn build_response(session: &str, fulfillment: &Fulfillment) -> WebhookResponse {
    WebhookResponse {
        fulfillment_text: fulfillment.text(),
        fulfillment_messages: fulfillment
            .messages
            .iter()
            .map(|line| FulfillmentMessage::text(line.as_str()))
            .collect(),
        output_contexts: fulfillment
            .expired
            .iter()
            .map(|expiry| OutputContext::from_expiry(session, expiry))
            .collect(),
    }
}
