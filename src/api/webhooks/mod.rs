//! Webhook endpoints for the dialogue platform

use std::sync::Arc;

use axum::{Router, middleware, routing::post};

use super::{ApiState, auth};

pub mod dialogflow;

/// Build webhooks router
///
/// The fulfillment endpoint is mounted at both the short path configured in
/// the agent console and the namespaced API path.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/webhook", post(dialogflow::handle_fulfillment))
        .route("/api/webhooks/dialogflow", post(dialogflow::handle_fulfillment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_webhook_token,
        ))
        .with_state(state)
}
