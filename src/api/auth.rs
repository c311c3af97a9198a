//! Webhook token authentication middleware
//!
//! The dialogue platform can attach custom headers to fulfillment calls;
//! we expect `Authorization: Bearer <token>` when a token is configured.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use super::ApiState;

/// Extract bearer token from Authorization header
fn extract_bearer(req: &Request) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Middleware to verify the webhook token
pub async fn require_webhook_token(
    State(state): State<Arc<ApiState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = &state.webhook_token else {
        return Ok(next.run(req).await);
    };

    match extract_bearer(&req) {
        Some(token) if token == expected => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!("invalid webhook token provided");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::debug!("no webhook token provided");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
