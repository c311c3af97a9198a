//! Triage Webhook - fulfillment backend for a UK digital-health regulatory questionnaire
//!
//! The dialogue platform recognises intents and owns conversation contexts.
//! This crate answers its fulfillment calls:
//! - Context freshness resolution and pruning of stale contexts
//! - A data-driven intent table with clarification hints
//! - An HTTP webhook server speaking the platform's JSON contract
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          Dialogue platform (agent)           │
//! │  intent matching  │  context lifecycle       │
//! └───────────────────┬──────────────────────────┘
//!                     │ POST /webhook
//! ┌───────────────────▼──────────────────────────┐
//! │               Triage webhook                 │
//! │  api  │  dispatch  │  context  │  intents    │
//! └──────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod intents;

pub use api::{ApiServer, ApiServerBuilder, ApiState};
pub use config::Config;
pub use context::{
    Context, ContextExpiry, ContextSink, most_recent_context, most_recent_contexts,
    prune_stale_contexts, short_name,
};
pub use dispatch::{Dispatcher, Fulfillment};
pub use error::{Error, Result};
pub use intents::{Clarification, IntentResponse, IntentTable};
