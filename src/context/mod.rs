//! Conversation contexts supplied by the dialogue platform
//!
//! The platform owns context lifecycle. Every webhook call carries a snapshot
//! of the active contexts; this module works out which of them are current
//! and which should be expired:
//! - [`most_recent_context`] picks a single winner (used for clarification hints)
//! - [`most_recent_contexts`] returns every context sharing the highest lifespan
//! - [`prune_stale_contexts`] emits expiry instructions for everything else

mod freshness;
mod pruner;

pub use freshness::{most_recent_context, most_recent_contexts};
pub use pruner::{
    ContextExpiry, ContextSink, EXPIRED_LIFESPAN, EXPIRED_LIFESPAN_COUNT, prune_stale_contexts,
};

use serde::{Deserialize, Serialize};

/// An active dialogue context as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Full context path, e.g. `projects/p/agent/sessions/s/contexts/intended-purpose`
    pub name: String,

    /// Remaining turns before the platform expires the context.
    /// Contexts without one never count as recent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<u32>,
}

impl Context {
    /// Create a context with a lifespan
    #[must_use]
    pub fn new(name: impl Into<String>, lifespan_count: u32) -> Self {
        Self {
            name: name.into(),
            lifespan_count: Some(lifespan_count),
        }
    }

    /// Create a context that carries no lifespan
    #[must_use]
    pub fn without_lifespan(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifespan_count: None,
        }
    }

    /// The meaningful part of the name (last path segment)
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }
}

/// Strip any `/`-delimited prefix, keeping the text after the last slash
#[must_use]
pub fn short_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, last)| last)
}
