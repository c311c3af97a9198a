//! Pruning of contexts that are no longer current

use std::collections::HashSet;

use serde::Serialize;

use super::Context;

/// Lifespan value the platform interprets as "expire now"
pub const EXPIRED_LIFESPAN: &str = "0";

/// [`EXPIRED_LIFESPAN`] as the numeric `lifespanCount` of the platform's wire format
pub const EXPIRED_LIFESPAN_COUNT: u32 = 0;

/// Instruction asking the platform to expire a context immediately
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextExpiry {
    /// Short context name (last path segment)
    pub name: String,
    /// Always [`EXPIRED_LIFESPAN`]
    pub lifespan: &'static str,
}

impl ContextExpiry {
    /// Expire the context with the given short name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifespan: EXPIRED_LIFESPAN,
        }
    }
}

/// Receiver of expiry instructions, typically the outgoing platform response
pub trait ContextSink {
    /// Record that a context should be expired
    fn expire(&mut self, expiry: ContextExpiry);
}

impl ContextSink for Vec<ContextExpiry> {
    fn expire(&mut self, expiry: ContextExpiry) {
        self.push(expiry);
    }
}

/// Expire every context whose short name is not in `recent`
///
/// Matching is by name only, so each non-member occurrence produces one
/// instruction and members produce none. Returns the number issued.
pub fn prune_stale_contexts<S: ContextSink + ?Sized>(
    contexts: &[Context],
    recent: &HashSet<&str>,
    sink: &mut S,
) -> usize {
    let mut issued = 0;

    for context in contexts {
        let name = context.short_name();
        if recent.contains(name) {
            continue;
        }

        tracing::debug!(context = %name, "expiring stale context");
        sink.expire(ContextExpiry::new(name));
        issued += 1;
    }

    issued
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::most_recent_contexts;

    #[test]
    fn test_prunes_only_non_recent() {
        let contexts = vec![
            Context::new("p/s/contexts/x", 1),
            Context::new("p/s/contexts/y", 3),
            Context::new("p/s/contexts/z", 3),
        ];
        let recent = most_recent_contexts(&contexts);

        let mut expired: Vec<ContextExpiry> = Vec::new();
        let issued = prune_stale_contexts(&contexts, &recent, &mut expired);

        assert_eq!(issued, 1);
        assert_eq!(expired, vec![ContextExpiry::new("x")]);
    }

    #[test]
    fn test_matches_by_name_not_identity() {
        let contexts = vec![
            Context::new("sessions/a/contexts/dpia", 5),
            Context::without_lifespan("sessions/b/contexts/dpia"),
            Context::without_lifespan("sessions/b/contexts/welcome"),
        ];
        let recent = most_recent_contexts(&contexts);

        let mut expired: Vec<ContextExpiry> = Vec::new();
        prune_stale_contexts(&contexts, &recent, &mut expired);

        assert_eq!(expired, vec![ContextExpiry::new("welcome")]);
    }

    #[test]
    fn test_empty_recent_set_expires_everything() {
        let contexts = vec![
            Context::without_lifespan("p/a"),
            Context::without_lifespan("p/b"),
            Context::without_lifespan("p/a"),
        ];
        let recent = most_recent_contexts(&contexts);

        let mut expired: Vec<ContextExpiry> = Vec::new();
        let issued = prune_stale_contexts(&contexts, &recent, &mut expired);

        assert_eq!(issued, 3);
        assert_eq!(
            expired,
            vec![
                ContextExpiry::new("a"),
                ContextExpiry::new("b"),
                ContextExpiry::new("a"),
            ]
        );
    }

    #[test]
    fn test_no_contexts_no_instructions() {
        let mut expired: Vec<ContextExpiry> = Vec::new();
        assert_eq!(prune_stale_contexts(&[], &HashSet::new(), &mut expired), 0);
        assert!(expired.is_empty());
    }

    #[test]
    fn test_expired_lifespan_constants_agree() {
        assert_eq!(EXPIRED_LIFESPAN, EXPIRED_LIFESPAN_COUNT.to_string());
    }

    #[test]
    fn test_expiry_wire_shape() {
        let json = serde_json::to_value(ContextExpiry::new("x")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "x", "lifespan": "0"}));
    }
}
