//! Generic intent handler
//!
//! Every intent runs the same steps: find the most recent contexts, expire
//! the rest, then append the intent's fixed text. The clarification intent
//! additionally picks a single current context to choose its hint.

use std::sync::Arc;

use crate::context::{
    Context, ContextExpiry, ContextSink, most_recent_context, most_recent_contexts,
    prune_stale_contexts,
};
use crate::intents::IntentTable;

/// Outcome of handling one intent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fulfillment {
    /// Response lines, in the order they were appended
    pub messages: Vec<String>,
    /// Contexts the platform should expire
    pub expired: Vec<ContextExpiry>,
}

impl Fulfillment {
    /// Append a response line
    pub fn add(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    /// All response lines joined for platforms that take a single string
    #[must_use]
    pub fn text(&self) -> Option<String> {
        if self.messages.is_empty() {
            None
        } else {
            Some(self.messages.join("\n"))
        }
    }
}

impl ContextSink for Fulfillment {
    fn expire(&mut self, expiry: ContextExpiry) {
        self.expired.push(expiry);
    }
}

/// Routes intents to their fixed responses
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<IntentTable>,
}

impl Dispatcher {
    /// Create a dispatcher over an intent table
    #[must_use]
    pub const fn new(table: Arc<IntentTable>) -> Self {
        Self { table }
    }

    /// The underlying intent table
    #[must_use]
    pub fn table(&self) -> &IntentTable {
        &self.table
    }

    /// Handle a matched intent against the session's active contexts
    ///
    /// Unknown intents still prune contexts but add no text, leaving the
    /// platform to fall back to its own response.
    #[must_use]
    pub fn fulfill(&self, intent: &str, contexts: &[Context]) -> Fulfillment {
        let mut fulfillment = Fulfillment::default();

        let recent = most_recent_contexts(contexts);
        let pruned = prune_stale_contexts(contexts, &recent, &mut fulfillment);

        tracing::debug!(
            intent = %intent,
            active = contexts.len(),
            recent = ?recent,
            pruned,
            "resolved contexts"
        );

        if self.table.is_clarification(intent) {
            let current = most_recent_context(contexts).ok();
            let hint = self.table.clarification().hint_for(current);
            tracing::debug!(context = ?current, "answering clarification");
            fulfillment.add(hint);
        } else if let Some(response) = self.table.response(intent) {
            fulfillment.add(response.text.as_str());
        } else {
            tracing::warn!(intent = %intent, "no response registered for intent");
        }

        fulfillment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        [clarification]
        intent = "clarification"
        default_hint = "Could you repeat that?"

        [clarification.hints]
        dpia = "A DPIA assesses data protection risk."
        wcag = "WCAG 2.1 AA is the accessibility standard."

        [[intent]]
        name = "dpia"
        text = "Is your organisation registered with the ICO?"
    "#;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(IntentTable::parse(TABLE).unwrap()))
    }

    #[test]
    fn test_known_intent_appends_text_and_prunes() {
        let contexts = vec![
            Context::new("p/s/contexts/welcome", 1),
            Context::new("p/s/contexts/dpia", 5),
        ];

        let result = dispatcher().fulfill("dpia", &contexts);

        assert_eq!(
            result.messages,
            vec!["Is your organisation registered with the ICO?".to_string()]
        );
        assert_eq!(result.expired, vec![ContextExpiry::new("welcome")]);
    }

    #[test]
    fn test_clarification_uses_single_winner_hint() {
        let contexts = vec![
            Context::new("p/s/contexts/dpia", 2),
            Context::new("p/s/contexts/wcag", 4),
        ];

        let result = dispatcher().fulfill("clarification", &contexts);

        assert_eq!(
            result.text().as_deref(),
            Some("WCAG 2.1 AA is the accessibility standard.")
        );
        assert_eq!(result.expired, vec![ContextExpiry::new("dpia")]);
    }

    #[test]
    fn test_clarification_without_contexts_uses_default() {
        let result = dispatcher().fulfill("clarification", &[]);

        assert_eq!(result.text().as_deref(), Some("Could you repeat that?"));
        assert!(result.expired.is_empty());
    }

    #[test]
    fn test_unknown_intent_adds_nothing() {
        let contexts = vec![Context::without_lifespan("p/s/contexts/stale")];

        let result = dispatcher().fulfill("no-such-intent", &contexts);

        assert!(result.text().is_none());
        assert_eq!(result.expired, vec![ContextExpiry::new("stale")]);
    }
}
