//! Intent response table
//!
//! Every questionnaire step answers with a fixed string, so intents are data
//! rows rather than handler functions. The default table is compiled into the
//! binary; an override file can replace it at startup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;

use crate::{Error, Result};

/// Intent table compiled into the binary
const EMBEDDED_TABLE: &str = include_str!("../../intents/triage.toml");

static EMBEDDED: LazyLock<Arc<IntentTable>> = LazyLock::new(|| {
    Arc::new(IntentTable::parse(EMBEDDED_TABLE).expect("embedded intent table is valid"))
});

/// A fixed response for one intent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntentResponse {
    /// Intent display name as reported by the platform
    pub name: String,
    /// Text appended to the response
    pub text: String,
}

/// Clarification settings: which intent asks for help, and what to say
#[derive(Debug, Clone, Deserialize)]
pub struct Clarification {
    /// Intent display name of the generic "help me with this question" intent
    pub intent: String,
    /// Said when there is no context or no hint registered for it
    pub default_hint: String,
    /// Hint per context short name
    #[serde(default)]
    pub hints: HashMap<String, String>,
}

impl Clarification {
    /// Hint for a context, falling back to the default
    #[must_use]
    pub fn hint_for(&self, context: Option<&str>) -> &str {
        context
            .and_then(|name| self.hints.get(name))
            .map_or(self.default_hint.as_str(), String::as_str)
    }
}

/// On-disk schema of an intent table
#[derive(Debug, Deserialize)]
struct IntentTableFile {
    clarification: Clarification,
    #[serde(default, rename = "intent")]
    intents: Vec<IntentResponse>,
}

/// Immutable lookup from intent name to response
#[derive(Debug)]
pub struct IntentTable {
    responses: HashMap<String, IntentResponse>,
    clarification: Clarification,
}

impl IntentTable {
    /// The table compiled into the binary (parsed once per process)
    #[must_use]
    pub fn embedded() -> Arc<Self> {
        Arc::clone(&EMBEDDED)
    }

    /// Load a table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid table
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            intents = table.len(),
            hints = table.clarification.hints.len(),
            "loaded intent table"
        );
        Ok(table)
    }

    /// Parse a table from TOML text
    ///
    /// # Errors
    ///
    /// Returns error on malformed TOML, duplicate intent names, or an intent
    /// that collides with the clarification intent
    pub fn parse(content: &str) -> Result<Self> {
        let file: IntentTableFile = toml::from_str(content)?;

        let mut responses = HashMap::with_capacity(file.intents.len());
        for response in file.intents {
            if response.name == file.clarification.intent {
                return Err(Error::IntentTable(format!(
                    "intent '{}' is reserved for clarification",
                    response.name
                )));
            }
            if responses.contains_key(&response.name) {
                return Err(Error::IntentTable(format!(
                    "duplicate intent '{}'",
                    response.name
                )));
            }
            responses.insert(response.name.clone(), response);
        }

        Ok(Self {
            responses,
            clarification: file.clarification,
        })
    }

    /// Look up the fixed response for an intent
    #[must_use]
    pub fn response(&self, intent: &str) -> Option<&IntentResponse> {
        self.responses.get(intent)
    }

    /// Whether `intent` is the clarification intent
    #[must_use]
    pub fn is_clarification(&self, intent: &str) -> bool {
        self.clarification.intent == intent
    }

    /// Clarification settings
    #[must_use]
    pub const fn clarification(&self) -> &Clarification {
        &self.clarification
    }

    /// Intent names sorted alphabetically
    #[must_use]
    pub fn intent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.responses.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of response intents (clarification excluded)
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Whether the table has no response intents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
