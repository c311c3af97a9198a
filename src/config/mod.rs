//! Configuration management for the triage webhook

pub mod file;

use std::path::{Path, PathBuf};

use crate::{Error, Result};

use file::TriageConfigFile;

/// Default port when neither env nor file sets one
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Triage webhook configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Bearer token required on the webhook (from `TRIAGE_WEBHOOK_TOKEN`).
    /// Unset means the webhook is open.
    pub webhook_token: Option<String>,

    /// Intent table replacing the embedded one
    pub intents_path: Option<PathBuf>,

    /// Log full webhook payloads at debug level
    pub debug: bool,

    /// Global request budget per minute; unset disables rate limiting
    pub rate_limit_rpm: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            webhook_token: None,
            intents_path: None,
            debug: false,
            rate_limit_rpm: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// `config_path` overrides the default file location.
    ///
    /// # Errors
    ///
    /// Returns error if an environment value is malformed
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let fc = file::load_config_file(config_path);
        Self::resolve(fc, |key| std::env::var(key).ok())
    }

    /// Merge sources with priority env > file > default
    ///
    /// # Errors
    ///
    /// Returns error if a value fails to parse or is out of range
    pub fn resolve(fc: TriageConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match env("TRIAGE_PORT").or_else(|| env("PORT")) {
            Some(s) => s
                .parse()
                .map_err(|e| Error::Config(format!("invalid port '{s}': {e}")))?,
            None => fc.server.port.unwrap_or(DEFAULT_PORT),
        };

        let host = env("TRIAGE_HOST")
            .or(fc.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let webhook_token = env("TRIAGE_WEBHOOK_TOKEN")
            .or(fc.auth.webhook_token)
            .filter(|t| !t.is_empty());

        let intents_path = env("TRIAGE_INTENTS_PATH")
            .map(PathBuf::from)
            .or(fc.intents.path);

        let debug = env("TRIAGE_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .or(fc.server.debug)
            .unwrap_or(false);

        let rate_limit_rpm = match env("TRIAGE_RATE_LIMIT_RPM") {
            Some(s) => Some(
                s.parse()
                    .map_err(|e| Error::Config(format!("invalid rate limit '{s}': {e}")))?,
            ),
            None => fc.server.rate_limit_rpm,
        };
        if rate_limit_rpm == Some(0) {
            return Err(Error::Config(
                "rate limit must be at least 1 request per minute".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            webhook_token,
            intents_path,
            debug,
            rate_limit_rpm,
        })
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
