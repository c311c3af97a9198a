//! TOML configuration file loading
//!
//! Supports `~/.config/triage-webhook/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct TriageConfigFile {
    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Intent table configuration
    #[serde(default)]
    pub intents: IntentsFileConfig,

    /// Webhook authentication
    #[serde(default)]
    pub auth: AuthFileConfig,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// Address to bind
    pub host: Option<String>,

    /// Port to listen on
    pub port: Option<u16>,

    /// Global request budget per minute
    pub rate_limit_rpm: Option<u32>,

    /// Log full webhook payloads
    pub debug: Option<bool>,
}

/// Intent table configuration
#[derive(Debug, Default, Deserialize)]
pub struct IntentsFileConfig {
    /// Replace the embedded intent table with this file
    pub path: Option<PathBuf>,
}

/// Webhook authentication
#[derive(Debug, Default, Deserialize)]
pub struct AuthFileConfig {
    /// Bearer token the platform must send
    pub webhook_token: Option<String>,
}

/// Load the config file from `path`, or from the default location
///
/// Returns `TriageConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file(path: Option<&Path>) -> TriageConfigFile {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_file_path) else {
        return TriageConfigFile::default();
    };

    if !path.exists() {
        return TriageConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                TriageConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            TriageConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/triage-webhook/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("triage-webhook").join("config.toml"))
}
