//! Configuration file loading
//!
//! ```toml
//! [auth]
//! bot_token = "123456789:..."     # or token_hash = "<64 hex chars>"
//! empty_is_absent = false
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tgwidget_core::TokenKey;
use tgwidget_telemetry::TelemetryConfig;

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: TelemetryConfig,
}

/// Bot credentials and record handling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Raw bot token
    pub bot_token: Option<String>,

    /// Hex SHA-256 of the bot token
    pub token_hash: Option<String>,

    /// Report present-but-empty names as absent
    #[serde(default)]
    pub empty_is_absent: bool,
}

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Resolve the signing key. Command-line values win over the file.
    pub fn resolve_key(&self, token: Option<&str>, token_hash: Option<&str>) -> Result<TokenKey> {
        if let Some(token) = token {
            return Ok(TokenKey::from_bot_token(token));
        }
        if let Some(hash) = token_hash {
            return TokenKey::from_hex(hash).context("Invalid --token-hash");
        }

        match (&self.schema.auth.bot_token, &self.schema.auth.token_hash) {
            (Some(_), Some(_)) => bail!("Set only one of auth.bot_token and auth.token_hash"),
            (Some(token), None) => Ok(TokenKey::from_bot_token(token)),
            (None, Some(hash)) => TokenKey::from_hex(hash).context("Invalid auth.token_hash"),
            (None, None) => bail!(
                "No bot token configured; pass --token, set TGWIDGET_BOT_TOKEN or add [auth] to the config file"
            ),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".tgwidget.toml", "tgwidget.toml"];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path))
}
