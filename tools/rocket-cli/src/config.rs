//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rocket_cart::DEFAULT_CART_KEY;
use rocket_data::TimeoutConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RocketConfig {
    /// Catalog API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl RocketConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in milliseconds. Unset uses per-endpoint defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl ApiConfig {
    /// Timeouts for the catalog client.
    pub fn timeouts(&self) -> TimeoutConfig {
        self.timeout_ms
            .map(|ms| TimeoutConfig::from_total(Duration::from_millis(ms)))
            .unwrap_or_default()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file, relative to the working directory unless absolute.
    #[serde(default = "default_path")]
    pub path: String,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_path() -> String {
    ".rocket/cart.json".to_string()
}

fn default_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            key: default_key(),
        }
    }
}

/// Generate a default rocket.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketCart configuration

[api]
base_url = "{base_url}"
# timeout_ms = 2000

[storage]
path = "{path}"
key = "{key}"
"#,
        base_url = default_base_url(),
        path = default_path(),
        key = default_key(),
    )
}
