//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::catalog::DEFAULT_BASE_URL;
use shop_commerce::search::DEFAULT_PAGE_SIZE;

/// File names searched for when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog browsing settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Local cart/favorites store.
    #[serde(default)]
    pub store: StoreConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShopConfig {
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

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            errors.push(format!(
                "api.base_url '{}' must start with http:// or https://",
                self.api.base_url
            ));
        }

        if self.api.timeout_ms == Some(0) {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }

        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be greater than 0".to_string());
        } else if self.catalog.page_size > 100 {
            warnings.push(format!(
                "catalog.page_size {} is larger than the API returns per request",
                self.catalog.page_size
            ));
        }

        if let Err(e) = self.store.resolved_path() {
            errors.push(e.to_string());
        }

        if let Some(ref level) = self.logging.level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                warnings.push(format!(
                    "logging.level '{}' is not one of {}",
                    level,
                    LOG_LEVELS.join(", ")
                ));
            }
        }

        (errors, warnings)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds (default: none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

/// Catalog browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page (default: 8).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Local store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file (default: `shop.db` under the user data directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StoreConfig {
    /// Resolved database path.
    ///
    /// Fails when no path is configured and the platform has no data directory.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        match self.path {
            Some(ref path) => Ok(PathBuf::from(path)),
            None => default_store_path(dirs::data_dir()),
        }
    }
}

fn default_store_path(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    data_dir
        .map(|dir| dir.join("shop").join("shop.db"))
        .ok_or_else(|| anyhow!("no user data directory found; set store.path in the config"))
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shop configuration

[api]
base_url = "{base_url}"
# timeout_ms = 10000

[catalog]
page_size = {page_size}

[store]
# path = "shop.db"

[logging]
# level = "info"
format = "pretty"
"#,
        base_url = DEFAULT_BASE_URL,
        page_size = DEFAULT_PAGE_SIZE
    )
}
