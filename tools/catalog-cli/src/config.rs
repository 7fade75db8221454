//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use catalog_core::Currency;
use catalog_observability::LogConfig;
use catalog_server::{CacheSettings, QuerySettings, ServerConfig};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// Catalog configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub query: QuerySettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub logging: LogConfig,
}

impl CatalogConfig {
    /// Load config from a file; JSON when the extension is `.json`, TOML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Settings handed to the HTTP server.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_bind(self.server.bind.clone())
            .with_query(self.query)
            .with_cache(self.cache)
    }

    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.data.currency).unwrap_or_default()
    }

    /// Check the config for errors and warnings.
    pub fn validate(&self) -> Validation {
        let mut v = Validation::default();

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            v.errors.push(format!(
                "server.bind '{}' is not a socket address (host:port)",
                self.server.bind
            ));
        }
        if self.data.dir.trim().is_empty() {
            v.errors.push("data.dir is required".to_string());
        }
        if Currency::from_code(&self.data.currency).is_none() {
            v.errors.push(format!("data.currency '{}' is not supported", self.data.currency));
        }
        if self.query.default_limit < 1 {
            v.errors.push("query.default_limit must be at least 1".to_string());
        }
        if self.query.max_limit < self.query.default_limit {
            v.errors.push("query.max_limit must be >= query.default_limit".to_string());
        }
        if self.cache.enabled && self.cache.max_entries == 0 {
            v.warnings.push("cache.max_entries is 0; the cache will never store anything".to_string());
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            v.warnings.push("cache.ttl_secs is 0; entries expire immediately".to_string());
        }

        v
    }
}

/// Outcome of [`CatalogConfig::validate`].
#[derive(Debug, Default)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    catalog_server::config::DEFAULT_BIND.to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// `[data]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding `products.json` and `categories.json`.
    #[serde(default = "default_data_dir")]
    pub dir: String,

    /// ISO-4217 code used when printing prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            currency: default_currency(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default catalog.toml.
pub fn generate_default_config() -> String {
    r#"# Catalog service configuration

[server]
bind = "127.0.0.1:3000"

[data]
# Directory containing products.json and categories.json
dir = "data"
currency = "JPY"

[query]
default_limit = 12
max_limit = 100

[cache]
enabled = true
ttl_secs = 60
max_entries = 1024

[logging]
# trace | debug | info | warn | error (RUST_LOG overrides)
level = "info"
# human | json
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_observability::{LogFormat, LogLevel};

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CatalogConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CatalogConfig::default());
        let v = config.validate();
        assert!(v.errors.is_empty(), "{:?}", v.errors);
        assert!(v.warnings.is_empty(), "{:?}", v.warnings);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [query]
            max_limit = 40

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.query.max_limit, 40);
        assert_eq!(config.query.default_limit, 12);
        assert_eq!(config.logging, LogConfig::new(LogLevel::Info, LogFormat::Json));
        assert_eq!(config.data.dir, "data");
    }

    #[test]
    fn test_save_and_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CatalogConfig::default();
        config.server.bind = "0.0.0.0:8080".to_string();
        config.cache.enabled = false;

        for name in ["catalog.toml", "catalog.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CatalogConfig::load(&path).unwrap(), config);
        }

        let json = std::fs::read_to_string(dir.path().join("catalog.json")).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }

    #[test]
    fn test_validate_errors() {
        let mut config = CatalogConfig::default();
        config.server.bind = "localhost".to_string();
        config.data.currency = "XYZ".to_string();
        config.query.max_limit = 5;

        let v = config.validate();
        assert_eq!(v.errors.len(), 3, "{:?}", v.errors);
    }

    #[test]
    fn test_server_config() {
        let mut config = CatalogConfig::default();
        config.query.max_limit = 30;
        let server = config.server_config();
        assert_eq!(server.bind, "127.0.0.1:3000");
        assert_eq!(server.query.max_limit, 30);
    }
}
