//! TOML configuration.
//!
//! Every invocation receives an explicit [`Config`]; nothing is read from the
//! process environment. See `config/launchwatch.example.toml`.

use std::path::{Path, PathBuf};

use launchwatch_core::filter::DEFAULT_KEYWORDS;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    /// Store connection string, e.g. `sqlite://./data/launchwatch.sqlite`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "advisories".to_string()
}

impl DbConfig {
    /// The connection string, or [`ConfigError::Missing`] when absent or blank.
    pub fn connection_url(&self) -> Result<&str, ConfigError> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ConfigError::Missing("db.url")),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Largest response body accepted from upstream.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_bytes() -> u64 {
    16 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// When set, the server also runs the ingestion pipeline on this period.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            refresh_interval_secs: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Check every field that can be checked without connecting anywhere.
    ///
    /// `db.url` is not required here; [`DbConfig::connection_url`] enforces it
    /// when a store connection is actually needed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.db.collection) {
            return Err(invalid(
                "db.collection",
                format!("'{}' is not a valid collection name", self.db.collection),
            ));
        }

        let url = self.upstream.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Missing("upstream.url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid("upstream.url", "must be an http(s) URL"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(invalid("upstream.timeout_secs", "must be > 0"));
        }
        if self.upstream.max_body_bytes == 0 {
            return Err(invalid("upstream.max_body_bytes", "must be > 0"));
        }

        if self.filter.keywords.is_empty() {
            return Err(invalid("filter.keywords", "must not be empty"));
        }
        if self.filter.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(invalid("filter.keywords", "must not contain blank entries"));
        }

        if self.server.refresh_interval_secs == Some(0) {
            return Err(invalid("server.refresh_interval_secs", "must be > 0"));
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[db]
url = "sqlite://data/test.sqlite"

[upstream]
url = "https://example.invalid/advisories"
"#;

    fn parse(s: &str) -> Config {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(MINIMAL);
        cfg.validate().unwrap();
        assert_eq!(cfg.db.collection, "advisories");
        assert_eq!(cfg.upstream.timeout_secs, 30);
        assert_eq!(cfg.upstream.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(cfg.server.bind, "127.0.0.1:7340");
        assert!(cfg.server.refresh_interval_secs.is_none());
        assert!(cfg.filter.keywords.iter().any(|k| k == "starship"));
        assert_eq!(cfg.db.connection_url().unwrap(), "sqlite://data/test.sqlite");
    }

    #[test]
    fn test_missing_db_url_fails_at_connection_time() {
        let cfg = parse(
            r#"
[db]
[upstream]
url = "https://example.invalid/advisories"
"#,
        );
        cfg.validate().unwrap();
        assert!(matches!(
            cfg.db.connection_url(),
            Err(ConfigError::Missing("db.url"))
        ));

        let mut cfg = cfg;
        cfg.db.url = Some("   ".into());
        assert!(cfg.db.connection_url().is_err());
    }

    #[test]
    fn test_invalid_fields() {
        let mut cfg = parse(MINIMAL);
        cfg.db.collection = "advisories; DROP TABLE x".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "db.collection", .. })
        ));

        let mut cfg = parse(MINIMAL);
        cfg.upstream.url = "ftp://example.invalid".into();
        assert!(cfg.validate().is_err());

        let mut cfg = parse(MINIMAL);
        cfg.filter.keywords.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = parse(MINIMAL);
        cfg.server.refresh_interval_secs = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/launchwatch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
