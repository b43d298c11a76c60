//! Runtime configuration from the environment (and `.env`).
//!
//! | variable | default |
//! |---|---|
//! | `CREDIT_API_BASE_URL` | `http://127.0.0.1:8000` |
//! | `CREDIT_WIZARD_LOG` | `info` (overridden by `RUST_LOG`) |
//! | `CREDIT_WIZARD_LOG_FILE` | unset |

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Where the TUI writes its log. CLI commands always log to stderr.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = match non_empty("CREDIT_API_BASE_URL") {
            Some(url) => validate_base_url(&url)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        Ok(Self {
            api_base_url,
            log: LogConfig {
                filter: non_empty("CREDIT_WIZARD_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                file: non_empty("CREDIT_WIZARD_LOG_FILE").map(PathBuf::from),
            },
        })
    }

    /// Apply a `--base-url` override.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.api_base_url = validate_base_url(url)?;
        }
        Ok(self)
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup(&[("CREDIT_API_BASE_URL", "  ")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CREDIT_API_BASE_URL", "https://risk.example.com/api/"),
            ("CREDIT_WIZARD_LOG", "debug"),
            ("CREDIT_WIZARD_LOG_FILE", "wizard.log"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://risk.example.com/api");
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("wizard.log")));
    }

    #[test]
    fn rejects_bad_urls() {
        let err = AppConfig::from_lookup(lookup(&[("CREDIT_API_BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        let err = config.with_base_url(Some("ftp://example.com")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn cli_override_wins() {
        let config = AppConfig::from_lookup(lookup(&[]))
            .unwrap()
            .with_base_url(Some("http://10.0.0.5:9000"))
            .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
    }
}
