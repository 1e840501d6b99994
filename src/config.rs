use std::time::Duration;

use thiserror::Error;

use crate::search::{SpeciesConfig, DEFAULT_BASE_URL};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_OBJECT_BASE_URL: &str = "memory://objects";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub object_base_url: String,
    pub species: SpeciesConfig,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::info!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("FLOWERBEDS_HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "FLOWERBEDS_HTTP_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let api_key = non_empty("PERENUAL_API_KEY")
            .or_else(|| non_empty("EXPO_PUBLIC_PERENUAL_API_KEY"))
            .unwrap_or_else(|| {
                log::warn!("PERENUAL_API_KEY is not set; species search requests will be rejected upstream");
                String::new()
            });

        Ok(Self {
            bind_addr: non_empty("FLOWERBEDS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            object_base_url: non_empty("FLOWERBEDS_OBJECT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OBJECT_BASE_URL.into()),
            species: SpeciesConfig {
                base_url: non_empty("PERENUAL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.object_base_url, DEFAULT_OBJECT_BASE_URL);
        assert_eq!(cfg.species.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.species.api_key, "");
        assert_eq!(cfg.species.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("FLOWERBEDS_BIND_ADDR", "127.0.0.1:9000"),
            ("PERENUAL_API_KEY", "sk-123"),
            ("PERENUAL_BASE_URL", "http://localhost:4000"),
            ("FLOWERBEDS_HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.species.api_key, "sk-123");
        assert_eq!(cfg.species.base_url, "http://localhost:4000");
        assert_eq!(cfg.species.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_expo_key_fallback() {
        let cfg = config(&[("EXPO_PUBLIC_PERENUAL_API_KEY", "legacy")]).unwrap();
        assert_eq!(cfg.species.api_key, "legacy");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = config(&[("FLOWERBEDS_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("FLOWERBEDS_HTTP_TIMEOUT_SECS"));
    }
}
