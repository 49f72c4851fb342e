use std::env;

use tracing::warn;
use vital_flow_domain::{ConfigError, LlmConfig};

/// Port used when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 4000;

/// Process-level settings for the HTTP server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port bound on all interfaces
    pub port: u16,

    /// Origins granted CORS access; empty means any origin is reflected
    pub allowed_origins: Vec<String>,

    /// Deployment label, informational only
    pub environment: String,

    /// Upstream provider settings
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").map(|raw| raw.trim().to_string()) {
            Some(raw) if !raw.is_empty() => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            _ => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let environment = lookup("APP_ENV")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "development".to_string());

        let llm = LlmConfig::from_lookup(&lookup)?;

        Ok(Self {
            port,
            allowed_origins,
            environment,
            llm,
        })
    }
}

/// Split a comma separated origin list, dropping blank entries
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("QWEN_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.environment, "development");
        assert_eq!(config.llm.api_key, "sk-test");
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("QWEN_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("QWEN_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_missing_api_key() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "8080")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }
}
