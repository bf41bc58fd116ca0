//! Service configuration
//!
//! Read from environment variables at startup. Local development works with
//! no variables set; deployments set keys and tokens via the service
//! environment.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub api_key: String,
    pub model_id: String,
    pub model_version: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub classifier: ClassifierConfig,
    pub weather: WeatherConfig,
    /// JSON knowledge base replacing the embedded one
    pub knowledge_base_path: Option<PathBuf>,
    /// Bearer token -> caller identity
    pub api_tokens: HashMap<String, String>,
    pub enable_debug_routes: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(p) => p.parse().with_context(|| format!("Invalid PORT: {}", p))?,
            None => 3000,
        };

        let classifier = ClassifierConfig {
            base_url: var("ROBOFLOW_API_URL", "https://detect.roboflow.com"),
            api_key: var("ROBOFLOW_API_KEY", ""),
            model_id: var("ROBOFLOW_MODEL_ID", "crop-disease-2rilx"),
            model_version: var("ROBOFLOW_MODEL_VERSION", "4"),
            timeout_secs: parse_secs(&lookup, "CLASSIFIER_TIMEOUT_SECS", 30)?,
        };

        let weather = WeatherConfig {
            base_url: var("WEATHER_API_URL", "http://api.agromonitoring.com/agro/1.0"),
            api_key: var("AGROMONITORING_API_KEY", ""),
            timeout_secs: parse_secs(&lookup, "WEATHER_TIMEOUT_SECS", 15)?,
        };

        let enable_debug_routes = match lookup("ENABLE_DEBUG_ROUTES") {
            Some(v) => parse_bool(&v).with_context(|| format!("Invalid ENABLE_DEBUG_ROUTES: {}", v))?,
            None => false,
        };

        Ok(Self {
            port,
            classifier,
            weather,
            knowledge_base_path: lookup("KNOWLEDGE_BASE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            api_tokens: parse_tokens(&lookup("API_TOKENS").unwrap_or_default()),
            enable_debug_routes,
        })
    }

    /// Log the effective configuration, secrets redacted
    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!(
            "  CLASSIFIER: {}/{}/{} (timeout {}s)",
            self.classifier.base_url,
            self.classifier.model_id,
            self.classifier.model_version,
            self.classifier.timeout_secs
        );
        tracing::info!("  WEATHER: {} (timeout {}s)", self.weather.base_url, self.weather.timeout_secs);
        tracing::info!(
            "  KNOWLEDGE_BASE_PATH: {}",
            self.knowledge_base_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<embedded>".to_string())
        );
        tracing::info!("  API_TOKENS: {} configured", self.api_tokens.len());
        tracing::info!("  ENABLE_DEBUG_ROUTES: {}", self.enable_debug_routes);

        if self.classifier.api_key.is_empty() {
            tracing::warn!("ROBOFLOW_API_KEY is not set; classifier calls will be rejected upstream");
        }
        if self.weather.api_key.is_empty() {
            tracing::warn!("AGROMONITORING_API_KEY is not set; weather calls will be rejected upstream");
        }
        if self.api_tokens.is_empty() {
            tracing::warn!("API_TOKENS is empty; /analyze will reject every caller");
        }
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v.parse().with_context(|| format!("Invalid {}: {}", key, v)),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

/// Parse `token:identity` pairs separated by commas
fn parse_tokens(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once(':') {
            Some((token, identity)) if !token.trim().is_empty() && !identity.trim().is_empty() => {
                Some((token.trim().to_string(), identity.trim().to_string()))
            }
            _ => {
                tracing::warn!("Ignoring malformed API_TOKENS entry (expected token:identity)");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServiceConfig> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServiceConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.classifier.model_id, "crop-disease-2rilx");
        assert_eq!(config.classifier.model_version, "4");
        assert_eq!(config.classifier.timeout_secs, 30);
        assert_eq!(config.weather.timeout_secs, 15);
        assert!(config.knowledge_base_path.is_none());
        assert!(config.api_tokens.is_empty());
        assert!(!config.enable_debug_routes);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("ROBOFLOW_MODEL_VERSION", "7"),
            ("WEATHER_TIMEOUT_SECS", "5"),
            ("KNOWLEDGE_BASE_PATH", "/etc/crop/kb.json"),
            ("ENABLE_DEBUG_ROUTES", "yes"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.classifier.model_version, "7");
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.knowledge_base_path, Some(PathBuf::from("/etc/crop/kb.json")));
        assert!(config.enable_debug_routes);
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("CLASSIFIER_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config_from(&[("ENABLE_DEBUG_ROUTES", "maybe")]).is_err());
    }

    #[test]
    fn test_parse_tokens() {
        let tokens = parse_tokens("abc:farmer@example.com, def : officer ,broken,:nobody,");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens["abc"], "farmer@example.com");
        assert_eq!(tokens["def"], "officer");
    }
}
