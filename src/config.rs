//! Server configuration loaded from a TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// ScyllaDB contact point
    pub node: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            node: "127.0.0.1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TourConfig {
    /// Base endpoint of the national tourism-data API
    pub base_url: String,
    /// Issued service key, passed through on every call
    pub service_key: String,
    /// Client identifier the API requires in its MobileApp parameter
    pub app_name: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            base_url: "http://apis.data.go.kr/B551011/KorService1".to_string(),
            service_key: String::new(),
            app_name: "Ginkgo".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Generative-text service endpoint
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1/generate".to_string(),
            model: "claude-3-haiku".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config = toml::from_str("[tour]\nservice_key = \"abc\"\n").unwrap();
        assert_eq!(config.tour.service_key, "abc");
        assert_eq!(config.tour.app_name, "Ginkgo");
        assert_eq!(config.store.node, "127.0.0.1");
        assert_eq!(config.narrative.max_tokens, 2000);
    }
}
