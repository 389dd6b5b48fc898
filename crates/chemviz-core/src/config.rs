//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Where the API lives when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded from `config.toml` by the infrastructure
/// layer. Every field has a default so a missing file is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all REST paths are resolved against, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Returns the base URL with any trailing slash stripped, so path
    /// concatenation cannot produce `//`.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ClientConfig =
            toml::from_str("api_base_url = \"https://chemviz.example/api/\"").unwrap();
        assert_eq!(config.base_url(), "https://chemviz.example/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
