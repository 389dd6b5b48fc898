//! Configuration service implementation.
//!
//! Loads the client configuration from the configuration file
//! (`~/.config/chemviz/config.toml`) and caches it. A missing file yields
//! the defaults; the `CHEMVIZ_API_URL` environment variable overrides the
//! configured base URL either way.

use chemviz_core::config::ClientConfig;
use chemviz_core::{ChemvizError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable that overrides `api_base_url`.
pub const API_URL_ENV: &str = "CHEMVIZ_API_URL";

/// Configuration service that loads and caches the client configuration.
///
/// The configuration is loaded lazily on first access and cached to avoid
/// repeated file I/O.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a new ConfigService reading from the default location.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Creates a ConfigService reading from an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: Some(path),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    ///
    /// Load failures fall back to the defaults; the client must stay usable
    /// with no configuration file at all.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default configuration: {}", e);
            ClientConfig::default()
        });
        let loaded = apply_env_override(loaded, std::env::var(API_URL_ENV).ok());

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let config_path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(ClientConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ChemvizError::config("could not resolve the user config directory"))?;
        Ok(base.join("chemviz").join("config.toml"))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the environment override on top of the loaded configuration.
fn apply_env_override(mut config: ClientConfig, env_url: Option<String>) -> ClientConfig {
    if let Some(url) = env_url
        && !url.is_empty()
    {
        config.api_base_url = url;
    }
    config
}
