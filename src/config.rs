use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{GulgleError, GulgleResult};
use crate::services::catalog::{BuiltinSource, CatalogPaths};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub host: HostConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Built-in catalog file; the embedded catalog is used when unset.
    pub builtin_path: Option<String>,
    /// Custom catalog file. The version file is written next to it.
    pub custom_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// How many recently handled URLs the loop guard remembers.
    pub max_tracked_urls: usize,
    /// Ignore navigations that are not `https://`.
    pub require_https: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let custom = dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local").join("share"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("gulgle")
            .join("custom-bangs.json");

        Self {
            builtin_path: None,
            custom_path: custom.to_string_lossy().into_owned(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_tracked_urls: 100,
            require_https: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Resolve the configured paths, expanding `~`.
    pub fn paths(&self) -> CatalogPaths {
        let builtin = match &self.builtin_path {
            Some(path) => BuiltinSource::File(expand(path)),
            None => BuiltinSource::Embedded,
        };
        CatalogPaths::new(builtin, expand(&self.custom_path))
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("gulgle")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`. Unreadable or invalid files fall back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        let mut config = if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!(error = %e, "Failed to parse config");
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Failed to read config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.host.max_tracked_urls = self.host.max_tracked_urls.clamp(1, 10_000);

        if self.logging.level.trim().is_empty() {
            self.logging.level = LoggingConfig::default().level;
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &std::path::Path) -> GulgleResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GulgleError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;

        Ok(())
    }
}
