use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

pub const CONFIG_PATH_VAR: &str = "MENTIONHUB_CONFIG";
pub const API_URL_VAR: &str = "MENTIONHUB_API_URL";
pub const POST_LIMIT_VAR: &str = "MENTIONHUB_POST_LIMIT";
pub const CACHE_PATH_VAR: &str = "MENTIONHUB_CACHE_PATH";

const APP_DIR: &str = "mentionhub";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base location of the external analysis service.
    pub api_base_url: String,
    /// `post_limit` sent with every match request.
    pub post_limit: u32,
    /// No timeout unless set; a hung request is failed by the transport.
    pub request_timeout_secs: Option<u64>,
    /// SQLite file backing the mention cache. `None` means the platform data dir.
    pub cache_path: Option<PathBuf>,
    pub user_agent: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            post_limit: 20,
            request_timeout_secs: None,
            cache_path: None,
            user_agent: format!("mentionhub/{}", env!("CARGO_PKG_VERSION")),
            log_filter: "mentionhub=debug,gui=debug,analysis_client=debug,database=debug"
                .to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file if one exists, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        info!("Using analysis service at {}", config.api_base_url);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_VAR) {
            self.api_base_url = url;
        }
        if let Some(limit) = lookup(POST_LIMIT_VAR) {
            self.post_limit = limit.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: POST_LIMIT_VAR.to_string(),
                value: limit.clone(),
            })?;
        }
        if let Some(path) = lookup(CACHE_PATH_VAR) {
            self.cache_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_base_url".to_string(),
            value: format!("{} ({})", self.api_base_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationFailed {
                reason: format!("api_base_url must be http or https, got {}", url.scheme()),
            });
        }
        if !(1..=100).contains(&self.post_limit) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("post_limit must be between 1 and 100, got {}", self.post_limit),
            });
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                reason: "request_timeout_secs must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    pub fn resolved_cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("mentions.db")
        })
    }
}
