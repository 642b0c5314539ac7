use std::{fs, path::PathBuf, time::Duration};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::browser::{BrowserSettings, MOBILE_USER_AGENT, NavigationPolicy};

pub const DEFAULT_TARGET_URL: &str = "https://skin-alyze.vercel.app/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTargetUrl { url: String, source: url::ParseError },
    #[error("Unsupported target URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Watchdog timeout must be greater than zero")]
    ZeroWatchdogTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_url: String,
    pub splash_duration_ms: u64,
    pub watchdog_timeout_secs: u64,
    pub ready_token: String,
    pub user_agent: String,
    pub allowed_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            splash_duration_ms: 2000,
            watchdog_timeout_secs: 15,
            ready_token: webshell_shared::DEFAULT_READY_TOKEN.to_string(),
            user_agent: MOBILE_USER_AGENT.to_string(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl Config {
    fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "webshell")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        tracing::info!("Loading config");
        if let Some(path) = Self::get_config_path() {
            if path.exists() {
                match fs::read(&path) {
                    Ok(content) => match serde_json::from_slice(&content) {
                        Ok(config) => return config,
                        Err(e) => tracing::error!("Failed to parse config file: {}", e),
                    },
                    Err(e) => tracing::error!("Failed to read config file: {}", e),
                }
            }
        }

        tracing::info!("No config file could be loaded, using default config.");
        let default = Self::default();
        if let Err(e) = default.save() {
            tracing::error!("Failed to save default config: {}", e);
        }
        default
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::get_config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(path, content)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.target_url).map_err(|source| ConfigError::InvalidTargetUrl {
            url: self.target_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_owned()));
        }
        if self.watchdog_timeout_secs == 0 {
            return Err(ConfigError::ZeroWatchdogTimeout);
        }
        Ok(())
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_duration_ms)
    }

    pub fn watchdog_timeout(&self) -> Duration {
        Duration::from_secs(self.watchdog_timeout_secs)
    }

    pub fn navigation_policy(&self) -> NavigationPolicy {
        NavigationPolicy::with_allowed_hosts(self.allowed_hosts.iter().cloned())
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings { user_agent: self.user_agent.clone(), ..BrowserSettings::default() }
    }
}
