use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::models::time_slot::TimeSlot;
use crate::utils::path::{expand_home, sibling_of};

/// Which implementation answers API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Remote,
    Mock,
}

/// Where the "device" location comes from on a terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether the user agreed to share their position
    #[serde(default = "default_allow")]
    pub allow: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_allow() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            allow: default_allow(),
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Token cache; defaults to `tokens.yaml` next to the config file
    #[serde(default)]
    pub token_file: Option<String>,
    #[serde(default)]
    pub default_time_slot: TimeSlot,
    #[serde(default)]
    pub location: LocationConfig,

    /// File this configuration was read from
    #[serde(skip)]
    pub source: PathBuf,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            backend: Backend::default(),
            timeout_secs: default_timeout_secs(),
            token_file: None,
            default_time_slot: TimeSlot::default(),
            location: LocationConfig::default(),
            source: Self::config_file(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ramenlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".ramenlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ramenlog.conf")
    }

    /// Load configuration from `path` (or the standard location), falling
    /// back to defaults when the file does not exist yet.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml::from_str::<Config>(&content).map_err(|e| {
                    AppError::Config(format!("cannot parse {}: {}", path.display(), e))
                })?
            }
        } else {
            Config::default()
        };

        cfg.source = path;
        cfg.check()?;
        Ok(cfg)
    }

    /// Write the configuration back to its source file.
    pub fn save(&self) -> AppResult<()> {
        if let Some(dir) = self.source.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(&self.source)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Resolved path of the token cache.
    pub fn token_path(&self) -> PathBuf {
        match &self.token_file {
            Some(p) => expand_home(p),
            None => sibling_of(&self.source, "tokens.yaml", Self::config_dir()),
        }
    }

    /// Base URL without the trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    fn check(&self) -> AppResult<()> {
        if self.backend == Backend::Remote
            && !(self.api_base_url.starts_with("http://")
                || self.api_base_url.starts_with("https://"))
        {
            return Err(AppError::Config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                self.api_base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
