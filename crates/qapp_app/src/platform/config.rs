use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use qapp_engine::ApiSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "qapp.ron";

/// Settings read from `qapp.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QappConfig {
    pub api_base: String,
    pub poll_interval_ms: u64,
    /// Host bridge endpoint. Without one, identity lookups fail and the
    /// label shows the error text.
    pub bridge_url: Option<String>,
    /// Host theme variables served by the static theme source.
    pub theme: BTreeMap<String, String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_content_bytes: u64,
    pub popout_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for QappConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base: api.base_url,
            poll_interval_ms: 3_000,
            bridge_url: None,
            theme: BTreeMap::new(),
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_content_bytes: api.max_content_bytes,
            popout_dir: PathBuf::from("popouts"),
            log_destination: LogDestination::default(),
        }
    }
}

impl QappConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_content_bytes: self.max_content_bytes,
            ..ApiSettings::default()
        }
    }

    /// Zero is clamped to one millisecond.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads the config at `path`. A missing file yields the defaults; any other
/// failure is returned so the caller can log it once logging is up.
pub fn load_config(path: &Path) -> Result<QappConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(QappConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
