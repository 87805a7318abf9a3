use crate::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGE_SIZE: usize = 50;
const DEFAULT_DEBOUNCE_MS: u64 = 180;
const DEFAULT_WORKER_TIMEOUT_MS: u64 = 3000;

/// Keys accepted by [`HubConfig::get`] and [`HubConfig::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "page-size",
    "search-debounce-ms",
    "worker-timeout-ms",
    "use-worker",
    "data-file",
];

/// Configuration for the directory, stored as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HubConfig {
    /// How many matches the result list shows
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before typed search text is applied
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// How long to wait on the filter worker before filtering inline
    #[serde(default = "default_worker_timeout_ms")]
    pub worker_timeout_ms: u64,

    /// Filter on a background thread
    #[serde(default)]
    pub use_worker: bool,

    /// Directory snapshot to load (JSON array of program records)
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_worker_timeout_ms() -> u64 {
    DEFAULT_WORKER_TIMEOUT_MS
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            worker_timeout_ms: DEFAULT_WORKER_TIMEOUT_MS,
            use_worker: false,
            data_file: None,
        }
    }
}

impl HubConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(HubError::Io)?;
        let config: HubConfig = serde_json::from_str(&content).map_err(HubError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(HubError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(HubError::Serialization)?;
        fs::write(config_path, content).map_err(HubError::Io)?;
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_timeout_ms)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-size" => Some(self.page_size.to_string()),
            "search-debounce-ms" => Some(self.search_debounce_ms.to_string()),
            "worker-timeout-ms" => Some(self.worker_timeout_ms.to_string()),
            "use-worker" => Some(self.use_worker.to_string()),
            "data-file" => Some(
                self.data_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "page-size" => {
                let size: usize = parse_number(key, value)?;
                if size == 0 {
                    return Err("page-size must be at least 1".to_string());
                }
                self.page_size = size;
            }
            "search-debounce-ms" => self.search_debounce_ms = parse_number(key, value)?,
            "worker-timeout-ms" => self.worker_timeout_ms = parse_number(key, value)?,
            "use-worker" => {
                self.use_worker = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("use-worker expects true or false, got {}", other)),
                }
            }
            "data-file" => {
                self.data_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} expects a whole number, got {}", key, value))
}
