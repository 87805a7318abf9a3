use crate::api::HubApi;
use crate::config::HubConfig;
use crate::error::{HubError, Result};
use crate::store::fs::{FileStore, DEFAULT_DATA_FILE};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable that replaces the per-user config directory.
pub const HOME_ENV: &str = "PARENT_HUB_HOME";

pub struct HubContext {
    pub api: HubApi<FileStore>,
    pub config: HubConfig,
}

/// `$PARENT_HUB_HOME` when set, else the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    ProjectDirs::from("org", "ohioparenthub", "parent-hub")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            HubError::Store(format!(
                "Could not determine a config directory; set {}",
                HOME_ENV
            ))
        })
}

/// Snapshot location: the explicit flag, then the configured file, then
/// `data/daycares.json` under `cwd`. Relative paths resolve against `cwd`.
pub fn resolve_data_file(cwd: &Path, flag: Option<&Path>, config: &HubConfig) -> PathBuf {
    let chosen = flag
        .map(Path::to_path_buf)
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    if chosen.is_absolute() {
        chosen
    } else {
        cwd.join(chosen)
    }
}

pub fn initialize(cwd: &Path, data_flag: Option<&Path>) -> Result<HubContext> {
    let config_dir = config_dir()?;
    let config = match HubConfig::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring unreadable config in {}: {}", config_dir.display(), e);
            HubConfig::default()
        }
    };

    let data_file = resolve_data_file(cwd, data_flag, &config);
    log::debug!("using snapshot {}", data_file.display());

    let api = HubApi::new(FileStore::new(data_file), config.clone(), config_dir);
    Ok(HubContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_config() {
        let config = HubConfig {
            data_file: Some(PathBuf::from("/srv/configured.json")),
            ..HubConfig::default()
        };
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_data_file(cwd, Some(Path::new("flag.json")), &config),
            PathBuf::from("/work/flag.json")
        );
        assert_eq!(
            resolve_data_file(cwd, None, &config),
            PathBuf::from("/srv/configured.json")
        );
    }

    #[test]
    fn falls_back_to_bundled_location() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_data_file(cwd, None, &HubConfig::default()),
            PathBuf::from("/work/data/daycares.json")
        );
    }
}
