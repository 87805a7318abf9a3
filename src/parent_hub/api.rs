//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for directory operations, whatever UI sits on top.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Applies configuration** (page size, debounce, worker use) to requests
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints, never formats, and holds no filtering logic of its own.
//!
//! ## Generic Over DataStore
//!
//! `HubApi<S: DataStore>` is generic over where the snapshot comes from:
//! - Production: `HubApi<FileStore>`
//! - Testing: `HubApi<InMemoryStore>`

use crate::commands;
use crate::config::HubConfig;
use crate::error::Result;
use crate::host::HostOptions;
use crate::store::DataStore;
use std::path::{Path, PathBuf};

/// Per-call overrides for `browse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowseOverrides {
    pub limit: Option<usize>,
    pub use_worker: bool,
}

pub struct HubApi<S: DataStore> {
    store: S,
    config: HubConfig,
    config_dir: PathBuf,
}

impl<S: DataStore> HubApi<S> {
    pub fn new(store: S, config: HubConfig, config_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            config_dir,
        }
    }

    pub fn browse(
        &self,
        query: &commands::browse::BrowseQuery,
        overrides: BrowseOverrides,
    ) -> Result<commands::CmdResult> {
        let mut host = HostOptions::from(&self.config);
        if let Some(limit) = overrides.limit {
            host.page_size = limit.max(1);
        }
        let options = commands::browse::BrowseOptions {
            host,
            use_worker: overrides.use_worker || self.config.use_worker,
        };
        commands::browse::run(&self.store, query, options)
    }

    pub fn cities(&self, query: Option<&str>) -> Result<commands::CmdResult> {
        commands::cities::run(&self.store, query)
    }

    pub fn facets(&self) -> Result<commands::CmdResult> {
        commands::facets::run(&self.store)
    }

    pub fn show(&self, id: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.store, id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

pub use crate::commands::browse::BrowseQuery;
pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
