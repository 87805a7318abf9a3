use crate::config::HubConfig;
use crate::error::Result;
use crate::facets::{CityEntry, FacetOptions};
use crate::host::ResultSummary;
use crate::model::{Coordinates, Marker, Record};
use crate::store::DataStore;

pub mod browse;
pub mod cities;
pub mod config;
pub mod facets;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_records: Vec<Record>,
    pub markers: Vec<Marker>,
    pub map_center: Option<Coordinates>,
    pub summary: Option<ResultSummary>,
    pub facets: Option<FacetOptions>,
    pub cities: Vec<CityEntry>,
    pub config: Option<HubConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_markers(mut self, markers: Vec<Marker>, center: Coordinates) -> Self {
        self.markers = markers;
        self.map_center = Some(center);
        self
    }

    pub fn with_summary(mut self, summary: ResultSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_facets(mut self, facets: FacetOptions) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_cities(mut self, cities: Vec<CityEntry>) -> Self {
        self.cities = cities;
        self
    }

    pub fn with_config(mut self, config: HubConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Loads the snapshot for commands that cannot do anything without it.
pub(crate) fn load_snapshot<S: DataStore>(store: &S) -> Result<Vec<Record>> {
    let records = store.load_records()?;
    log::info!(
        "loaded {} programs from {}",
        records.len(),
        store.describe()
    );
    Ok(records)
}
