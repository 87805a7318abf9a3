use super::DataStore;
use crate::error::{HubError, Result};
use crate::model::Record;

/// In-memory snapshot for testing and development.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
    failure: Option<String>,
}

impl InMemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// A store whose load always fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

impl DataStore for InMemoryStore {
    fn load_records(&self) -> Result<Vec<Record>> {
        match &self.failure {
            Some(reason) => Err(HubError::DataUnavailable(reason.clone())),
            None => Ok(self.records.clone()),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::fixtures::sample_records;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::default(),
            }
        }

        pub fn with_samples(mut self) -> Self {
            self.store.records.extend(sample_records());
            self
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.store.records.push(record);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_fixture_loads_samples() {
        let fixture = StoreFixture::new().with_samples();
        assert_eq!(fixture.store.load_records().unwrap().len(), 5);
    }

    #[test]
    fn test_failing_store() {
        let store = InMemoryStore::failing("offline");
        assert!(matches!(
            store.load_records(),
            Err(HubError::DataUnavailable(reason)) if reason == "offline"
        ));
    }
}
