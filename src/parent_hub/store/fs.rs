use super::DataStore;
use crate::error::{HubError, Result};
use crate::model::Record;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/daycares.json";

/// Reads the snapshot from a JSON file holding an array of program records.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataStore for FileStore {
    fn load_records(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Err(HubError::DataUnavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }

        let content = fs::read_to_string(&self.path).map_err(HubError::Io)?;
        let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
            HubError::DataUnavailable(format!("{} is not a record list: {}", self.path.display(), e))
        })?;

        log::debug!("read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields;
    use std::path::Path;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("daycares.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(
            temp_dir.path(),
            r#"[
                {"PROGRAM NUMBER": "1", "PROGRAM NAME": "Acorn House", "CITY": "AKRON"},
                {"PROGRAM NUMBER": 2, "PROGRAM NAME": "Birch Room", "SUTQ RATING": ""}
            ]"#,
        );

        let records = FileStore::new(path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city(), "AKRON");
        assert_eq!(records[1].id(), "2");
        assert_eq!(records[1].get(fields::RATING), "");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nope.json"));
        assert!(matches!(
            store.load_records(),
            Err(HubError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_unavailable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), r#"{"not": "a list"}"#);
        let err = FileStore::new(path).load_records().unwrap_err();
        assert!(matches!(err, HubError::DataUnavailable(_)));
        assert!(err.to_string().contains("not a record list"));
    }

    #[test]
    fn test_empty_list_loads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), "[]");
        assert!(FileStore::new(path).load_records().unwrap().is_empty());
    }
}
