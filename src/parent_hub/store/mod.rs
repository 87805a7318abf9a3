use crate::error::Result;
use crate::model::Record;

pub mod fs;
pub mod memory;

/// Source of the directory snapshot.
/// The snapshot is read-only: it is loaded once per session and never written
/// back, so a store only has to hand over its records.
pub trait DataStore {
    /// Load every record in source order.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Human readable name of the source, for messages and logs.
    fn describe(&self) -> String;
}
