use crate::commands::{load_snapshot, CmdResult};
use crate::error::Result;
use crate::facets::FacetOptions;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let records = load_snapshot(store)?;
    Ok(CmdResult::default().with_facets(FacetOptions::from_records(&records)))
}
