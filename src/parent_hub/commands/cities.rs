use crate::commands::{load_snapshot, CmdResult};
use crate::error::Result;
use crate::facets::{city_index, search_cities};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, query: Option<&str>) -> Result<CmdResult> {
    let records = load_snapshot(store)?;
    let cities = city_index(&records);
    let found = search_cities(&cities, query.unwrap_or(""));
    Ok(CmdResult::default().with_cities(found))
}
