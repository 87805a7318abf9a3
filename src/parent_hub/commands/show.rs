use crate::commands::{load_snapshot, CmdMessage, CmdResult};
use crate::error::{HubError, Result};
use crate::links::detail_url;
use crate::store::DataStore;

/// Look a program up by its program number.
pub fn run<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    let id = id.trim();
    let record = load_snapshot(store)?
        .into_iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| HubError::RecordNotFound(id.to_string()))?;

    let url = detail_url(&record);
    let mut result = CmdResult::default().with_listed_records(vec![record]);
    result.add_message(CmdMessage::info(url));
    Ok(result)
}
