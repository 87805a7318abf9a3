use crate::commands::{load_snapshot, CmdMessage, CmdResult};
use crate::criteria::Criteria;
use crate::error::Result;
use crate::facets::FacetOptions;
use crate::host::{FilterHost, HostOptions, HostState};
use crate::links::pretty_name;
use crate::model::{Marker, OHIO_CENTER};
use crate::store::DataStore;
use crate::worker::WorkerLink;
use std::time::Instant;

/// Facet values as typed by the user. Locations and program types are matched
/// case-insensitively against the snapshot before filtering.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub pfcc_only: bool,
    pub ratings: Vec<String>,
    pub program_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowseOptions {
    pub host: HostOptions,
    pub use_worker: bool,
}

impl BrowseQuery {
    fn to_criteria(&self, facets: &FacetOptions) -> Criteria {
        let program_types = self.program_types.iter().map(|typed| {
            let known = facets.program_types.iter().map(|c| c.value.as_str());
            canonical(known, typed)
        });

        Criteria::default()
            .with_city(resolve(&facets.cities, self.city.as_deref()))
            .with_county(resolve(&facets.counties, self.county.as_deref()))
            .with_pfcc_only(self.pfcc_only)
            .with_ratings(self.ratings.iter().map(|r| r.trim().to_string()))
            .with_program_types(program_types)
    }
}

fn resolve(known: &[String], typed: Option<&str>) -> String {
    match typed {
        Some(value) => canonical(known.iter().map(String::as_str), value),
        None => String::new(),
    }
}

/// The snapshot's spelling of `typed`, or `typed` itself if nothing matches.
fn canonical<'a>(mut known: impl Iterator<Item = &'a str>, typed: &str) -> String {
    let typed = typed.trim();
    known
        .find(|k| k.eq_ignore_ascii_case(typed))
        .unwrap_or(typed)
        .to_string()
}

pub fn run<S: DataStore>(
    store: &S,
    query: &BrowseQuery,
    options: BrowseOptions,
) -> Result<CmdResult> {
    let mut host = FilterHost::from_load(load_snapshot(store), options.host);

    if let HostState::Unavailable(reason) = host.state() {
        let mut result = CmdResult::default().with_summary(host.summary());
        result.add_message(CmdMessage::error(format!(
            "Program data is unavailable: {}",
            reason
        )));
        return Ok(result);
    }

    if options.use_worker {
        match WorkerLink::spawn() {
            Ok(link) => host.attach_worker(link),
            Err(e) => log::warn!("could not start filter worker, filtering inline: {}", e),
        }
    }

    let facets = host.facet_options();
    let criteria = query.to_criteria(&facets);
    let mut warnings = Vec::new();

    if !criteria.selected_city().is_empty()
        && !facets.cities.iter().any(|c| c == criteria.selected_city())
    {
        warnings.push(CmdMessage::warning(format!(
            "No programs are listed in {}",
            pretty_name(criteria.selected_city())
        )));
    }
    if !criteria.selected_county().is_empty()
        && !facets.counties.iter().any(|c| c == criteria.selected_county())
    {
        warnings.push(CmdMessage::warning(format!(
            "No programs are listed in {} county",
            pretty_name(criteria.selected_county())
        )));
    }

    host.replace_criteria(criteria);
    if let Some(text) = &query.search {
        host.input_text(text.clone(), Instant::now());
        host.flush_text();
    }
    host.wait_for_results();

    let view = host.view();
    let center = view
        .markers
        .first()
        .map(Marker::coordinates)
        .unwrap_or(OHIO_CENTER);
    let mut result = CmdResult::default()
        .with_listed_records(view.display.into_iter().cloned().collect())
        .with_markers(view.markers, center)
        .with_summary(view.summary);
    for warning in warnings {
        result.add_message(warning);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ResultSummary;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn ids(result: &CmdResult) -> Vec<&str> {
        result.listed_records.iter().map(|r| r.id()).collect()
    }

    fn samples() -> InMemoryStore {
        StoreFixture::new().with_samples().store
    }

    #[test]
    fn browse_everything() {
        let result = run(&samples(), &BrowseQuery::default(), BrowseOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["100", "200", "300", "400", "500"]);
        assert_eq!(result.markers.len(), 3);
        assert_eq!(
            result.map_center,
            Some(result.markers[0].coordinates())
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn city_is_matched_case_insensitively() {
        let query = BrowseQuery {
            city: Some("columbus".into()),
            pfcc_only: true,
            ..Default::default()
        };
        let result = run(&samples(), &query, BrowseOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["100"]);
    }

    #[test]
    fn unknown_city_warns_and_matches_nothing() {
        let query = BrowseQuery {
            city: Some("Cleveland".into()),
            ..Default::default()
        };
        let result = run(&samples(), &query, BrowseOptions::default()).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.summary, Some(ResultSummary::NoMatches { total: 5 }));
        assert_eq!(result.map_center, Some(OHIO_CENTER));
        assert!(result.messages[0].content.contains("Cleveland"));
    }

    #[test]
    fn search_and_ratings_combine() {
        let query = BrowseQuery {
            search: Some("432".into()),
            ratings: vec!["0".into(), "3".into()],
            ..Default::default()
        };
        let result = run(&samples(), &query, BrowseOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["100", "200"]);
    }

    #[test]
    fn program_type_is_canonicalized() {
        let query = BrowseQuery {
            program_types: vec!["registered day camp or approved day camp".into()],
            ..Default::default()
        };
        let result = run(&samples(), &query, BrowseOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["500"]);
    }

    #[test]
    fn limit_caps_the_list_only() {
        let options = BrowseOptions {
            host: HostOptions {
                page_size: 2,
                ..HostOptions::default()
            },
            use_worker: false,
        };
        let result = run(&samples(), &BrowseQuery::default(), options).unwrap();
        assert_eq!(result.listed_records.len(), 2);
        assert_eq!(result.markers.len(), 3);
        assert_eq!(
            result.summary,
            Some(ResultSummary::Showing {
                shown: 2,
                matched: 5,
                total: 5
            })
        );
    }

    #[test]
    fn worker_gives_same_answer_as_inline() {
        let query = BrowseQuery {
            county: Some("lucas".into()),
            ..Default::default()
        };
        let inline = run(&samples(), &query, BrowseOptions::default()).unwrap();
        let threaded = run(
            &samples(),
            &query,
            BrowseOptions {
                use_worker: true,
                ..BrowseOptions::default()
            },
        )
        .unwrap();
        assert_eq!(ids(&inline), ids(&threaded));
        assert_eq!(ids(&threaded), vec!["400", "500"]);
    }

    #[test]
    fn unavailable_snapshot_is_reported() {
        let store = InMemoryStore::failing("daycares.json not found");
        let result = run(&store, &BrowseQuery::default(), BrowseOptions::default()).unwrap();
        assert!(result.has_errors());
        assert!(matches!(
            result.summary,
            Some(ResultSummary::Unavailable { .. })
        ));
    }
}
