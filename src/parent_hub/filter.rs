//! # Filter Engine
//!
//! A pure function from (rows, criteria) to the ordered subset of rows that
//! satisfy every active facet. Facets combine with AND; the multi-select facets
//! (ratings, program types) are an OR over their selected tokens.
//!
//! Rows are evaluated in input order and the output keeps that order. Checks
//! short-circuit, cheapest first:
//!
//! 1. free text (name, street address or zip, case-insensitive substring)
//! 2. city
//! 3. county
//! 4. PFCC funding
//! 5. SUTQ rating (normalized, see [`crate::model::normalize_rating`])
//! 6. program type
//!
//! There is no error path. A token nobody carries (an unknown rating, a
//! misspelled program type) simply matches nothing for its facet.
//!
//! The engine is generic over [`Filterable`] so the full [`Record`] and the
//! worker's slimmed-down [`crate::worker::WorkerRow`] share one implementation.

use crate::criteria::Criteria;
use crate::model::Record;
use std::collections::BTreeSet;

/// The free-text fields of a row, lowercased once so a search does not
/// allocate per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKey {
    name: String,
    street_address: String,
    zip: String,
}

impl SearchKey {
    pub fn new(name: &str, street_address: &str, zip: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            street_address: street_address.to_lowercase(),
            zip: zip.to_lowercase(),
        }
    }

    /// `query` must already be lowercased.
    pub fn contains(&self, query: &str) -> bool {
        self.name.contains(query)
            || self.street_address.contains(query)
            || self.zip.contains(query)
    }
}

/// The fields the engine reads from a row.
pub trait Filterable {
    fn search_key(&self) -> &SearchKey;
    fn city(&self) -> &str;
    fn county(&self) -> &str;
    fn is_pfcc_funded(&self) -> bool;
    /// Already normalized: unrated rows report [`crate::model::UNRATED`].
    fn rating(&self) -> &str;
    fn program_type(&self) -> &str;
}

impl Filterable for Record {
    fn search_key(&self) -> &SearchKey {
        Record::search_key(self)
    }

    fn city(&self) -> &str {
        Record::city(self)
    }

    fn county(&self) -> &str {
        Record::county(self)
    }

    fn is_pfcc_funded(&self) -> bool {
        Record::is_pfcc_funded(self)
    }

    fn rating(&self) -> &str {
        Record::rating(self)
    }

    fn program_type(&self) -> &str {
        Record::program_type(self)
    }
}

/// A criteria prepared for evaluation: the query is trimmed and lowercased once
/// instead of once per row, and inactive facets are dropped.
#[derive(Debug)]
pub struct Matcher<'c> {
    query: Option<String>,
    city: Option<&'c str>,
    county: Option<&'c str>,
    pfcc_only: bool,
    ratings: Option<&'c BTreeSet<String>>,
    program_types: Option<&'c BTreeSet<String>>,
}

impl<'c> Matcher<'c> {
    pub fn new(criteria: &'c Criteria) -> Self {
        let query = criteria.text_query().trim();
        Self {
            query: (!query.is_empty()).then(|| query.to_lowercase()),
            city: non_empty(criteria.selected_city()),
            county: non_empty(criteria.selected_county()),
            pfcc_only: criteria.pfcc_only(),
            ratings: Some(criteria.selected_ratings()).filter(|s| !s.is_empty()),
            program_types: Some(criteria.selected_program_types()).filter(|s| !s.is_empty()),
        }
    }

    pub fn matches<R: Filterable + ?Sized>(&self, row: &R) -> bool {
        if let Some(query) = &self.query {
            if !row.search_key().contains(query) {
                return false;
            }
        }
        if let Some(city) = self.city {
            if row.city() != city {
                return false;
            }
        }
        if let Some(county) = self.county {
            if row.county() != county {
                return false;
            }
        }
        if self.pfcc_only && !row.is_pfcc_funded() {
            return false;
        }
        if let Some(ratings) = self.ratings {
            if !ratings.contains(row.rating()) {
                return false;
            }
        }
        if let Some(program_types) = self.program_types {
            if !program_types.contains(row.program_type()) {
                return false;
            }
        }
        true
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Positions of the matching rows, ascending.
pub fn matching_indices<R: Filterable>(rows: &[R], criteria: &Criteria) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    rows.iter()
        .enumerate()
        .filter(|(_, row)| matcher.matches(*row))
        .map(|(index, _)| index)
        .collect()
}

/// The matching rows themselves, in input order.
pub fn filter_rows<'a, R: Filterable>(rows: &'a [R], criteria: &Criteria) -> Vec<&'a R> {
    let matcher = Matcher::new(criteria);
    rows.iter().filter(|row| matcher.matches(*row)).collect()
}
