//! # Filter Criteria
//!
//! [`Criteria`] is the filter request: a value object that is never mutated in
//! place. Every modifier consumes or borrows the current value and returns a new
//! one, so a criteria handed to the engine (or to a worker thread) can never
//! change underneath it.
//!
//! An empty string or empty set means "no constraint" for that facet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The independent facets a criteria can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Text,
    City,
    County,
    Pfcc,
    Rating,
    ProgramType,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[
            Facet::Text,
            Facet::City,
            Facet::County,
            Facet::Pfcc,
            Facet::Rating,
            Facet::ProgramType,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(default)]
    text_query: String,
    #[serde(default)]
    selected_city: String,
    #[serde(default)]
    selected_county: String,
    #[serde(default)]
    pfcc_only: bool,
    #[serde(default)]
    selected_ratings: BTreeSet<String>,
    #[serde(default)]
    selected_program_types: BTreeSet<String>,
}

impl Criteria {
    pub fn text_query(&self) -> &str {
        &self.text_query
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    pub fn selected_county(&self) -> &str {
        &self.selected_county
    }

    pub fn pfcc_only(&self) -> bool {
        self.pfcc_only
    }

    pub fn selected_ratings(&self) -> &BTreeSet<String> {
        &self.selected_ratings
    }

    pub fn selected_program_types(&self) -> &BTreeSet<String> {
        &self.selected_program_types
    }

    #[must_use]
    pub fn with_text_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = query.into();
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.selected_city = city.into();
        self
    }

    #[must_use]
    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.selected_county = county.into();
        self
    }

    #[must_use]
    pub fn with_pfcc_only(mut self, pfcc_only: bool) -> Self {
        self.pfcc_only = pfcc_only;
        self
    }

    #[must_use]
    pub fn with_ratings<I, S>(mut self, ratings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_ratings = ratings.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_program_types<I, S>(mut self, program_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_program_types = program_types.into_iter().map(Into::into).collect();
        self
    }

    /// A copy with `rating` added to the selection, or removed if present.
    #[must_use]
    pub fn toggled_rating(&self, rating: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_ratings, rating);
        next
    }

    /// A copy with `program_type` added to the selection, or removed if present.
    #[must_use]
    pub fn toggled_program_type(&self, program_type: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_program_types, program_type);
        next
    }

    pub fn is_active(&self, facet: Facet) -> bool {
        match facet {
            Facet::Text => !self.text_query.trim().is_empty(),
            Facet::City => !self.selected_city.is_empty(),
            Facet::County => !self.selected_county.is_empty(),
            Facet::Pfcc => self.pfcc_only,
            Facet::Rating => !self.selected_ratings.is_empty(),
            Facet::ProgramType => !self.selected_program_types.is_empty(),
        }
    }

    pub fn active_facets(&self) -> Vec<Facet> {
        Facet::all()
            .iter()
            .copied()
            .filter(|f| self.is_active(*f))
            .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_facets().is_empty()
    }

    /// A criteria carrying only `facet`, every other facet unconstrained.
    #[must_use]
    pub fn restricted_to(&self, facet: Facet) -> Self {
        let base = Criteria::default();
        match facet {
            Facet::Text => base.with_text_query(self.text_query.clone()),
            Facet::City => base.with_city(self.selected_city.clone()),
            Facet::County => base.with_county(self.selected_county.clone()),
            Facet::Pfcc => base.with_pfcc_only(self.pfcc_only),
            Facet::Rating => Criteria {
                selected_ratings: self.selected_ratings.clone(),
                ..base
            },
            Facet::ProgramType => Criteria {
                selected_program_types: self.selected_program_types.clone(),
                ..base
            },
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
