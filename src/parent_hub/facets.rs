//! # Facet Options
//!
//! The choices offered next to the result list: which cities and counties
//! exist in the snapshot, and how many programs carry each rating and program
//! type. Counts use the same rating normalization as the filter engine, so the
//! "Not Rated" count always equals what selecting "0" returns.
//!
//! Also home to the alphabetical city index used by the browse-by-city page.

use crate::links::slugify;
use crate::model::{Record, PROGRAM_TYPES, RATING_TOKENS};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub cities: Vec<String>,
    pub counties: Vec<String>,
    /// Every known rating token, best first, including zero counts.
    pub ratings: Vec<FacetCount>,
    /// Known program types in catalogue order, then any unknown labels found
    /// in the data, alphabetically.
    pub program_types: Vec<FacetCount>,
}

impl FacetOptions {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut cities = BTreeSet::new();
        let mut counties = BTreeSet::new();
        let mut ratings: BTreeMap<&str, usize> = BTreeMap::new();
        let mut program_types: BTreeMap<&str, usize> = BTreeMap::new();

        for record in records {
            if !record.city().is_empty() {
                cities.insert(record.city().to_string());
            }
            if !record.county().is_empty() {
                counties.insert(record.county().to_string());
            }
            *ratings.entry(record.rating()).or_default() += 1;
            if !record.program_type().is_empty() {
                *program_types.entry(record.program_type()).or_default() += 1;
            }
        }

        let mut rating_counts: Vec<FacetCount> = RATING_TOKENS
            .iter()
            .map(|token| FacetCount {
                value: token.to_string(),
                count: ratings.remove(token).unwrap_or(0),
            })
            .collect();
        // Tokens outside the scale still get listed so nothing silently vanishes
        rating_counts.extend(ratings.into_iter().map(|(value, count)| FacetCount {
            value: value.to_string(),
            count,
        }));

        let mut type_counts: Vec<FacetCount> = PROGRAM_TYPES
            .iter()
            .map(|label| FacetCount {
                value: label.to_string(),
                count: program_types.remove(label).unwrap_or(0),
            })
            .collect();
        type_counts.extend(program_types.into_iter().map(|(value, count)| FacetCount {
            value: value.to_string(),
            count,
        }));

        Self {
            cities: cities.into_iter().collect(),
            counties: counties.into_iter().collect(),
            ratings: rating_counts,
            program_types: type_counts,
        }
    }

    pub fn rating_count(&self, token: &str) -> usize {
        count_of(&self.ratings, token)
    }

    pub fn program_type_count(&self, label: &str) -> usize {
        count_of(&self.program_types, label)
    }
}

fn count_of(counts: &[FacetCount], value: &str) -> usize {
    counts
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.count)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityEntry {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Every city with its program count, sorted by name.
pub fn city_index<'a, I>(records: I) -> Vec<CityEntry>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        let city = record.city();
        if !city.is_empty() {
            *tally.entry(city).or_default() += 1;
        }
    }

    tally
        .into_iter()
        .map(|(name, count)| CityEntry {
            name: name.to_string(),
            slug: slugify(name),
            count,
        })
        .collect()
}

/// Cities whose name contains `query`, case-insensitively. A blank query keeps
/// everything.
pub fn search_cities(cities: &[CityEntry], query: &str) -> Vec<CityEntry> {
    let query = query.trim().to_lowercase();
    cities
        .iter()
        .filter(|city| query.is_empty() || city.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Groups an already sorted city list by upper-cased first letter.
pub fn group_by_letter(cities: Vec<CityEntry>) -> BTreeMap<char, Vec<CityEntry>> {
    let mut groups: BTreeMap<char, Vec<CityEntry>> = BTreeMap::new();
    for city in cities {
        let Some(first) = city.name.chars().next() else {
            continue;
        };
        let letter = first.to_uppercase().next().unwrap_or(first);
        groups.entry(letter).or_default().push(city);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Criteria;
    use crate::filter::matching_indices;
    use crate::model::fixtures::{sample_records, RecordBuilder};

    #[test]
    fn lists_sorted_unique_locations() {
        let options = FacetOptions::from_records(&sample_records());
        assert_eq!(options.cities, vec!["COLUMBUS", "TOLEDO"]);
        assert_eq!(options.counties, vec!["FRANKLIN", "LUCAS"]);
    }

    #[test]
    fn rating_counts_use_normalized_tokens() {
        let records = sample_records();
        let options = FacetOptions::from_records(&records);

        let values: Vec<&str> = options.ratings.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["3", "2", "1", "0"]);
        assert_eq!(options.rating_count("0"), 2);

        let unrated = Criteria::default().with_ratings(["0"]);
        assert_eq!(
            options.rating_count("0"),
            matching_indices(&records, &unrated).len()
        );
    }

    #[test]
    fn program_types_keep_catalogue_order_and_unknown_labels() {
        let mut records = sample_records();
        records.push(
            RecordBuilder::new("900", "Odd One")
                .program_type("Experimental Forest School")
                .build(),
        );
        let options = FacetOptions::from_records(&records);

        assert_eq!(options.program_types.len(), PROGRAM_TYPES.len() + 1);
        assert_eq!(options.program_types[0].value, PROGRAM_TYPES[0]);
        assert_eq!(options.program_type_count(PROGRAM_TYPES[0]), 1);
        assert_eq!(options.program_type_count(PROGRAM_TYPES[4]), 0);
        assert_eq!(
            options.program_types.last().map(|c| c.value.as_str()),
            Some("Experimental Forest School")
        );
    }

    #[test]
    fn city_index_counts_and_slugs() {
        let mut records = sample_records();
        records.push(RecordBuilder::new("901", "Lakeside").city("NEW ALBANY").build());
        let cities = city_index(&records);

        assert_eq!(
            cities,
            vec![
                CityEntry {
                    name: "COLUMBUS".into(),
                    slug: "columbus".into(),
                    count: 3
                },
                CityEntry {
                    name: "NEW ALBANY".into(),
                    slug: "new-albany".into(),
                    count: 1
                },
                CityEntry {
                    name: "TOLEDO".into(),
                    slug: "toledo".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn city_search_and_grouping() {
        let cities = city_index(&sample_records());

        let found = search_cities(&cities, " tol ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "TOLEDO");
        assert_eq!(search_cities(&cities, "").len(), 2);

        let groups = group_by_letter(cities);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!['C', 'T']);
    }
}
