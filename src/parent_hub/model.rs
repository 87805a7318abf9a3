use crate::filter::SearchKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Column names used by the licensing export the directory is built from.
pub mod fields {
    pub const ID: &str = "PROGRAM NUMBER";
    pub const NAME: &str = "PROGRAM NAME";
    pub const STREET_ADDRESS: &str = "STREET ADDRESS";
    pub const CITY: &str = "CITY";
    pub const COUNTY: &str = "COUNTY";
    pub const ZIP: &str = "ZIP CODE";
    pub const PFCC: &str = "PFCC";
    pub const RATING: &str = "SUTQ RATING";
    pub const PROGRAM_TYPE: &str = "PROGRAM TYPE";
    pub const LATITUDE: &str = "LAT";
    pub const LONGITUDE: &str = "LNG";
}

/// Rating token for programs without a SUTQ rating.
pub const UNRATED: &str = "0";

/// Rating tokens in display order, best first.
pub const RATING_TOKENS: [&str; 4] = ["3", "2", "1", UNRATED];

pub const PROGRAM_TYPES: [&str; 7] = [
    "Licensed Child Care Center",
    "Licensed School-Age Child Care",
    "Licensed School-Based Preschool",
    "Licensed Type A Family Child Care Home",
    "Licensed Type B Family Child Care Home",
    "Certified In Home Aide",
    "Registered Day Camp or Approved Day Camp",
];

/// Geographic centre of Ohio, used when no marker is available.
pub const OHIO_CENTER: Coordinates = Coordinates {
    latitude: 40.4173,
    longitude: -82.9071,
};

/// One program listing.
///
/// The export is loosely typed, so a record is kept as a flat string map keyed
/// by column name. Numbers and booleans are read as their text form; nulls and
/// nested values are dropped. Accessors return `""` for missing columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Record {
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
    #[serde(skip)]
    search: SearchKey,
}

impl From<Map<String, Value>> for Record {
    fn from(raw: Map<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key, text))
            })
            .collect();
        Self::with_fields(fields)
    }
}

impl Record {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn with_fields(fields: BTreeMap<String, String>) -> Self {
        let mut record = Self {
            fields,
            search: SearchKey::default(),
        };
        record.search = SearchKey::new(record.name(), record.street_address(), record.zip());
        record
    }

    /// Raw column value, `""` when the column is absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn id(&self) -> &str {
        self.get(fields::ID).trim()
    }

    pub fn name(&self) -> &str {
        self.get(fields::NAME).trim()
    }

    pub fn street_address(&self) -> &str {
        self.get(fields::STREET_ADDRESS).trim()
    }

    pub fn zip(&self) -> &str {
        self.get(fields::ZIP).trim()
    }

    /// Lowercased name, address and zip, prepared when the record is built.
    pub fn search_key(&self) -> &SearchKey {
        &self.search
    }

    pub fn city(&self) -> &str {
        self.get(fields::CITY).trim()
    }

    pub fn county(&self) -> &str {
        self.get(fields::COUNTY).trim()
    }

    pub fn program_type(&self) -> &str {
        self.get(fields::PROGRAM_TYPE).trim()
    }

    pub fn is_pfcc_funded(&self) -> bool {
        self.get(fields::PFCC).trim() == "Y"
    }

    /// SUTQ rating with empty or missing values normalized to [`UNRATED`].
    pub fn rating(&self) -> &str {
        normalize_rating(self.get(fields::RATING))
    }

    /// Both coordinates, or `None` when the record was never geocoded.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let latitude = parse_coordinate(self.get(fields::LATITUDE))?;
        let longitude = parse_coordinate(self.get(fields::LONGITUDE))?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }
}

pub fn normalize_rating(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNRATED
    } else {
        trimmed
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A map pin for one matching program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub detail_url: String,
}

impl Marker {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds records column by column.
    #[derive(Default)]
    pub struct RecordBuilder {
        pairs: Vec<(String, String)>,
    }

    impl RecordBuilder {
        pub fn new(id: &str, name: &str) -> Self {
            Self::default().set(fields::ID, id).set(fields::NAME, name)
        }

        pub fn set(mut self, key: &str, value: &str) -> Self {
            self.pairs.push((key.to_string(), value.to_string()));
            self
        }

        pub fn city(self, city: &str) -> Self {
            self.set(fields::CITY, city)
        }

        pub fn county(self, county: &str) -> Self {
            self.set(fields::COUNTY, county)
        }

        pub fn address(self, street: &str, zip: &str) -> Self {
            self.set(fields::STREET_ADDRESS, street).set(fields::ZIP, zip)
        }

        pub fn pfcc(self) -> Self {
            self.set(fields::PFCC, "Y")
        }

        pub fn rating(self, rating: &str) -> Self {
            self.set(fields::RATING, rating)
        }

        pub fn program_type(self, program_type: &str) -> Self {
            self.set(fields::PROGRAM_TYPE, program_type)
        }

        pub fn located(self, latitude: f64, longitude: f64) -> Self {
            self.set(fields::LATITUDE, &latitude.to_string())
                .set(fields::LONGITUDE, &longitude.to_string())
        }

        pub fn build(self) -> Record {
            Record::from_pairs(self.pairs)
        }
    }

    /// Three Columbus programs and two Toledo programs. Only `100` is PFCC
    /// funded; `200` and `500` have no rating.
    pub fn sample_records() -> Vec<Record> {
        vec![
            RecordBuilder::new("100", "Little Stars Academy")
                .city("COLUMBUS")
                .county("FRANKLIN")
                .address("12 High St", "43215")
                .pfcc()
                .rating("3")
                .program_type(PROGRAM_TYPES[0])
                .located(39.96, -83.0)
                .build(),
            RecordBuilder::new("200", "Sunrise Learning")
                .city("COLUMBUS")
                .county("FRANKLIN")
                .address("400 Broad St", "43215")
                .program_type(PROGRAM_TYPES[3])
                .build(),
            RecordBuilder::new("300", "Maple Tree Preschool")
                .city("COLUMBUS")
                .county("FRANKLIN")
                .address("9 Maple Ave", "43220")
                .rating("2")
                .program_type(PROGRAM_TYPES[2])
                .located(40.05, -83.06)
                .build(),
            RecordBuilder::new("400", "Toledo Kids Club")
                .city("TOLEDO")
                .county("LUCAS")
                .address("77 Summit St", "43604")
                .rating("1")
                .program_type(PROGRAM_TYPES[1])
                .located(41.65, -83.54)
                .build(),
            RecordBuilder::new("500", "Harbor Day Camp")
                .city("TOLEDO")
                .county("LUCAS")
                .address("5 Front St", "43605")
                .set(fields::RATING, "")
                .program_type(PROGRAM_TYPES[6])
                .build(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_loosely_typed_json() {
        let json = r#"{
            "PROGRAM NUMBER": 4021,
            "PROGRAM NAME": "Bright Start",
            "CITY": " DAYTON ",
            "PFCC": "Y",
            "SUTQ RATING": null,
            "LAT": 39.75,
            "LNG": "-84.19"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), "4021");
        assert_eq!(record.city(), "DAYTON");
        assert!(record.is_pfcc_funded());
        assert_eq!(record.rating(), UNRATED);
        assert_eq!(
            record.coordinates(),
            Some(Coordinates {
                latitude: 39.75,
                longitude: -84.19
            })
        );
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let record = Record::from_pairs([(fields::NAME, "Only A Name")]);
        assert_eq!(record.program_type(), "");
        assert_eq!(record.county(), "");
        assert!(!record.is_pfcc_funded());
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn pfcc_requires_exact_flag() {
        let yes = Record::from_pairs([(fields::PFCC, "Y")]);
        let no = Record::from_pairs([(fields::PFCC, "N")]);
        let lower = Record::from_pairs([(fields::PFCC, "y")]);
        assert!(yes.is_pfcc_funded());
        assert!(!no.is_pfcc_funded());
        assert!(!lower.is_pfcc_funded());
    }

    #[test]
    fn empty_and_missing_ratings_normalize_to_unrated() {
        let empty = Record::from_pairs([(fields::RATING, "  ")]);
        let missing = Record::default();
        let rated = Record::from_pairs([(fields::RATING, "2")]);
        assert_eq!(empty.rating(), UNRATED);
        assert_eq!(missing.rating(), UNRATED);
        assert_eq!(rated.rating(), "2");
    }

    #[test]
    fn coordinates_need_both_parts() {
        let half = Record::from_pairs([(fields::LATITUDE, "40.1")]);
        let garbage = Record::from_pairs([(fields::LATITUDE, "n/a"), (fields::LONGITUDE, "1")]);
        assert_eq!(half.coordinates(), None);
        assert_eq!(garbage.coordinates(), None);
    }

    #[test]
    fn serializes_back_to_flat_map() {
        let record = Record::from_pairs([(fields::ID, "7"), (fields::CITY, "AKRON")]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["PROGRAM NUMBER"], "7");
        assert_eq!(json["CITY"], "AKRON");
    }
}
