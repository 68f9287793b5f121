//! Bundled cultural-dimension datasets.
//!
//! Two survey-derived score tables ship with the crate: Hofstede's six
//! cultural dimensions and the eight Culture Map scales. [`load`] parses
//! the embedded JSON, validates it, and hands back entities ready for the
//! distance engine. Missing observations arrive as the `-1` sentinel and
//! come out as missing scores.

mod errors;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use kultura_core::{Entity, SENTINEL, Score};
use serde::Deserialize;
use tracing::{debug, instrument};

pub use errors::CatalogError;

const HOFSTEDE_JSON: &str = include_str!("../data/hofstede.json");
const CULTURE_MAP_JSON: &str = include_str!("../data/culture_map.json");

/// The datasets shipped in the catalogue.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dataset {
    /// Hofstede's six-dimension country scores.
    Hofstede,
    /// The eight Culture Map scales.
    CultureMap,
}

impl Dataset {
    /// Human-readable dataset title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hofstede => "Hofstede",
            Self::CultureMap => "Culture Map",
        }
    }

    /// Countries highlighted by default in cluster reports.
    ///
    /// The two datasets spell some of these differently, so each carries
    /// its own list.
    #[must_use]
    pub const fn focus_countries(self) -> &'static [&'static str] {
        match self {
            Self::Hofstede => &[
                "Germany",
                "Great Britain",
                "Indonesia",
                "Ireland",
                "Japan",
                "U.S.A.",
            ],
            Self::CultureMap => &[
                "Germany",
                "UK",
                "Indonesia",
                "Ireland",
                "Japan",
                "United States",
            ],
        }
    }

    const fn payload(self) -> &'static str {
        match self {
            Self::Hofstede => HOFSTEDE_JSON,
            Self::CultureMap => CULTURE_MAP_JSON,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Dataset {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hofstede" => Ok(Self::Hofstede),
            "culture-map" | "culture_map" | "culturemap" => Ok(Self::CultureMap),
            _ => Err(CatalogError::UnknownDataset {
                name: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    name: String,
    scores: BTreeMap<String, i32>,
}

/// Loads and validates a bundled dataset.
///
/// # Errors
///
/// Returns [`CatalogError`] when the embedded payload fails to parse or a
/// record carries an empty name, a duplicate name, or a score below the
/// missing-value sentinel.
///
/// # Examples
/// ```
/// use kultura_catalog::{Dataset, load};
///
/// let entities = load(Dataset::Hofstede)?;
/// assert!(entities.iter().any(|e| e.name() == "Japan"));
/// # Ok::<(), kultura_catalog::CatalogError>(())
/// ```
#[instrument(fields(dataset = %dataset))]
pub fn load(dataset: Dataset) -> Result<Vec<Entity>, CatalogError> {
    let entities = parse_entities(dataset.title(), dataset.payload())?;
    debug!(entities = entities.len(), "dataset loaded");
    Ok(entities)
}

/// Parses and validates one catalog payload.
fn parse_entities(title: &'static str, payload: &str) -> Result<Vec<Entity>, CatalogError> {
    let raw: Vec<RawEntity> =
        serde_json::from_str(payload).map_err(|source| CatalogError::Parse {
            dataset: title,
            source,
        })?;

    let mut seen = HashSet::new();
    let mut entities = Vec::with_capacity(raw.len());
    for record in raw {
        if record.name.is_empty() {
            return Err(CatalogError::EmptyName { dataset: title });
        }
        if !seen.insert(record.name.clone()) {
            return Err(CatalogError::DuplicateName {
                dataset: title,
                name: record.name,
            });
        }
        let mut entity = Entity::new(&record.name);
        for (dimension, value) in record.scores {
            if value < SENTINEL {
                return Err(CatalogError::ScoreOutOfRange {
                    dataset: title,
                    name: record.name,
                    dimension,
                    value,
                });
            }
            entity = entity.with_score(dimension, Score::from_sentinel(value));
        }
        entities.push(entity);
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Dataset::Hofstede, 89)]
    #[case(Dataset::CultureMap, 71)]
    fn datasets_load_with_expected_sizes(#[case] dataset: Dataset, #[case] expected: usize) {
        let entities = load(dataset).expect("bundled data is valid");
        assert_eq!(entities.len(), expected);
    }

    #[rstest]
    fn hofstede_scores_are_complete() {
        let entities = load(Dataset::Hofstede).expect("bundled data is valid");
        for entity in &entities {
            assert!(
                entity.scores().all(|(_, score)| !score.is_missing()),
                "{} has a missing score",
                entity.name()
            );
        }
    }

    #[rstest]
    fn culture_map_marks_absent_persuading_scores() {
        let entities = load(Dataset::CultureMap).expect("bundled data is valid");
        let botswana = entities
            .iter()
            .find(|e| e.name() == "Botswana")
            .expect("Botswana is listed");
        assert!(botswana.score("persuading").is_missing());
        let missing = entities
            .iter()
            .filter(|e| e.score("persuading").is_missing())
            .count();
        assert_eq!(missing, 32);
    }

    #[rstest]
    fn dimension_vocabularies_are_disjoint() {
        let hofstede = load(Dataset::Hofstede).expect("bundled data is valid");
        let culture_map = load(Dataset::CultureMap).expect("bundled data is valid");
        let first: HashSet<&str> = hofstede[0].dimensions().collect();
        assert!(culture_map[0].dimensions().all(|dim| !first.contains(dim)));
    }

    #[rstest]
    #[case(Dataset::Hofstede)]
    #[case(Dataset::CultureMap)]
    fn focus_countries_exist_in_their_dataset(#[case] dataset: Dataset) {
        let entities = load(dataset).expect("bundled data is valid");
        let names: HashSet<&str> = entities.iter().map(Entity::name).collect();
        for country in dataset.focus_countries() {
            assert!(names.contains(country), "{country} not in {dataset}");
        }
    }

    #[rstest]
    #[case("hofstede", Dataset::Hofstede)]
    #[case("Culture-Map", Dataset::CultureMap)]
    #[case("culture_map", Dataset::CultureMap)]
    fn dataset_names_parse(#[case] input: &str, #[case] expected: Dataset) {
        assert_eq!(input.parse::<Dataset>().expect("valid name"), expected);
    }

    #[rstest]
    fn unknown_dataset_names_are_rejected() {
        let err = "globe".parse::<Dataset>().expect_err("must fail");
        assert_eq!(err.code(), "CATALOG_UNKNOWN_DATASET");
    }

    #[rstest]
    #[case::empty_name(
        r#"[{"name": "", "scores": {"d1": 5}}]"#,
        "CATALOG_EMPTY_NAME"
    )]
    #[case::duplicate_name(
        r#"[{"name": "Twin", "scores": {"d1": 1}}, {"name": "Twin", "scores": {"d1": 2}}]"#,
        "CATALOG_DUPLICATE_NAME"
    )]
    #[case::score_below_sentinel(
        r#"[{"name": "X", "scores": {"d1": -2}}]"#,
        "CATALOG_SCORE_OUT_OF_RANGE"
    )]
    #[case::malformed_json(r#"[{"name": "X"#, "CATALOG_PARSE")]
    #[case::wrong_shape(r#"{"name": "X", "scores": {}}"#, "CATALOG_PARSE")]
    fn invalid_payloads_are_rejected(#[case] payload: &str, #[case] code: &str) {
        let err = parse_entities("Test", payload).expect_err("payload must be rejected");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn score_out_of_range_reports_the_offending_record() {
        let payload = r#"[{"name": "X", "scores": {"d1": 3, "d2": -7}}]"#;
        let err = parse_entities("Test", payload).expect_err("payload must be rejected");
        match err {
            CatalogError::ScoreOutOfRange {
                dataset,
                name,
                dimension,
                value,
            } => {
                assert_eq!(dataset, "Test");
                assert_eq!(name, "X");
                assert_eq!(dimension, "d2");
                assert_eq!(value, -7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn sentinel_scores_survive_validation_as_missing() {
        let payload = r#"[{"name": "X", "scores": {"d1": -1, "d2": 0}}]"#;
        let entities = parse_entities("Test", payload).expect("sentinel is a legal value");
        assert!(entities[0].score("d1").is_missing());
        assert!(!entities[0].score("d2").is_missing());
    }
}
