//! Errors raised while loading and validating the bundled datasets.

use thiserror::Error;

/// Failures surfaced by [`crate::load`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The requested dataset name matched nothing in the catalogue.
    #[error("unknown dataset `{name}`")]
    UnknownDataset {
        /// The name that failed to resolve.
        name: String,
    },
    /// The embedded JSON payload failed to deserialize.
    #[error("failed to parse the {dataset} dataset")]
    Parse {
        /// Human-readable dataset title.
        dataset: &'static str,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record carried an empty entity name.
    #[error("the {dataset} dataset contains a record with an empty name")]
    EmptyName {
        /// Human-readable dataset title.
        dataset: &'static str,
    },
    /// Two records shared the same entity name.
    #[error("the {dataset} dataset lists `{name}` more than once")]
    DuplicateName {
        /// Human-readable dataset title.
        dataset: &'static str,
        /// The repeated name.
        name: String,
    },
    /// A raw score fell below the missing-value sentinel.
    #[error(
        "the {dataset} dataset gives `{name}` a {dimension} score of {value}, below the sentinel"
    )]
    ScoreOutOfRange {
        /// Human-readable dataset title.
        dataset: &'static str,
        /// Entity carrying the bad score.
        name: String,
        /// Dimension carrying the bad score.
        dimension: String,
        /// The offending raw value.
        value: i32,
    },
}

impl CatalogError {
    /// Stable machine-readable code for the error variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownDataset { .. } => "CATALOG_UNKNOWN_DATASET",
            Self::Parse { .. } => "CATALOG_PARSE",
            Self::EmptyName { .. } => "CATALOG_EMPTY_NAME",
            Self::DuplicateName { .. } => "CATALOG_DUPLICATE_NAME",
            Self::ScoreOutOfRange { .. } => "CATALOG_SCORE_OUT_OF_RANGE",
        }
    }
}
