//! Error types for the kultura core library.
//!
//! Each enum covers one concern and exposes a stable machine-readable
//! `code()` string that the CLI attaches to its diagnostics.

use thiserror::Error;

/// Errors produced by the distance engine.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    /// At least two entities are needed to form a pairwise matrix.
    #[error("at least two entities are required (got {got})")]
    InsufficientEntities {
        /// Number of entities supplied by the caller.
        got: usize,
    },
    /// Two entities shared a display name; names index the matrix, so they
    /// must be unique within one run.
    #[error("duplicate entity name `{name}`")]
    DuplicateEntity {
        /// The colliding display name.
        name: String,
    },
    /// Every dimension had a missing score for at least one entity.
    #[error(
        "no dimension is fully populated across all {entities} entities \
         ({considered} dimensions considered)"
    )]
    NoUsableDimensions {
        /// Number of entities in the collection.
        entities: usize,
        /// Number of dimensions inspected before all were dropped.
        considered: usize,
    },
}

impl EngineError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientEntities { .. } => "ENGINE_INSUFFICIENT_ENTITIES",
            Self::DuplicateEntity { .. } => "ENGINE_DUPLICATE_ENTITY",
            Self::NoUsableDimensions { .. } => "ENGINE_NO_USABLE_DIMENSIONS",
        }
    }
}

/// Errors produced by distance-matrix lookups.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// The requested entity is not indexed by the matrix.
    #[error("entity `{name}` is not present in the matrix")]
    EntityNotFound {
        /// The name that failed to resolve.
        name: String,
    },
    /// An entity was selected more than once for a restriction.
    #[error("entity `{name}` appears more than once in the selection")]
    DuplicateSelection {
        /// The repeated name.
        name: String,
    },
    /// The operation needs more entities than the matrix holds.
    #[error("matrix holds {len} entities but the operation needs at least {required}")]
    TooSmall {
        /// Entities indexed by the matrix.
        len: usize,
        /// Entities the operation requires.
        required: usize,
    },
}

impl MatrixError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EntityNotFound { .. } => "MATRIX_ENTITY_NOT_FOUND",
            Self::DuplicateSelection { .. } => "MATRIX_DUPLICATE_SELECTION",
            Self::TooSmall { .. } => "MATRIX_TOO_SMALL",
        }
    }
}

/// Errors produced by the medoid partitioning routine.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ClusterError {
    /// Cluster count must be at least one.
    #[error("cluster count must be at least 1")]
    ZeroClusters,
    /// More clusters were requested than entities exist.
    #[error("cannot form {requested} clusters from {items} entities")]
    TooManyClusters {
        /// Requested cluster count.
        requested: usize,
        /// Entities available in the matrix.
        items: usize,
    },
}

impl ClusterError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ZeroClusters => "CLUSTER_ZERO_CLUSTERS",
            Self::TooManyClusters { .. } => "CLUSTER_TOO_MANY_CLUSTERS",
        }
    }
}
