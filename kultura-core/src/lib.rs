//! Kultura core library.
//!
//! Turns collections of scored entities (countries with cultural-dimension
//! scores) into a symmetric variance-scaled Euclidean distance matrix, and
//! offers lookups, medoid partitioning and 2D layout over that matrix. The
//! library performs no I/O; catalogs and rendering live in sibling crates.

mod cluster;
mod engine;
mod entity;
mod error;
mod layout;
mod matrix;
mod report;
mod score;

#[cfg(test)]
pub(crate) mod test_support {
    //! Local mirror of the `kultura-test-support` fixtures. Unit tests cannot
    //! use the external crate: the dev-dependency cycle makes its `Entity` a
    //! different type from the one in this `cfg(test)` build of the library.
    use crate::{entity::Entity, score::Score};

    /// Builds an entity from `(dimension, raw score)` pairs.
    pub(crate) fn entity(name: &str, scores: &[(&str, i32)]) -> Entity {
        scores.iter().fold(Entity::new(name), |entity, &(dim, raw)| {
            entity.with_score(dim, Score::from_sentinel(raw))
        })
    }

    /// Three entities forming a right-angled triangle in two complete
    /// dimensions.
    pub(crate) fn trio() -> Vec<Entity> {
        vec![
            entity("A", &[("d1", 0), ("d2", 0)]),
            entity("B", &[("d1", 10), ("d2", 0)]),
            entity("C", &[("d1", 0), ("d2", 10)]),
        ]
    }
}

pub use crate::{
    cluster::{Partition, k_medoids},
    engine::scaled_euclidean_matrix,
    entity::Entity,
    error::{ClusterError, EngineError, MatrixError},
    layout::{LayoutPoint, mds_layout},
    matrix::{DistanceMatrix, Pairs},
    report::{
        Distribution, EntityExtremes, MatrixSummary, NamedDistance, PairDistance, distribution,
        entity_distances, entity_extremes, off_diagonal, summarise,
    },
    score::{SENTINEL, Score},
};
