//! Variance-scaled Euclidean distance computation.
//!
//! The engine is a single pure transformation: a collection of scored
//! entities in, a symmetric [`DistanceMatrix`] out. Dimensions with any
//! missing score are excluded outright, and every surviving axis is scaled
//! by its own sample variance so wide axes do not dominate the metric
//! purely because of their range.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument};

use crate::{entity::Entity, error::EngineError, matrix::DistanceMatrix};

/// Computes the pairwise variance-scaled Euclidean distance matrix for
/// `entities`.
///
/// The metric is `sqrt(sum_d (x_i[d] - x_j[d])^2 / var[d])` over the
/// dimensions that carry a score for every entity. A dimension missing a
/// score for even one entity is dropped entirely; there is no imputation.
/// A zero-variance dimension (every entity shares the same value)
/// contributes nothing rather than dividing by zero.
///
/// Entity order is preserved in the matrix, and the result is a pure
/// function of the input: recomputation yields bit-identical output.
///
/// # Errors
/// - [`EngineError::InsufficientEntities`] for fewer than two entities.
/// - [`EngineError::DuplicateEntity`] when two entities share a name.
/// - [`EngineError::NoUsableDimensions`] when no dimension survives the
///   completeness filter.
///
/// # Examples
/// ```
/// use kultura_core::{Entity, Score, scaled_euclidean_matrix};
///
/// let entities = vec![
///     Entity::new("A")
///         .with_score("d1", Score::Present(0))
///         .with_score("d2", Score::Present(0)),
///     Entity::new("B")
///         .with_score("d1", Score::Present(10))
///         .with_score("d2", Score::Present(0)),
///     Entity::new("C")
///         .with_score("d1", Score::Present(0))
///         .with_score("d2", Score::Present(10)),
/// ];
/// let matrix = scaled_euclidean_matrix(&entities)?;
/// assert_eq!(matrix.distance("A", "B")?, matrix.distance("A", "C")?);
/// assert!(matrix.distance("A", "B")? > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(skip(entities), fields(entities = entities.len()))]
pub fn scaled_euclidean_matrix(entities: &[Entity]) -> Result<DistanceMatrix, EngineError> {
    if entities.len() < 2 {
        return Err(EngineError::InsufficientEntities {
            got: entities.len(),
        });
    }
    let mut seen = HashSet::new();
    for entity in entities {
        if !seen.insert(entity.name()) {
            return Err(EngineError::DuplicateEntity {
                name: entity.name().to_owned(),
            });
        }
    }

    let mut dimensions: BTreeSet<&str> = BTreeSet::new();
    for entity in entities {
        dimensions.extend(entity.dimensions());
    }
    let considered = dimensions.len();

    // Completeness filter: keep a column only when every entity scores it.
    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut retained = 0_usize;
    for dimension in dimensions {
        let values: Option<Vec<f64>> = entities
            .iter()
            .map(|entity| entity.score(dimension).value().map(f64::from))
            .collect();
        if let Some(values) = values {
            columns.push(values);
            retained += 1;
        }
    }
    if columns.is_empty() {
        return Err(EngineError::NoUsableDimensions {
            entities: entities.len(),
            considered,
        });
    }
    debug!(
        retained,
        dropped = considered - retained,
        "dimension completeness filter applied"
    );

    let variances: Vec<f64> = columns
        .iter()
        .map(|column| sample_variance(column))
        .collect();

    let len = entities.len();
    let mut values = vec![0.0_f64; len * len];
    for i in 0..len {
        for j in (i + 1)..len {
            let mut sum = 0.0_f64;
            for (column, &variance) in columns.iter().zip(&variances) {
                if variance > 0.0 {
                    let diff = column[i] - column[j];
                    sum += diff * diff / variance;
                }
            }
            let distance = sum.sqrt();
            values[i * len + j] = distance;
            values[j * len + i] = distance;
        }
    }

    let names = entities.iter().map(|entity| entity.name().to_owned()).collect();
    Ok(DistanceMatrix::from_parts(names, values))
}

/// Sample variance with one delta degree of freedom. Callers guarantee at
/// least two values.
fn sample_variance(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / (count - 1.0)
}
