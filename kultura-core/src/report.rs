//! Lookup and reporting over a completed distance matrix.
//!
//! Every helper treats the matrix as read-only. Extremum ties resolve to
//! the first hit in [`DistanceMatrix::pairs`] order, which is consistent
//! within a run (and, the matrix being deterministic, across runs too).

use crate::{error::MatrixError, matrix::DistanceMatrix};

/// A named pair and the distance between its members.
#[derive(Clone, Debug, PartialEq)]
pub struct PairDistance {
    /// First entity of the pair, in matrix order.
    pub first: String,
    /// Second entity of the pair.
    pub second: String,
    /// Distance between the two.
    pub distance: f64,
}

/// A counterpart entity and the distance to it.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedDistance {
    /// The counterpart's name.
    pub name: String,
    /// Distance to the counterpart.
    pub distance: f64,
}

/// Global extrema and mean over all off-diagonal entries.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixSummary {
    /// The pair achieving the maximum distance.
    pub farthest: PairDistance,
    /// The pair achieving the minimum distance.
    pub closest: PairDistance,
    /// Mean over the off-diagonal entries.
    pub average: f64,
}

/// Farthest and nearest counterparts for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityExtremes {
    /// The entity the extremes belong to.
    pub entity: String,
    /// Counterpart at maximum distance.
    pub farthest: NamedDistance,
    /// Counterpart at minimum distance.
    pub nearest: NamedDistance,
}

/// Five-number summary with mean over a sample of distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distribution {
    /// Smallest value.
    pub min: f64,
    /// First quartile (linearly interpolated).
    pub lower_quartile: f64,
    /// Median (linearly interpolated).
    pub median: f64,
    /// Third quartile (linearly interpolated).
    pub upper_quartile: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

/// Reports the farthest and closest pairs plus the average distance.
///
/// # Errors
/// Returns [`MatrixError::TooSmall`] when the matrix holds fewer than two
/// entities and therefore has no off-diagonal entries.
pub fn summarise(matrix: &DistanceMatrix) -> Result<MatrixSummary, MatrixError> {
    let mut farthest: Option<(usize, usize, f64)> = None;
    let mut closest: Option<(usize, usize, f64)> = None;
    let mut total = 0.0_f64;
    let mut count = 0_usize;
    for (i, j, distance) in matrix.pairs() {
        total += distance;
        count += 1;
        if farthest.is_none_or(|(_, _, best)| distance > best) {
            farthest = Some((i, j, distance));
        }
        if closest.is_none_or(|(_, _, best)| distance < best) {
            closest = Some((i, j, distance));
        }
    }
    let (Some(farthest), Some(closest)) = (farthest, closest) else {
        return Err(MatrixError::TooSmall {
            len: matrix.len(),
            required: 2,
        });
    };
    Ok(MatrixSummary {
        farthest: pair_distance(matrix, farthest),
        closest: pair_distance(matrix, closest),
        average: total / count as f64,
    })
}

/// Reports the farthest and nearest counterparts for `name`.
///
/// # Errors
/// Returns [`MatrixError::EntityNotFound`] for an unknown name and
/// [`MatrixError::TooSmall`] when the matrix holds no counterpart.
pub fn entity_extremes(matrix: &DistanceMatrix, name: &str) -> Result<EntityExtremes, MatrixError> {
    let position = matrix
        .position(name)
        .ok_or_else(|| MatrixError::EntityNotFound {
            name: name.to_owned(),
        })?;
    let row = matrix.row(name)?;
    let mut farthest: Option<(usize, f64)> = None;
    let mut nearest: Option<(usize, f64)> = None;
    for (column, &distance) in row.iter().enumerate() {
        if column == position {
            continue;
        }
        if farthest.is_none_or(|(_, best)| distance > best) {
            farthest = Some((column, distance));
        }
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((column, distance));
        }
    }
    let (Some(farthest), Some(nearest)) = (farthest, nearest) else {
        return Err(MatrixError::TooSmall {
            len: matrix.len(),
            required: 2,
        });
    };
    Ok(EntityExtremes {
        entity: name.to_owned(),
        farthest: named_distance(matrix, farthest),
        nearest: named_distance(matrix, nearest),
    })
}

/// Returns every off-diagonal distance in `name`'s row, in matrix order
/// with the zero self-distance removed.
///
/// # Errors
/// Returns [`MatrixError::EntityNotFound`] for an unknown name.
pub fn entity_distances(matrix: &DistanceMatrix, name: &str) -> Result<Vec<f64>, MatrixError> {
    let position = matrix
        .position(name)
        .ok_or_else(|| MatrixError::EntityNotFound {
            name: name.to_owned(),
        })?;
    let row = matrix.row(name)?;
    Ok(row
        .iter()
        .enumerate()
        .filter(|&(column, _)| column != position)
        .map(|(_, &distance)| distance)
        .collect())
}

/// Collects the distances of every unordered off-diagonal pair.
#[must_use]
pub fn off_diagonal(matrix: &DistanceMatrix) -> Vec<f64> {
    matrix.pairs().map(|(_, _, distance)| distance).collect()
}

/// Summarises a sample of distances, or `None` for an empty sample.
/// Quartiles use linear interpolation between order statistics.
#[must_use]
pub fn distribution(values: &[f64]) -> Option<Distribution> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let quantile = |q: f64| -> f64 {
        let position = q * (sorted.len() - 1) as f64;
        let low = position.floor() as usize;
        let high = position.ceil() as usize;
        let weight = position - low as f64;
        sorted[low] * (1.0 - weight) + sorted[high] * weight
    };
    Some(Distribution {
        min: sorted[0],
        lower_quartile: quantile(0.25),
        median: quantile(0.5),
        upper_quartile: quantile(0.75),
        max: sorted[sorted.len() - 1],
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
    })
}

fn pair_distance(matrix: &DistanceMatrix, (i, j, distance): (usize, usize, f64)) -> PairDistance {
    PairDistance {
        first: matrix.names()[i].clone(),
        second: matrix.names()[j].clone(),
        distance,
    }
}

fn named_distance(matrix: &DistanceMatrix, (column, distance): (usize, f64)) -> NamedDistance {
    NamedDistance {
        name: matrix.names()[column].clone(),
        distance,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::trio;
    use rstest::rstest;

    use super::*;
    use crate::engine::scaled_euclidean_matrix;
    use crate::matrix::DistanceMatrix;

    fn fixture() -> DistanceMatrix {
        DistanceMatrix::from_parts(
            vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
            vec![0.0, 1.0, 4.0, 1.0, 0.0, 2.5, 4.0, 2.5, 0.0],
        )
    }

    #[rstest]
    fn summary_matches_direct_computation() {
        let summary = summarise(&fixture()).expect("fixture has pairs");
        assert_eq!(summary.farthest.first, "A");
        assert_eq!(summary.farthest.second, "C");
        assert_eq!(summary.farthest.distance, 4.0);
        assert_eq!(summary.closest.first, "A");
        assert_eq!(summary.closest.second, "B");
        assert_eq!(summary.closest.distance, 1.0);
        assert!((summary.average - (1.0 + 4.0 + 2.5) / 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn extremum_ties_resolve_to_first_pair_in_row_major_order() {
        // dist(A,B) == dist(A,C) in the trio; the tied minimum must report
        // the (A, B) pair because it comes first.
        let matrix = scaled_euclidean_matrix(&trio()).expect("trio is valid");
        let summary = summarise(&matrix).expect("matrix has pairs");
        assert_eq!(summary.closest.first, "A");
        assert_eq!(summary.closest.second, "B");
        assert_eq!(summary.farthest.first, "B");
        assert_eq!(summary.farthest.second, "C");
    }

    #[rstest]
    fn entity_extremes_skip_the_self_distance() {
        let extremes = entity_extremes(&fixture(), "B").expect("B exists");
        assert_eq!(extremes.entity, "B");
        assert_eq!(extremes.farthest.name, "C");
        assert_eq!(extremes.farthest.distance, 2.5);
        assert_eq!(extremes.nearest.name, "A");
        assert_eq!(extremes.nearest.distance, 1.0);
    }

    #[rstest]
    fn entity_extremes_report_unknown_names() {
        let err = entity_extremes(&fixture(), "Atlantis").expect_err("unknown name");
        assert!(matches!(err, MatrixError::EntityNotFound { name } if name == "Atlantis"));
    }

    #[rstest]
    fn entity_distances_drop_self() {
        let distances = entity_distances(&fixture(), "C").expect("C exists");
        assert_eq!(distances, vec![4.0, 2.5]);
    }

    #[rstest]
    fn off_diagonal_covers_every_unordered_pair() {
        let values = off_diagonal(&fixture());
        assert_eq!(values, vec![1.0, 4.0, 2.5]);
    }

    #[rstest]
    fn distribution_interpolates_quartiles() {
        let summary = distribution(&[4.0, 1.0, 3.0, 2.0]).expect("sample is non-empty");
        assert_eq!(summary.min, 1.0);
        assert!((summary.lower_quartile - 1.75).abs() < 1e-12);
        assert!((summary.median - 2.5).abs() < 1e-12);
        assert!((summary.upper_quartile - 3.25).abs() < 1e-12);
        assert_eq!(summary.max, 4.0);
        assert!((summary.mean - 2.5).abs() < 1e-12);
    }

    #[rstest]
    fn distribution_of_empty_sample_is_none() {
        assert_eq!(distribution(&[]), None);
    }

    #[rstest]
    fn summary_of_single_entity_matrix_is_too_small() {
        let matrix = DistanceMatrix::from_parts(vec!["A".to_owned()], vec![0.0]);
        let err = summarise(&matrix).expect_err("no pairs to summarise");
        assert!(matches!(err, MatrixError::TooSmall { len: 1, required: 2 }));
    }
}
