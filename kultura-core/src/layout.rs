//! 2D embedding of a distance matrix by stress majorisation.
//!
//! A SMACOF-style iteration: starting from a seeded random configuration,
//! each step applies the Guttman transform, which never increases the
//! stress between the configuration distances and the matrix
//! dissimilarities. Plotting front ends consume the resulting coordinates.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::matrix::DistanceMatrix;

/// A named 2D position produced by [`mds_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPoint {
    /// Entity name, in matrix order.
    pub name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// Embeds the matrix entities in the plane, preserving pairwise
/// dissimilarities as far as stress majorisation allows.
///
/// Deterministic for a given matrix, iteration count and seed. The output
/// is centred on the origin; orientation is otherwise arbitrary, as with
/// any multidimensional scaling.
#[must_use]
#[instrument(skip(matrix), fields(entities = matrix.len(), iterations, seed))]
pub fn mds_layout(matrix: &DistanceMatrix, iterations: usize, seed: u64) -> Vec<LayoutPoint> {
    let len = matrix.len();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions: Vec<[f64; 2]> = (0..len)
        .map(|_| [rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)])
        .collect();

    for _ in 0..iterations {
        positions = guttman_step(matrix, &positions);
    }
    centre(&mut positions);

    matrix
        .names()
        .iter()
        .zip(positions)
        .map(|(name, [x, y])| LayoutPoint {
            name: name.clone(),
            x,
            y,
        })
        .collect()
}

fn guttman_step(matrix: &DistanceMatrix, positions: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let len = positions.len();
    let mut next = vec![[0.0_f64; 2]; len];
    for (i, slot) in next.iter_mut().enumerate() {
        let mut acc = [0.0_f64; 2];
        for (j, other) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = positions[i][0] - other[0];
            let dy = positions[i][1] - other[1];
            let current = (dx * dx + dy * dy).sqrt();
            // Coincident points pull nowhere.
            if current > f64::EPSILON {
                let ratio = matrix.value(i, j) / current;
                acc[0] += ratio * dx;
                acc[1] += ratio * dy;
            }
        }
        *slot = [acc[0] / len as f64, acc[1] / len as f64];
    }
    next
}

fn centre(positions: &mut [[f64; 2]]) {
    if positions.is_empty() {
        return;
    }
    let len = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p[0]).sum::<f64>() / len;
    let mean_y = positions.iter().map(|p| p[1]).sum::<f64>() / len;
    for position in positions {
        position[0] -= mean_x;
        position[1] -= mean_y;
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::entity;
    use rstest::rstest;

    use super::*;
    use crate::engine::scaled_euclidean_matrix;

    fn pair_matrix() -> DistanceMatrix {
        let entities = vec![
            entity("A", &[("x", 0), ("y", 0)]),
            entity("B", &[("x", 10), ("y", 0)]),
        ];
        scaled_euclidean_matrix(&entities).expect("entities are valid")
    }

    #[rstest]
    fn two_points_recover_their_distance() {
        let matrix = pair_matrix();
        let target = matrix.distance("A", "B").expect("pair exists");
        let points = mds_layout(&matrix, 50, 42);
        assert_eq!(points.len(), 2);
        let dx = points[0].x - points[1].x;
        let dy = points[0].y - points[1].y;
        let embedded = (dx * dx + dy * dy).sqrt();
        assert!(
            (embedded - target).abs() < 1e-9,
            "embedded {embedded} vs target {target}"
        );
    }

    #[rstest]
    fn layout_is_centred_and_named_in_matrix_order() {
        let matrix = pair_matrix();
        let points = mds_layout(&matrix, 50, 42);
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        let mean_x: f64 = points.iter().map(|p| p.x).sum::<f64>() / points.len() as f64;
        let mean_y: f64 = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
        assert!(mean_x.abs() < 1e-12);
        assert!(mean_y.abs() < 1e-12);
    }

    #[rstest]
    fn same_seed_reproduces_the_layout() {
        let matrix = pair_matrix();
        assert_eq!(mds_layout(&matrix, 100, 7), mds_layout(&matrix, 100, 7));
    }
}
