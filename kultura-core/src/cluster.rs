//! Medoid-based partitioning of a distance matrix.
//!
//! Centroid-style clustering cannot average positions when only pairwise
//! dissimilarities exist, so the representative of each cluster is the
//! member minimising the total distance to the rest (a medoid). The
//! routine alternates assignment and medoid refresh until stable.

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{error::ClusterError, matrix::DistanceMatrix};

const MAX_ROUNDS: usize = 100;

/// Assignment of every matrix entity to one of `k` clusters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    assignments: Vec<usize>,
    medoids: Vec<usize>,
}

impl Partition {
    /// Cluster index per entity, in matrix order.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Matrix position of each cluster's medoid.
    #[must_use]
    pub fn medoids(&self) -> &[usize] {
        &self.medoids
    }

    /// Number of clusters in the partition.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.medoids.len()
    }

    /// Matrix positions of the entities assigned to `cluster`.
    #[must_use]
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|&(_, &assigned)| assigned == cluster)
            .map(|(position, _)| position)
            .collect()
    }
}

/// Partitions the matrix entities into `k` clusters around medoids.
///
/// The initial medoids are drawn from a generator seeded with `seed`, so
/// the result is deterministic for a given matrix, `k` and seed. Ties in
/// the nearest-medoid assignment resolve to the lowest cluster index.
///
/// # Errors
/// - [`ClusterError::ZeroClusters`] when `k` is zero.
/// - [`ClusterError::TooManyClusters`] when `k` exceeds the entity count.
#[instrument(skip(matrix), fields(entities = matrix.len(), k, seed))]
pub fn k_medoids(matrix: &DistanceMatrix, k: usize, seed: u64) -> Result<Partition, ClusterError> {
    if k == 0 {
        return Err(ClusterError::ZeroClusters);
    }
    let len = matrix.len();
    if k > len {
        return Err(ClusterError::TooManyClusters {
            requested: k,
            items: len,
        });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut medoids: Vec<usize> = (0..len).collect();
    medoids.shuffle(&mut rng);
    medoids.truncate(k);
    medoids.sort_unstable();

    let mut assignments = vec![0_usize; len];
    for round in 0..MAX_ROUNDS {
        assign(matrix, &medoids, &mut assignments);
        let mut changed = false;
        for (cluster, medoid) in medoids.iter_mut().enumerate() {
            let members: Vec<usize> = assignments
                .iter()
                .enumerate()
                .filter(|&(_, &assigned)| assigned == cluster)
                .map(|(position, _)| position)
                .collect();
            if let Some(best) = central_member(matrix, &members)
                && best != *medoid
            {
                *medoid = best;
                changed = true;
            }
        }
        if !changed {
            debug!(rounds = round + 1, "medoid refinement converged");
            break;
        }
    }
    assign(matrix, &medoids, &mut assignments);

    Ok(Partition {
        assignments,
        medoids,
    })
}

fn assign(matrix: &DistanceMatrix, medoids: &[usize], assignments: &mut [usize]) {
    for (position, slot) in assignments.iter_mut().enumerate() {
        let mut best = 0_usize;
        let mut best_distance = f64::INFINITY;
        for (cluster, &medoid) in medoids.iter().enumerate() {
            let distance = matrix.value(position, medoid);
            if distance < best_distance {
                best = cluster;
                best_distance = distance;
            }
        }
        *slot = best;
    }
}

/// The member minimising the total distance to the other members, lowest
/// position winning ties. `None` for an empty member list.
fn central_member(matrix: &DistanceMatrix, members: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &candidate in members {
        let cost: f64 = members
            .iter()
            .map(|&member| matrix.value(candidate, member))
            .sum();
        if best.is_none_or(|(_, lowest)| cost < lowest) {
            best = Some((candidate, cost));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use crate::test_support::entity;
    use rstest::rstest;

    use super::*;
    use crate::engine::scaled_euclidean_matrix;

    fn two_group_matrix() -> DistanceMatrix {
        let entities = vec![
            entity("A", &[("x", 0), ("y", 0)]),
            entity("B", &[("x", 1), ("y", 0)]),
            entity("C", &[("x", 10), ("y", 10)]),
            entity("D", &[("x", 11), ("y", 10)]),
        ];
        scaled_euclidean_matrix(&entities).expect("entities are valid")
    }

    #[rstest]
    fn separates_two_obvious_groups() {
        let matrix = two_group_matrix();
        let partition = k_medoids(&matrix, 2, 42).expect("k is valid");
        let assignments = partition.assignments();
        assert_eq!(assignments.len(), 4);
        assert_eq!(assignments[0], assignments[1], "A and B belong together");
        assert_eq!(assignments[2], assignments[3], "C and D belong together");
        assert_ne!(assignments[0], assignments[2], "the groups must differ");
    }

    #[rstest]
    fn same_seed_reproduces_the_partition() {
        let matrix = two_group_matrix();
        let first = k_medoids(&matrix, 2, 7).expect("k is valid");
        let second = k_medoids(&matrix, 2, 7).expect("k is valid");
        assert_eq!(first, second);
    }

    #[rstest]
    fn members_cover_every_entity_exactly_once() {
        let matrix = two_group_matrix();
        let partition = k_medoids(&matrix, 2, 42).expect("k is valid");
        let mut all: Vec<usize> = (0..partition.cluster_count())
            .flat_map(|cluster| partition.members(cluster))
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[rstest]
    fn zero_clusters_is_an_error() {
        let matrix = two_group_matrix();
        let err = k_medoids(&matrix, 0, 42).expect_err("zero clusters");
        assert!(matches!(err, ClusterError::ZeroClusters));
    }

    #[rstest]
    fn more_clusters_than_entities_is_an_error() {
        let matrix = two_group_matrix();
        let err = k_medoids(&matrix, 5, 42).expect_err("too many clusters");
        assert!(matches!(
            err,
            ClusterError::TooManyClusters {
                requested: 5,
                items: 4
            }
        ));
    }

    #[rstest]
    fn singleton_clusters_are_allowed() {
        let matrix = two_group_matrix();
        let partition = k_medoids(&matrix, 4, 42).expect("k equals entity count");
        let mut assignments = partition.assignments().to_vec();
        assignments.sort_unstable();
        assert_eq!(assignments, vec![0, 1, 2, 3]);
    }
}
