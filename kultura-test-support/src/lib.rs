//! Shared test fixtures used across kultura crates.

use kultura_core::{Entity, Score};

/// Builds an entity from `(dimension, raw score)` pairs.
///
/// Raw scores go through the sentinel convention, so `-1` yields a missing
/// score.
///
/// # Examples
/// ```
/// use kultura_test_support::entity;
///
/// let germany = entity("Germany", &[("pdi", 35), ("idv", -1)]);
/// assert!(germany.score("idv").is_missing());
/// ```
#[must_use]
pub fn entity(name: &str, scores: &[(&str, i32)]) -> Entity {
    scores.iter().fold(Entity::new(name), |entity, &(dim, raw)| {
        entity.with_score(dim, Score::from_sentinel(raw))
    })
}

/// Three entities forming a right-angled triangle in two complete
/// dimensions. Handy for tests that need known relative distances.
#[must_use]
pub fn trio() -> Vec<Entity> {
    vec![
        entity("A", &[("d1", 0), ("d2", 0)]),
        entity("B", &[("d1", 10), ("d2", 0)]),
        entity("C", &[("d1", 0), ("d2", 10)]),
    ]
}
