//! Named entities and their cultural-dimension scores.

use std::collections::BTreeMap;

use crate::score::Score;

/// A named unit of comparison: a country, or a country variant.
///
/// Scores are keyed by dimension name; iteration order over dimensions is
/// lexicographic and therefore deterministic. Entities are built once, at
/// catalog load time, and never mutated afterwards.
///
/// # Examples
/// ```
/// use kultura_core::{Entity, Score};
///
/// let entity = Entity::new("Japan")
///     .with_score("idv", Score::Present(46))
///     .with_score("pdi", Score::Present(54));
/// assert_eq!(entity.name(), "Japan");
/// assert_eq!(entity.score("idv"), Score::Present(46));
/// assert_eq!(entity.score("uai"), Score::Missing);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entity {
    name: String,
    scores: BTreeMap<String, Score>,
}

impl Entity {
    /// Creates an entity with no scores.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    /// Adds or replaces the score for `dimension`.
    #[must_use]
    pub fn with_score(mut self, dimension: impl Into<String>, score: Score) -> Self {
        self.scores.insert(dimension.into(), score);
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the score for `dimension`; absent dimensions read as missing.
    #[must_use]
    pub fn score(&self, dimension: &str) -> Score {
        self.scores
            .get(dimension)
            .copied()
            .unwrap_or(Score::Missing)
    }

    /// Iterates over the dimension names this entity carries, in
    /// lexicographic order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// Iterates over `(dimension, score)` pairs in lexicographic order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, Score)> {
        self.scores
            .iter()
            .map(|(dimension, score)| (dimension.as_str(), *score))
    }
}
