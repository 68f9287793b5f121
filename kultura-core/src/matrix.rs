//! Symmetric distance matrices keyed by entity name.

use std::collections::HashMap;

use crate::error::MatrixError;

/// Symmetric pairwise distance matrix with a zero diagonal.
///
/// Row and column order matches the entity order the matrix was built from.
/// Values are stored row-major in one contiguous buffer. The matrix is
/// immutable once computed; consumers only read it.
///
/// # Examples
/// ```
/// use kultura_core::{Entity, Score, scaled_euclidean_matrix};
///
/// let entities = vec![
///     Entity::new("A").with_score("d1", Score::Present(0)),
///     Entity::new("B").with_score("d1", Score::Present(10)),
/// ];
/// let matrix = scaled_euclidean_matrix(&entities)?;
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.distance("A", "B")?, matrix.distance("B", "A")?);
/// assert_eq!(matrix.distance("A", "A")?, 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    names: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), names.len() * names.len());
        let index = names
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        Self {
            names,
            index,
            values,
        }
    }

    /// Returns the number of entities indexed by the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether the matrix indexes no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the entity names in matrix order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the row/column position of `name`, when present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns whether `name` is indexed by the matrix.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the distance between two entities by name.
    ///
    /// # Errors
    /// Returns [`MatrixError::EntityNotFound`] when either name is not
    /// indexed by the matrix.
    pub fn distance(&self, first: &str, second: &str) -> Result<f64, MatrixError> {
        let row = self.require(first)?;
        let column = self.require(second)?;
        Ok(self.values[row * self.names.len() + column])
    }

    /// Returns the distance between two entities by position, or `None`
    /// when either position is out of bounds.
    #[must_use]
    pub fn distance_at(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.len() && column < self.len() {
            Some(self.values[row * self.len() + column])
        } else {
            None
        }
    }

    /// Returns the full distance row for `name`, including the zero
    /// self-distance at the entity's own position.
    ///
    /// # Errors
    /// Returns [`MatrixError::EntityNotFound`] when `name` is not indexed.
    pub fn row(&self, name: &str) -> Result<&[f64], MatrixError> {
        let row = self.require(name)?;
        let len = self.names.len();
        Ok(&self.values[row * len..(row + 1) * len])
    }

    /// Iterates over the unordered off-diagonal pairs `(i, j, distance)`
    /// with `i < j`, in row-major order. This order is the deterministic
    /// tie-break used by the reporting helpers.
    #[must_use]
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            matrix: self,
            row: 0,
            column: 1,
        }
    }

    /// Builds the submatrix restricted to `keep`, in selection order.
    ///
    /// # Errors
    /// Returns [`MatrixError::EntityNotFound`] for an unknown name and
    /// [`MatrixError::DuplicateSelection`] when a name repeats.
    pub fn restrict(&self, keep: &[&str]) -> Result<Self, MatrixError> {
        let mut positions = Vec::with_capacity(keep.len());
        for &name in keep {
            let position = self.require(name)?;
            if positions.contains(&position) {
                return Err(MatrixError::DuplicateSelection {
                    name: name.to_owned(),
                });
            }
            positions.push(position);
        }
        let len = self.names.len();
        let mut values = Vec::with_capacity(positions.len() * positions.len());
        for &row in &positions {
            for &column in &positions {
                values.push(self.values[row * len + column]);
            }
        }
        let names = positions
            .iter()
            .map(|&position| self.names[position].clone())
            .collect();
        Ok(Self::from_parts(names, values))
    }

    /// Positional access for internal consumers that have already bounds
    /// checked their indices.
    pub(crate) fn value(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.names.len() + column]
    }

    fn require(&self, name: &str) -> Result<usize, MatrixError> {
        self.position(name).ok_or_else(|| MatrixError::EntityNotFound {
            name: name.to_owned(),
        })
    }
}

/// Iterator over unordered off-diagonal matrix entries in row-major order.
pub struct Pairs<'a> {
    matrix: &'a DistanceMatrix,
    row: usize,
    column: usize,
}

impl Iterator for Pairs<'_> {
    type Item = (usize, usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.matrix.len();
        while self.row + 1 < len {
            if self.column < len {
                let item = (self.row, self.column, self.matrix.value(self.row, self.column));
                self.column += 1;
                return Some(item);
            }
            self.row += 1;
            self.column = self.row + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn fixture() -> DistanceMatrix {
        // 3x3 symmetric matrix over A, B, C.
        DistanceMatrix::from_parts(
            vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
            vec![0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 2.0, 3.0, 0.0],
        )
    }

    #[rstest]
    fn named_and_positional_access_agree() {
        let matrix = fixture();
        assert_eq!(matrix.distance("A", "C").expect("both names exist"), 2.0);
        assert_eq!(matrix.distance_at(0, 2), Some(2.0));
        assert_eq!(matrix.distance_at(3, 0), None);
    }

    #[rstest]
    fn unknown_name_is_reported() {
        let matrix = fixture();
        let err = matrix
            .distance("A", "Atlantis")
            .expect_err("unknown name must fail");
        assert!(matches!(err, MatrixError::EntityNotFound { name } if name == "Atlantis"));
    }

    #[rstest]
    fn pairs_iterate_in_row_major_order() {
        let matrix = fixture();
        let pairs: Vec<(usize, usize, f64)> = matrix.pairs().collect();
        assert_eq!(pairs, vec![(0, 1, 1.0), (0, 2, 2.0), (1, 2, 3.0)]);
    }

    #[rstest]
    fn restrict_preserves_selection_order() {
        let matrix = fixture();
        let restricted = matrix.restrict(&["C", "A"]).expect("selection is valid");
        assert_eq!(restricted.names(), ["C", "A"]);
        assert_eq!(restricted.distance("C", "A").expect("names kept"), 2.0);
        assert_eq!(restricted.distance_at(0, 0), Some(0.0));
    }

    #[rstest]
    fn restrict_rejects_duplicates() {
        let matrix = fixture();
        let err = matrix
            .restrict(&["A", "A"])
            .expect_err("duplicate selection must fail");
        assert!(matches!(err, MatrixError::DuplicateSelection { name } if name == "A"));
    }

    #[rstest]
    fn row_includes_zero_self_distance() {
        let matrix = fixture();
        let row = matrix.row("B").expect("B exists");
        assert_eq!(row, [1.0, 0.0, 3.0]);
    }
}
