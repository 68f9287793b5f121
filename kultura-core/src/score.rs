//! Score values carried by catalog entities.

use core::fmt;

/// Sentinel used by the raw catalogs to mark an unavailable score.
pub const SENTINEL: i32 = -1;

/// A single cultural-dimension score for one entity.
///
/// The raw catalogs overload `-1` to mean "not measured". Inside the library
/// that state is a distinct variant, so a legitimate negative score could
/// never be mistaken for absence.
///
/// # Examples
/// ```
/// use kultura_core::Score;
///
/// assert_eq!(Score::from_sentinel(42), Score::Present(42));
/// assert_eq!(Score::from_sentinel(-1), Score::Missing);
/// assert!(Score::Missing.is_missing());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Score {
    /// A measured score.
    Present(i32),
    /// No measurement available for this entity and dimension.
    Missing,
}

impl Score {
    /// Interprets a raw catalog value, mapping the `-1` sentinel to
    /// [`Score::Missing`].
    #[must_use]
    pub const fn from_sentinel(raw: i32) -> Self {
        if raw == SENTINEL {
            Self::Missing
        } else {
            Self::Present(raw)
        }
    }

    /// Returns the measured value, or `None` when missing.
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Returns whether this score is missing.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(f, "{value}"),
            Self::Missing => f.write_str("n/a"),
        }
    }
}
