//! Types that flow through the ranking stage.

use catalog::MovieId;
use std::collections::HashSet;

/// The movies a user has already seen, as supplied with the request.
///
/// Identifiers that don't exist in the catalog are kept: they never match a
/// candidate, so excluding them is harmless.
#[derive(Debug, Clone, Default)]
pub struct UserHistory {
    seen: HashSet<MovieId>,
}

impl UserHistory {
    /// Create a history from the request's seen identifiers.
    ///
    /// Repeated identifiers are collapsed.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MovieId>,
    {
        Self {
            seen: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// O(1) membership check
    pub fn contains(&self, movie_id: &str) -> bool {
        self.seen.contains(movie_id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// A catalog entry scored against the user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub movie_id: MovieId,
    /// Position of the entry in catalog enumeration order
    pub position: usize,
    /// Cosine similarity to the user profile, in [-1, 1]
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(movie_id: impl Into<MovieId>, position: usize, score: f64) -> Self {
        Self {
            movie_id: movie_id.into(),
            position,
            score,
        }
    }
}
