//! Filter to remove movies the user has already seen.
//!
//! Every identifier in the request history is excluded, whether or not it
//! matched a catalog entry when the profile was built.

use crate::traits::Filter;
use crate::types::{ScoredCandidate, UserHistory};
use anyhow::Result;

/// Removes candidates that appear in the user's history.
///
/// ## Algorithm
/// Uses the HashSet inside UserHistory for O(1) lookups.
pub struct AlreadySeenFilter;

impl Filter for AlreadySeenFilter {
    fn name(&self) -> &str {
        "AlreadySeenFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        history: &UserHistory,
    ) -> Result<Vec<ScoredCandidate>> {
        let filtered: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|candidate| !history.contains(&candidate.movie_id))
            .collect();
        Ok(filtered)
    }
}
