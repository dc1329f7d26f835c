//! Filter that keeps one candidate per movie id.
//!
//! A catalog snapshot can contain the same id twice; the first occurrence in
//! catalog order wins.

use crate::traits::Filter;
use crate::types::{ScoredCandidate, UserHistory};
use anyhow::Result;
use std::collections::HashSet;
use tracing::warn;

pub struct DistinctFilter;

impl Filter for DistinctFilter {
    fn name(&self) -> &str {
        "DistinctFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        _history: &UserHistory,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut seen_ids: HashSet<String> = HashSet::with_capacity(candidates.len());
        let filtered: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|candidate| {
                let first = seen_ids.insert(candidate.movie_id.clone());
                if !first {
                    warn!(
                        movie_id = %candidate.movie_id,
                        position = candidate.position,
                        "Dropping duplicate catalog entry"
                    );
                }
                first
            })
            .collect();
        Ok(filtered)
    }
}
