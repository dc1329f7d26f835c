//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable filters to be
//! applied to scored candidates before they are ranked.

use crate::types::{ScoredCandidate, UserHistory};
use anyhow::Result;

/// Core trait for filtering scored candidates.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent requests
/// - Filters take ownership of the Vec<ScoredCandidate> and return a filtered Vec
/// - Filters must keep the relative order of the candidates they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `history` - The movies the user has already seen
    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        history: &UserHistory,
    ) -> Result<Vec<ScoredCandidate>>;
}
