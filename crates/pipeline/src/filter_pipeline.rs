//! The FilterPipeline orchestrates multiple filters.
//!
//! Filters are chained with the builder pattern and run in insertion order.

use crate::traits::Filter;
use crate::types::{ScoredCandidate, UserHistory};
use anyhow::Result;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DistinctFilter)
///     .add_filter(AlreadySeenFilter);
///
/// let filtered = pipeline.apply(candidates, &history)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        history: &UserHistory,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, history)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadySeenFilter, DistinctFilter};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let history = UserHistory::new(["1"]);

        let candidates = vec![
            ScoredCandidate::new("1", 0, 0.9),
            ScoredCandidate::new("2", 1, 0.8),
        ];

        let filtered = pipeline.apply(candidates, &history).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filters_run_in_order() {
        let history = UserHistory::new(["1"]);
        let pipeline = FilterPipeline::new()
            .add_filter(DistinctFilter)
            .add_filter(AlreadySeenFilter);

        assert_eq!(
            pipeline.filter_names(),
            vec!["DistinctFilter", "AlreadySeenFilter"]
        );

        let candidates = vec![
            ScoredCandidate::new("1", 0, 0.9),
            ScoredCandidate::new("2", 1, 0.8),
            ScoredCandidate::new("2", 2, 0.7),
        ];

        let filtered = pipeline.apply(candidates, &history).unwrap();
        assert_eq!(filtered, vec![ScoredCandidate::new("2", 1, 0.8)]);
    }
}
