//! User profile derivation.
//!
//! The profile is the plain mean of the vectors of every catalog entry the
//! user has seen. No recency or rating weighting is applied.

use crate::tfidf::{SparseVector, VectorSpace, VectorizeError};
use crate::similarity::cosine_similarity;
use crate::types::UserHistory;

/// The user's aggregate taste in the current vector space.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    vector: Vec<f64>,
    source_count: usize,
}

impl UserProfile {
    /// Mean of the rows at `indices`.
    ///
    /// Returns `None` when no index refers to a row of `space`; the caller
    /// falls back to non-personalized output in that case.
    pub fn from_rows(space: &VectorSpace, indices: &[usize]) -> Option<Self> {
        let mut vector = vec![0.0; space.vocabulary_size()];
        let mut source_count = 0;

        for row in indices.iter().filter_map(|&i| space.row(i)) {
            for (col, weight) in row.vector.iter() {
                vector[col] += weight;
            }
            source_count += 1;
        }

        if source_count == 0 {
            return None;
        }

        for value in &mut vector {
            *value /= source_count as f64;
        }

        Some(Self {
            vector,
            source_count,
        })
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// How many catalog rows were averaged
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    pub fn is_zero(&self) -> bool {
        self.vector.iter().all(|&x| x == 0.0)
    }

    /// Cosine similarity between this profile and a document row
    pub fn similarity(&self, row: &SparseVector) -> Result<f64, VectorizeError> {
        cosine_similarity(&self.vector, row)
    }
}

/// Catalog positions of every row whose movie the user has seen, in catalog order
pub fn seen_indices(space: &VectorSpace, history: &UserHistory) -> Vec<usize> {
    space
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| history.contains(&row.movie_id))
        .map(|(i, _)| i)
        .collect()
}
