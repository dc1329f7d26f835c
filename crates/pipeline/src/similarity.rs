//! Cosine similarity between a dense profile and sparse document rows.

use crate::tfidf::{SparseVector, VectorizeError};

/// Cosine of the angle between `dense` and `sparse`.
///
/// Returns 0.0 when either side is the zero vector; a vector with no terms
/// carries no signal. The result is clamped to [-1, 1] to absorb rounding.
pub fn cosine_similarity(dense: &[f64], sparse: &SparseVector) -> Result<f64, VectorizeError> {
    let dot = sparse.dot_dense(dense)?;

    let norm_dense = dense.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_sparse = sparse.norm();

    if norm_dense == 0.0 || norm_sparse == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_dense * norm_sparse)).clamp(-1.0, 1.0))
}
