//! Filter implementations for the candidate pipeline.

pub mod already_seen;
pub mod distinct;

// Re-export for convenience
pub use already_seen::AlreadySeenFilter;
pub use distinct::DistinctFilter;
