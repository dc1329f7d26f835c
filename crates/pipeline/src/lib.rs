//! Content-based ranking of the movie catalog.
//!
//! This crate provides:
//! - Feature extraction (genres, overview and cast as one document)
//! - A TF-IDF vector space with English stop word removal
//! - User profile derivation and cosine similarity
//! - Filter trait and FilterPipeline for candidate exclusion
//! - Ranking with a catalog-order fallback
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, UserHistory, rank_catalog, DEFAULT_LIMIT};
//! use pipeline::filters::*;
//!
//! let filters = FilterPipeline::new()
//!     .add_filter(DistinctFilter)
//!     .add_filter(AlreadySeenFilter);
//!
//! let history = UserHistory::new(["603", "155"]);
//! let ranking = rank_catalog(&entries, &history, &filters, DEFAULT_LIMIT)?;
//! ```

pub mod types;
pub mod features;
pub mod stopwords;
pub mod tfidf;
pub mod similarity;
pub mod profile;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;

// Re-export main types
pub use features::{FeatureDocument, extract_features};
pub use filter_pipeline::FilterPipeline;
pub use profile::{UserProfile, seen_indices};
pub use ranking::{DEFAULT_LIMIT, RankedMovie, Ranking, RankingSource, rank_catalog};
pub use stopwords::StopWords;
pub use tfidf::{SparseVector, TfidfVectorizer, VectorSpace, VectorizeError};
pub use traits::Filter;
pub use types::{ScoredCandidate, UserHistory};
