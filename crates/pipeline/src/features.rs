//! Feature extraction for catalog entries.
//!
//! Each entry is flattened into a single text blob that the vectorizer can
//! tokenize: genre names, then the overview, then cast names.

use catalog::{CatalogEntry, MovieId};

/// The text representation of one catalog entry.
///
/// The movie id travels with the text so that later stages never rely on
/// two collections staying in lock-step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDocument {
    pub movie_id: MovieId,
    pub text: String,
}

impl FeatureDocument {
    /// Build the document for a single entry.
    ///
    /// Empty genres, overview or cast simply contribute nothing.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let text = format!(
            "{} {} {}",
            entry.genres.join(" "),
            entry.overview,
            entry.cast.join(" ")
        );

        Self {
            movie_id: entry.id.clone(),
            text,
        }
    }
}

/// Extract one feature document per entry, in the same order.
pub fn extract_features(entries: &[CatalogEntry]) -> Vec<FeatureDocument> {
    entries.iter().map(FeatureDocument::from_entry).collect()
}
