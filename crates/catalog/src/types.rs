//! Core domain types for the movie catalog.

use serde::Serialize;

/// Opaque identifier of a movie in the catalog store.
///
/// Identifiers are compared as exact strings; the store decides their shape
/// (document-store object ids, numeric ids rendered as text, ...).
pub type MovieId = String;

/// One movie record as read from the catalog store.
///
/// Every metadata field may be empty. Entries are never mutated once a
/// snapshot has been read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: MovieId,
    /// Display title, not used for recommendations
    pub title: Option<String>,
    /// Genre names, e.g. `["Action", "Science Fiction"]`
    pub genres: Vec<String>,
    /// Free-text synopsis
    pub overview: String,
    /// Names of cast members
    pub cast: Vec<String>,
}

impl CatalogEntry {
    /// Creates an entry with the given id and no metadata
    pub fn new(id: impl Into<MovieId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_cast<I, S>(mut self, cast: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cast = cast.into_iter().map(Into::into).collect();
        self
    }

    /// Title for display, falling back to the id when the store has none
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}
