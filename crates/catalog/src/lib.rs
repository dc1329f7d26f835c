//! # Catalog Crate
//!
//! This crate gives the recommender read access to the movie catalog.
//!
//! ## Main Components
//!
//! - **types**: `CatalogEntry` and the `MovieId` alias
//! - **parser**: Lenient parsing of document-store exports (JSON)
//! - **store**: The `CatalogStore` trait plus in-memory and JSON-file stores
//! - **error**: Error types for catalog access
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogStore, JsonFileCatalog};
//!
//! let store = JsonFileCatalog::new("data/movies.json");
//! let entries = store.snapshot()?;
//!
//! println!("Catalog holds {} movies", entries.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use store::{CatalogStore, InMemoryCatalog, JsonFileCatalog};
pub use types::{CatalogEntry, MovieId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = InMemoryCatalog::default();
        assert!(store.is_empty());
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_entry_builder() {
        let entry = CatalogEntry::new("1")
            .with_title("Toy Story")
            .with_genres(["Animation", "Comedy"])
            .with_overview("Toys come to life.")
            .with_cast(["Tom Hanks", "Tim Allen"]);

        assert_eq!(entry.id, "1");
        assert_eq!(entry.display_title(), "Toy Story");
        assert_eq!(entry.genres.len(), 2);
        assert_eq!(entry.cast[1], "Tim Allen");
    }

    #[test]
    fn test_display_title_falls_back_to_id() {
        let entry = CatalogEntry::new("tt0133093");
        assert_eq!(entry.display_title(), "tt0133093");
    }

    #[test]
    fn test_load_sample_catalog() {
        // Sample export shipped at the workspace root
        let path = std::path::Path::new("../../data/movies.json");

        if path.exists() {
            let entries = JsonFileCatalog::new(path).snapshot().unwrap();
            assert_eq!(entries.len(), 13);
            assert_eq!(entries[0].id, "603");
            assert_eq!(entries[0].cast[0], "Keanu Reeves");

            let untitled = entries.last().unwrap();
            assert!(untitled.genres.is_empty() && untitled.overview.is_empty());
        }
    }

    #[test]
    fn test_store_as_trait_object() {
        let store: Box<dyn CatalogStore> =
            Box::new(InMemoryCatalog::new(vec![CatalogEntry::new("a")]));

        assert_eq!(store.name(), "InMemoryCatalog");
        assert_eq!(store.snapshot().unwrap()[0].id, "a");
    }
}
