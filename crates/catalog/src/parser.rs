//! Parser for catalog exports.
//!
//! A catalog file is a JSON array of movie documents as exported from the
//! document store:
//!
//! ```json
//! [
//!   {
//!     "_id": "603",
//!     "title": "The Matrix",
//!     "genres": [{ "name": "Action" }, { "name": "Science Fiction" }],
//!     "overview": "Set in the 22nd century...",
//!     "casts": [{ "name": "Keanu Reeves" }]
//!   }
//! ]
//! ```
//!
//! Only the identifier is mandatory. Metadata fields that are missing or have
//! an unexpected shape become empty values instead of failing the snapshot.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Read and parse a catalog file
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    parse_catalog_str(&content, &path.display().to_string())
}

/// Parse catalog JSON held in memory
///
/// `origin` names the content in error messages (usually the file path).
pub fn parse_catalog_str(content: &str, origin: &str) -> Result<Vec<CatalogEntry>> {
    let value: Value = serde_json::from_str(content).map_err(|e| CatalogError::InvalidFormat {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;

    let documents = value.as_array().ok_or_else(|| CatalogError::InvalidFormat {
        origin: origin.to_string(),
        reason: "expected a JSON array of movie documents".to_string(),
    })?;

    documents
        .iter()
        .enumerate()
        .map(|(record, document)| parse_entry(document, record, origin))
        .collect()
}

/// Parse one movie document
pub fn parse_entry(document: &Value, record: usize, origin: &str) -> Result<CatalogEntry> {
    let fields = document.as_object().ok_or_else(|| CatalogError::ParseError {
        origin: origin.to_string(),
        record,
        reason: "movie document is not an object".to_string(),
    })?;

    let id = fields
        .get("_id")
        .or_else(|| fields.get("id"))
        .and_then(extract_id)
        .ok_or_else(|| CatalogError::ParseError {
            origin: origin.to_string(),
            record,
            reason: "Missing movie id".to_string(),
        })?;

    let title = fields
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);

    let overview = match fields.get("overview") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => {
            warn!(movie_id = %id, "Ignoring non-text overview: {}", other);
            String::new()
        }
    };

    let entry = CatalogEntry {
        genres: extract_names(&id, "genres", fields.get("genres")),
        cast: extract_names(&id, "casts", cast_field(fields)),
        id,
        title,
        overview,
    };

    Ok(entry)
}

/// The store calls the field `casts`; plain `cast` is accepted too
fn cast_field(fields: &Map<String, Value>) -> Option<&Value> {
    fields.get("casts").or_else(|| fields.get("cast"))
}

/// Extract a movie id
///
/// Ids are opaque: a usable id is returned exactly as stored. Blank ids are
/// rejected.
///
/// Example: `"603"` -> `Some("603")`
///          `603` -> `Some("603")`
///          `{"$oid": "5f1d..."}` -> `Some("5f1d...")`
fn extract_id(value: &Value) -> Option<MovieId> {
    let id = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => map.get("$oid")?.as_str()?.to_string(),
        _ => return None,
    };

    if id.trim().is_empty() { None } else { Some(id) }
}

/// Extract names from a list of `{ "name": ... }` objects or plain strings
///
/// Anything that isn't an array yields no names; elements without a name
/// are skipped.
fn extract_names(id: &str, field: &str, value: Option<&Value>) -> Vec<String> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(movie_id = %id, "Ignoring malformed {} field: {}", field, other);
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name.as_str()),
            Value::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id(&json!("603")), Some("603".to_string()));
        assert_eq!(extract_id(&json!(603)), Some("603".to_string()));
        assert_eq!(
            extract_id(&json!({ "$oid": "5f1d7f3e" })),
            Some("5f1d7f3e".to_string())
        );
        assert_eq!(extract_id(&json!("  ")), None);
        assert_eq!(extract_id(&json!("")), None);
        assert_eq!(extract_id(&json!(null)), None);
        assert_eq!(extract_id(&json!(["603"])), None);
    }

    #[test]
    fn test_padded_id_is_kept_as_stored() {
        assert_eq!(extract_id(&json!(" 42 ")), Some(" 42 ".to_string()));
        assert_eq!(
            extract_id(&json!({ "$oid": " 5f1d " })),
            Some(" 5f1d ".to_string())
        );

        let entries = parse_catalog_str(r#"[{ "_id": " 42 " }]"#, "test").unwrap();
        assert_eq!(entries[0].id, " 42 ");
    }

    #[test]
    fn test_parse_store_document() {
        let document = json!({
            "_id": "603",
            "title": "The Matrix",
            "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }],
            "overview": "A hacker learns the truth.",
            "casts": [{ "name": "Keanu Reeves", "character": "Neo" }],
            "vote_average": 8.2
        });

        let entry = parse_entry(&document, 0, "test").unwrap();
        assert_eq!(entry.id, "603");
        assert_eq!(entry.title.as_deref(), Some("The Matrix"));
        assert_eq!(entry.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(entry.overview, "A hacker learns the truth.");
        assert_eq!(entry.cast, vec!["Keanu Reeves"]);
    }

    #[test]
    fn test_missing_metadata_degrades_to_empty() {
        let entry = parse_entry(&json!({ "id": 7 }), 0, "test").unwrap();
        assert_eq!(entry.id, "7");
        assert!(entry.title.is_none());
        assert!(entry.genres.is_empty());
        assert!(entry.overview.is_empty());
        assert!(entry.cast.is_empty());
    }

    #[test]
    fn test_malformed_metadata_degrades_to_empty() {
        let document = json!({
            "_id": "1",
            "genres": "Action",
            "overview": 42,
            "cast": ["Plain Name", { "character": "no name" }, 5]
        });

        let entry = parse_entry(&document, 0, "test").unwrap();
        assert!(entry.genres.is_empty());
        assert!(entry.overview.is_empty());
        assert_eq!(entry.cast, vec!["Plain Name"]);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let err = parse_entry(&json!({ "title": "Nameless" }), 3, "movies.json").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { record: 3, .. }));
    }

    #[test]
    fn test_catalog_must_be_an_array() {
        let err = parse_catalog_str(r#"{ "_id": "1" }"#, "test").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat { .. }));

        let err = parse_catalog_str("not json", "test").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat { .. }));
    }

    #[test]
    fn test_parse_catalog_preserves_order() {
        let content = r#"[{ "_id": "b" }, { "_id": "a" }, { "_id": "c" }]"#;
        let entries = parse_catalog_str(content, "test").unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_catalog_missing_file() {
        let err = parse_catalog(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
