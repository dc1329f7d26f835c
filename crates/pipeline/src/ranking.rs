//! Ranking of the catalog against a user's history.
//!
//! ## Stages
//! 1. Extract one feature document per catalog entry
//! 2. Fit the TF-IDF space over all documents
//! 3. Derive the user profile from the seen rows
//! 4. Score every row, run the filter pipeline, sort, truncate
//!
//! When no profile can be derived the first `limit` catalog ids are returned
//! in enumeration order instead.

use crate::features::extract_features;
use crate::filter_pipeline::FilterPipeline;
use crate::profile::{UserProfile, seen_indices};
use crate::tfidf::{TfidfVectorizer, VectorSpace};
use crate::types::{ScoredCandidate, UserHistory};
use anyhow::Result;
use catalog::{CatalogEntry, MovieId};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Number of recommendations returned per request unless configured otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// How a ranking was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    /// Ordered by similarity to the user profile
    Personalized,
    /// Catalog order, used when the history matches nothing in the catalog
    Fallback,
}

/// One ranked movie
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    pub movie_id: MovieId,
    /// Position in the catalog snapshot
    pub position: usize,
    /// Similarity to the profile; `None` on the fallback path
    pub score: Option<f64>,
}

/// The outcome of ranking one request
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub source: RankingSource,
    pub movies: Vec<RankedMovie>,
}

impl Ranking {
    fn empty() -> Self {
        Self {
            source: RankingSource::Fallback,
            movies: Vec::new(),
        }
    }

    /// Ranked identifiers, most relevant first
    pub fn movie_ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|m| m.movie_id.clone()).collect()
    }
}

/// Rank `entries` for a user with the given history.
///
/// Never fails on in-algorithm edge cases: an empty catalog gives an empty
/// ranking and a history with no catalog match gives the fallback.
pub fn rank_catalog(
    entries: &[CatalogEntry],
    history: &UserHistory,
    filters: &FilterPipeline,
    limit: usize,
) -> Result<Ranking> {
    if entries.is_empty() || limit == 0 {
        return Ok(Ranking::empty());
    }

    let documents = extract_features(entries);
    let space = TfidfVectorizer::new()
        .with_stop_words_english()
        .fit_transform(&documents)?;
    debug!(
        "Fitted vector space: {} documents, {} terms",
        space.len(),
        space.vocabulary_size()
    );

    let indices = seen_indices(&space, history);
    let Some(profile) = UserProfile::from_rows(&space, &indices) else {
        debug!("No seen movie found in catalog, using catalog order");
        return Ok(Ranking {
            source: RankingSource::Fallback,
            movies: fallback(entries, limit),
        });
    };
    debug!("Built user profile from {} seen movies", profile.source_count());

    let candidates = score_candidates(&space, &profile)?;
    let filtered = filters.apply(candidates, history)?;
    let movies = rank(filtered, limit)
        .into_iter()
        .map(|c| RankedMovie {
            movie_id: c.movie_id,
            position: c.position,
            score: Some(c.score),
        })
        .collect();

    Ok(Ranking {
        source: RankingSource::Personalized,
        movies,
    })
}

/// Score every row of the space against the profile, in catalog order
pub fn score_candidates(space: &VectorSpace, profile: &UserProfile) -> Result<Vec<ScoredCandidate>> {
    space
        .rows()
        .iter()
        .enumerate()
        .map(|(position, row)| -> Result<ScoredCandidate> {
            let score = profile.similarity(&row.vector)?;
            Ok(ScoredCandidate::new(row.movie_id.clone(), position, score))
        })
        .collect()
}

/// Sort by score descending and keep the first `limit`.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(limit);
    candidates
}

/// The first `limit` distinct ids in catalog enumeration order
pub fn fallback(entries: &[CatalogEntry], limit: usize) -> Vec<RankedMovie> {
    let mut taken: HashSet<&str> = HashSet::new();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| taken.insert(entry.id.as_str()))
        .take(limit)
        .map(|(position, entry)| RankedMovie {
            movie_id: entry.id.clone(),
            position,
            score: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadySeenFilter, DistinctFilter};

    fn filters() -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(DistinctFilter)
            .add_filter(AlreadySeenFilter)
    }

    #[test]
    fn test_rank_is_stable() {
        let candidates = vec![
            ScoredCandidate::new("a", 0, 0.2),
            ScoredCandidate::new("b", 1, 0.5),
            ScoredCandidate::new("c", 2, 0.2),
            ScoredCandidate::new("d", 3, 0.5),
        ];

        let ids: Vec<String> = rank(candidates, 10).into_iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_rank_truncates() {
        let candidates = (0..20)
            .map(|i| ScoredCandidate::new(i.to_string(), i, i as f64))
            .collect();
        let ranked = rank(candidates, DEFAULT_LIMIT);
        assert_eq!(ranked.len(), DEFAULT_LIMIT);
        assert_eq!(ranked[0].movie_id, "19");
    }

    #[test]
    fn test_fallback_skips_duplicate_ids() {
        let entries = vec![
            CatalogEntry::new("a"),
            CatalogEntry::new("a"),
            CatalogEntry::new("b"),
        ];
        let ids: Vec<String> = fallback(&entries, 10).into_iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_catalog() {
        let ranking = rank_catalog(&[], &UserHistory::new(["x"]), &filters(), DEFAULT_LIMIT).unwrap();
        assert!(ranking.movies.is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let entries = vec![CatalogEntry::new("a")];
        let ranking = rank_catalog(&entries, &UserHistory::default(), &filters(), 0).unwrap();
        assert!(ranking.movies.is_empty());
    }

    #[test]
    fn test_personalized_ranking_carries_scores() {
        let entries = vec![
            CatalogEntry::new("a").with_overview("robot uprising"),
            CatalogEntry::new("b").with_overview("robot uprising"),
            CatalogEntry::new("c").with_overview("seaside romance"),
        ];

        let ranking =
            rank_catalog(&entries, &UserHistory::new(["a"]), &filters(), DEFAULT_LIMIT).unwrap();

        assert_eq!(ranking.source, RankingSource::Personalized);
        assert_eq!(ranking.movie_ids(), vec!["b", "c"]);
        let top = ranking.movies[0].score.unwrap();
        assert!((top - 1.0).abs() < 1e-9);
        assert_eq!(ranking.movies[1].score, Some(0.0));
    }
}
