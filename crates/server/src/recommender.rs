//! # Recommender
//!
//! Coordinates one recommendation request:
//! 1. Read a fresh catalog snapshot from the store
//! 2. Rank the catalog against the user's history (TF-IDF + cosine)
//! 3. Attach display metadata and return the top N
//!
//! The store is injected, so tests can run against an in-memory catalog.
//! Nothing is cached between requests; every call refits the vector space.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use catalog::{CatalogEntry, CatalogStore, MovieId};
use pipeline::filters::{AlreadySeenFilter, DistinctFilter};
use pipeline::{DEFAULT_LIMIT, FilterPipeline, RankingSource, UserHistory, rank_catalog};

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    /// Cosine similarity to the user profile; `None` for fallback results
    pub score: Option<f64>,
    pub source: RankingSource,
}

/// Produces recommendations from a catalog store
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn CatalogStore>,
    filter_pipeline: Arc<FilterPipeline>,
    limit: usize,
}

impl Recommender {
    /// Create a recommender reading from `store`, returning up to
    /// [`DEFAULT_LIMIT`] movies per request
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(DistinctFilter)
                .add_filter(AlreadySeenFilter),
        );

        Self {
            store,
            filter_pipeline,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override the number of recommendations per request
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Ranked identifiers for a user who has seen `seen`
    pub fn recommend(&self, seen: &[MovieId]) -> Result<Vec<MovieId>> {
        let recommendations = self.get_recommendations(seen)?;
        Ok(recommendations.into_iter().map(|r| r.movie_id).collect())
    }

    /// Main entry point: ranked recommendations with display metadata
    ///
    /// # Returns
    /// Up to `limit` recommendations, most relevant first. An empty catalog
    /// or a history covering the whole catalog yields an empty list.
    pub fn get_recommendations(&self, seen: &[MovieId]) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let entries = self.load_catalog()?;
        let history = UserHistory::new(seen.iter().cloned());

        let ranking = rank_catalog(&entries, &history, &self.filter_pipeline, self.limit)
            .context("Failed to rank catalog")?;

        let recommendations = ranking
            .movies
            .iter()
            .map(|movie| {
                let entry = &entries[movie.position];
                MovieRecommendation {
                    movie_id: movie.movie_id.clone(),
                    title: entry.display_title().to_string(),
                    genres: entry.genres.clone(),
                    score: movie.score,
                    source: ranking.source,
                }
            })
            .collect::<Vec<_>>();

        info!(
            store = self.store_name(),
            catalog_size = entries.len(),
            history_size = history.len(),
            source = ?ranking.source,
            "Selected {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(recommendations)
    }

    /// Read a fresh snapshot from the store
    fn load_catalog(&self) -> Result<Vec<CatalogEntry>> {
        self.store
            .snapshot()
            .with_context(|| format!("Failed to read catalog from {}", self.store.name()))
    }
}
