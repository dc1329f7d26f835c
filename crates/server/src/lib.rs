//! Server crate for the content-based movie recommender.
//!
//! This crate contains the recommender that ties the catalog store to the
//! ranking pipeline, plus the HTTP API and its configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod recommender;

pub use api::{AppState, RecommendRequest, RecommendResponse, create_router};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use recommender::{MovieRecommendation, Recommender};
