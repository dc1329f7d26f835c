use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog::{CatalogEntry, CatalogError, CatalogStore, InMemoryCatalog};
use server::{AppState, Recommender, create_router};

struct FailingStore;

impl CatalogStore for FailingStore {
    fn name(&self) -> &str {
        "FailingStore"
    }

    fn snapshot(&self) -> catalog::Result<Vec<CatalogEntry>> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }
}

fn scenario_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        CatalogEntry::new("a")
            .with_genres(["Action"])
            .with_overview("A hero fights")
            .with_cast(["X"]),
        CatalogEntry::new("b")
            .with_genres(["Action"])
            .with_overview("A hero fights")
            .with_cast(["X"]),
        CatalogEntry::new("c")
            .with_genres(["Romance"])
            .with_overview("Love story")
            .with_cast(["Y"]),
    ])
}

fn create_test_app(store: Arc<dyn CatalogStore>) -> Router {
    create_router(AppState::new(Recommender::new(store)))
}

async fn post_recommend(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(Arc::new(scenario_catalog()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_personalized_recommendations() {
    let app = create_test_app(Arc::new(scenario_catalog()));
    let (status, body) = post_recommend(app, r#"{"userMovieIds": ["a"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recommendedMovieIds": ["b", "c"] }));
}

#[tokio::test]
async fn test_empty_history_returns_catalog_order() {
    let app = create_test_app(Arc::new(scenario_catalog()));
    let (status, body) = post_recommend(app, r#"{"userMovieIds": []}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendedMovieIds"], json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_missing_or_null_history_is_empty() {
    for payload in ["{}", r#"{"userMovieIds": null}"#] {
        let app = create_test_app(Arc::new(scenario_catalog()));
        let (status, body) = post_recommend(app, payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendedMovieIds"], json!(["a", "b", "c"]));
    }
}

#[tokio::test]
async fn test_empty_catalog() {
    let app = create_test_app(Arc::new(InMemoryCatalog::default()));
    let (status, body) = post_recommend(app, r#"{"userMovieIds": ["x"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendedMovieIds"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app(Arc::new(scenario_catalog()));
    let (status, body) = post_recommend(app, r#"{"userMovieIds": "a"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let app = create_test_app(Arc::new(scenario_catalog()));
    let (status, _) = post_recommend(app, "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    for body in ["[]", r#"["a"]"#, r#""a""#, "null"] {
        let app = create_test_app(Arc::new(scenario_catalog()));
        let (status, response) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(response["error"].is_string());
    }
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let app = create_test_app(Arc::new(FailingStore));
    let (status, body) = post_recommend(app, r#"{"userMovieIds": ["a"]}"#).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
