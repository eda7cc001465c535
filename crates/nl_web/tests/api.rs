use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use nl_core::{
    Error, FeedEntry, FeedSource, ImageFetcher, InferenceModel, NewsletterBuilder, NewsletterStore,
    OutputLayout, Result, FALLBACK_TEXT,
};
use nl_storage::{FileStore, MemoryStore};
use nl_web::{create_app, AppState};
use serde_json::Value;
use tempfile::tempdir;
use tower::ServiceExt;

struct StaticFeed(Vec<FeedEntry>);

#[async_trait]
impl FeedSource for StaticFeed {
    fn source_url(&self) -> &str {
        "memory://feed"
    }

    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        Ok(self.0.clone())
    }
}

struct DownFeed;

#[async_trait]
impl FeedSource for DownFeed {
    fn source_url(&self) -> &str {
        "memory://down"
    }

    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        Err(Error::Feed("feed host unreachable".to_string()))
    }
}

struct NoImages;

#[async_trait]
impl ImageFetcher for NoImages {
    async fn fetch_image(&self, _article_url: &str, _title: &str) -> Result<PathBuf> {
        Err(Error::Scraping("no image".to_string()))
    }
}

#[derive(Debug)]
struct FailingModel;

#[async_trait]
impl InferenceModel for FailingModel {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(Error::Inference("quota exceeded".to_string()))
    }
}

struct ReadOnlyStore;

#[async_trait]
impl NewsletterStore for ReadOnlyStore {
    async fn save(&self, _content: &str) -> Result<()> {
        Err(Error::Storage("disk full".to_string()))
    }

    async fn load(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn location(&self) -> String {
        "readonly://".to_string()
    }
}

fn scenario_feed() -> Arc<dyn FeedSource> {
    Arc::new(StaticFeed(vec![FeedEntry::new("Test & <Title>", "", "http://example.com/a")]))
}

fn app(feed: Arc<dyn FeedSource>, store: Arc<dyn NewsletterStore>) -> Router {
    let builder = NewsletterBuilder::new(
        feed,
        Arc::new(NoImages),
        Arc::new(FailingModel),
        OutputLayout::new("newsletter_output"),
    );
    create_app(AppState::new(Arc::new(builder), store))
}

fn post_generate() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-newsletter")
        .body(Body::empty())
        .unwrap()
}

fn get_download() -> Request<Body> {
    Request::builder()
        .uri("/download-newsletter")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_download_before_generation_is_not_found() {
    let response = app(scenario_feed(), Arc::new(MemoryStore::new()))
        .oneshot(get_download())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Newsletter not found");
}

#[tokio::test]
async fn test_generate_then_download() {
    let temp_dir = tempdir().unwrap();
    let layout = OutputLayout::new(temp_dir.path().join("newsletter_output"));
    let store = Arc::new(FileStore::new(layout.clone()).unwrap());
    let app = app(scenario_feed(), store);

    let response = app.clone().oneshot(post_generate()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Newsletter generated successfully");

    let response = app.oneshot(get_download()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("newsletter.md"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), std::fs::read(layout.newsletter_path()).unwrap().as_slice());

    let content = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(content.contains("## Test & <Title>"));
    assert!(content.contains(FALLBACK_TEXT));
    assert!(content.contains("[Read more](http://example.com/a)"));
    assert!(!content.contains("!["));
}

#[tokio::test]
async fn test_feed_failure_reports_error_text() {
    let response = app(Arc::new(DownFeed), Arc::new(MemoryStore::new()))
        .oneshot(post_generate())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("feed host unreachable"));
}

#[tokio::test]
async fn test_save_failure_is_reported_distinctly() {
    let response = app(scenario_feed(), Arc::new(ReadOnlyStore))
        .oneshot(post_generate())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "Failed to save the newsletter");
}

#[tokio::test]
async fn test_unknown_route() {
    let response = app(scenario_feed(), Arc::new(MemoryStore::new()))
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_requires_post() {
    let response = app(scenario_feed(), Arc::new(MemoryStore::new()))
        .oneshot(
            Request::builder()
                .uri("/generate-newsletter")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
