//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use pdview_api::state::AppState;
use pdview_core::config::AppConfig;
use pdview_database::connection::DatabasePool;
use pdview_database::repositories::price::PriceRepository;
use pdview_storage::catalog::VideoCatalog;
use pdview_storage::library::VideoLibrary;
use pdview_storage::local::LocalVideoCatalog;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing temp dir, removed on drop
    _tmp: tempfile::TempDir,
}

/// A decoded test response.
pub struct TestResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, parsed as JSON when possible, a string otherwise.
    pub body: Value,
}

impl TestApp {
    /// Create a new test application backed by a temp directory: fresh
    /// SQLite ledger (seeded), a video directory holding only the base
    /// video, and an empty static directory.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.path = tmp
            .path()
            .join("prices.db")
            .to_string_lossy()
            .into_owned();
        config.videos.directory = tmp.path().join("videos").to_string_lossy().into_owned();
        config.server.static_dir = tmp.path().join("static").to_string_lossy().into_owned();

        std::fs::create_dir_all(&config.server.static_dir).expect("Failed to create static dir");

        let pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to open test database")
            .into_pool();
        pdview_database::migration::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let prices = Arc::new(PriceRepository::new(pool));
        prices.seed_if_empty().await.expect("Failed to seed ledger");

        let catalog = LocalVideoCatalog::new(&config.videos.directory)
            .await
            .expect("Failed to create video catalog");
        catalog
            .write(
                &config.videos.base_video,
                bytes::Bytes::from_static(b"base video content"),
            )
            .await
            .expect("Failed to write base video");

        let videos = Arc::new(VideoLibrary::new(
            Arc::new(catalog),
            config.videos.base_video.clone(),
        ));

        let state = AppState {
            config: Arc::new(config),
            prices,
            videos,
        };

        Self {
            router: pdview_api::router::build_router(state),
            _tmp: tmp,
        }
    }

    /// Issue a request with an optional JSON body.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Issue a multipart upload with a single `video` field.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> TestResponse {
        const BOUNDARY: &str = "pdview-test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/videos/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
