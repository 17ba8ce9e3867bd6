//! Common test utilities for API testing with mocks.
//!
//! Provides a test fixture that builds the full router around an on-disk
//! SQLite store with mock provider and notifier injected, so tests can
//! exercise the control surface and whole cycles without a search API or
//! a webhook endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use scholar_watcher_core::{
    testing::{MockNotifier, MockProvider},
    Config, CycleRunner, CycleScheduler, DatabaseConfig, NotifierConfig, ProviderConfig,
    ServerConfig, SqliteWatchStore, WatchStore, WatcherConfig,
};
use scholar_watcher_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use scholar_watcher_core::testing::fixtures;

/// Test fixture with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_add_keyword() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/keywords", json!({"term": "graphs"})).await;
///     assert_eq!(response.status, StatusCode::CREATED);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The store backing the router, for direct assertions
    pub store: Arc<SqliteWatchStore>,
    /// Mock provider - configure candidates per keyword
    pub provider: Arc<MockProvider>,
    /// Mock notifier - inspect deliveries, inject failures
    pub notifier: Arc<MockNotifier>,
    /// Temporary directory holding the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with a fully configured watcher.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test fixture with a custom configuration. The database path
    /// is always replaced with a fresh temp file.
    pub fn with_config(mut config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        config.database = DatabaseConfig {
            path: db_path.clone(),
        };

        let store = Arc::new(SqliteWatchStore::new(&db_path).expect("Failed to create store"));
        let provider = Arc::new(MockProvider::new());
        let notifier = Arc::new(MockNotifier::new());

        let runner = Arc::new(CycleRunner::new(
            config.watcher.clone(),
            Arc::clone(&store) as Arc<dyn WatchStore>,
            Arc::clone(&provider) as Arc<dyn scholar_watcher_core::SearchProvider>,
            Arc::clone(&notifier) as Arc<dyn scholar_watcher_core::Notifier>,
        ));
        let scheduler = Arc::new(CycleScheduler::new(runner, config.watcher.schedule_minutes));

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn WatchStore>,
            scheduler,
        ));
        let router = create_router(state);

        Self {
            router,
            store,
            provider,
            notifier,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with an empty body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the raw body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// A fully configured test config: credentials present, pacing and the
/// interval timer disabled.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        provider: ProviderConfig {
            api_key: "test-key".to_string(),
            ..ProviderConfig::default()
        },
        notifier: NotifierConfig {
            webhook_url: "https://example.org/webhook".to_string(),
            ..NotifierConfig::default()
        },
        watcher: WatcherConfig {
            schedule_minutes: 0,
            keyword_pace_ms: 0,
            ..WatcherConfig::default()
        },
        keywords: Vec::new(),
    }
}
