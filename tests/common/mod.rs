//! Shared harness: full router over a chosen store and a throwaway watchlist file.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use movies_api::{
    app, builtin_resources, resolve, AppState, DocId, DocumentStore, MemoryStore, Record, StoreError, Watchlist,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub watchlist_path: PathBuf,
}

pub fn temp_watchlist_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("movies-api-test-{}", uuid::Uuid::new_v4()))
        .join("watchlist.json")
}

pub async fn spawn_app(store: Arc<dyn DocumentStore>) -> TestApp {
    spawn_app_with_limit(store, 1024 * 1024).await
}

pub async fn spawn_app_with_limit(store: Arc<dyn DocumentStore>, body_limit_bytes: usize) -> TestApp {
    let watchlist_path = temp_watchlist_path();
    let watchlist = Watchlist::load(&watchlist_path)
        .await
        .expect("failed to load watchlist");
    let model = resolve(&builtin_resources()).expect("builtin resources resolve");
    let state = AppState {
        store,
        model: Arc::new(model),
        watchlist: Arc::new(watchlist),
    };
    TestApp {
        router: app(state, body_limit_bytes),
        watchlist_path,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub raw: Vec<u8>,
    pub json: Value,
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    send_with_headers(router, method, uri, body, &[]).await
}

pub async fn send_with_headers(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(router, request).await
}

/// Send a body verbatim. No Content-Length is set, so the body is read as a stream.
pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    dispatch(router, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn dispatch(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let raw = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    let json = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&raw).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        content_type,
        raw,
        json,
    }
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub fn valid_movie() -> Value {
    serde_json::json!({
        "title": "Test Movie",
        "description": "A test movie",
        "genre": ["Drama"],
        "releaseYear": 2024,
        "director": "Someone",
        "duration": 120,
        "rating": 8.5,
        "posterUrl": "https://example.com/poster.jpg",
        "trailerUrl": "https://example.com/trailer.mp4",
        "cast": ["Actor One", "Actor Two"],
        "language": "English",
        "country": "USA",
        "addedDate": "2024-01-01",
        "views": 1000,
        "isPopular": false,
        "copyrightStatus": "Licensed"
    })
}

pub fn valid_popular() -> Value {
    let mut movie = valid_movie();
    movie["movieId"] = Value::String("movie-123".into());
    movie["isPopular"] = Value::Bool(true);
    movie
}

pub fn valid_comment() -> Value {
    serde_json::json!({
        "movieTitle": "Test Movie",
        "user": "someone",
        "text": "Great!",
        "rating": 5,
        "createdAt": "2024-01-01",
        "likes": 0
    })
}

pub fn valid_user() -> Value {
    serde_json::json!({
        "name": "Jane",
        "email": "jane@example.com",
        "profilePicture": "https://example.com/jane.png",
        "createdAt": "2024-01-01",
        "updatedAt": "2024-01-02"
    })
}

/// Every call fails, as if the database went away.
pub struct FailingStore;

fn db_error() -> StoreError {
    StoreError::Backend("DB error".into())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_all(&self, _collection: &str) -> Result<Vec<Record>, StoreError> {
        Err(db_error())
    }

    async fn find_one(&self, _collection: &str, _id: &DocId) -> Result<Option<Record>, StoreError> {
        Err(db_error())
    }

    async fn insert_one(&self, _collection: &str, _record: Record) -> Result<DocId, StoreError> {
        Err(db_error())
    }

    async fn update_one(&self, _collection: &str, _id: &DocId, _fields: Record) -> Result<u64, StoreError> {
        Err(db_error())
    }

    async fn delete_one(&self, _collection: &str, _id: &DocId) -> Result<u64, StoreError> {
        Err(db_error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::NotConnected)
    }
}

/// Memory store that counts every storage call and can fail typed-id lookups.
#[derive(Default)]
pub struct ProbeStore {
    pub inner: MemoryStore,
    pub calls: AtomicUsize,
    pub fail_typed_lookup: bool,
}

impl ProbeStore {
    pub fn failing_typed_lookup() -> Self {
        ProbeStore {
            fail_typed_lookup: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for ProbeStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        self.hit();
        self.inner.find_all(collection).await
    }

    async fn find_one(&self, collection: &str, id: &DocId) -> Result<Option<Record>, StoreError> {
        self.hit();
        if self.fail_typed_lookup && matches!(id, DocId::Object(_)) {
            return Err(StoreError::Backend("cast to ObjectId failed".into()));
        }
        self.inner.find_one(collection, id).await
    }

    async fn insert_one(&self, collection: &str, record: Record) -> Result<DocId, StoreError> {
        self.hit();
        self.inner.insert_one(collection, record).await
    }

    async fn update_one(&self, collection: &str, id: &DocId, fields: Record) -> Result<u64, StoreError> {
        self.hit();
        self.inner.update_one(collection, id, fields).await
    }

    async fn delete_one(&self, collection: &str, id: &DocId) -> Result<u64, StoreError> {
        self.hit();
        self.inner.delete_one(collection, id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
