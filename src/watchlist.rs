//! Watchlist persisted as a JSON array file, rewritten in full on every addition.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// User recorded when the request carries no authenticated principal.
pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie_id: Value,
    pub user: String,
    pub added_at: String,
}

pub struct Watchlist {
    path: PathBuf,
    items: Mutex<Vec<WatchlistItem>>,
}

impl Watchlist {
    /// Load from `path`. A missing file is an empty list; a malformed one is an error.
    pub async fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let items = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        tracing::info!(path = %path.display(), count = items.len(), "watchlist loaded");
        Ok(Watchlist {
            path,
            items: Mutex::new(items),
        })
    }

    pub async fn items(&self) -> Vec<WatchlistItem> {
        self.items.lock().await.clone()
    }

    /// Append an entry and rewrite the file. On write failure the in-memory
    /// list is left as it was.
    pub async fn add(&self, movie_id: Value, user: Option<String>) -> io::Result<WatchlistItem> {
        let item = WatchlistItem {
            id: uuid::Uuid::new_v4().to_string(),
            movie_id,
            user: user.unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            added_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let mut items = self.items.lock().await;
        items.push(item.clone());
        if let Err(e) = self.persist(&items).await {
            items.pop();
            return Err(e);
        }
        Ok(item)
    }

    async fn persist(&self, items: &[WatchlistItem]) -> io::Result<()> {
        let body = serde_json::to_string_pretty(items).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, body).await
    }
}

/// JavaScript-style truthiness, used to accept a `movieId`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
