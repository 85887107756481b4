//! Raw config types: resource definitions (JSON) and server settings (env).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One REST resource backed by a document collection. In a resources file the
/// keys are snake_case (`path_segment`, `plural_label`, `required_fields`, ...).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// URL segment, e.g. `most-popular`.
    pub path_segment: String,
    pub collection: String,
    /// Singular display name used in messages, e.g. `Movie`.
    pub label: String,
    /// Plural lower-case name used in list messages, e.g. `movies`.
    pub plural_label: String,
    /// Fields required on create/update; also the exact set persisted.
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub created_message: Option<String>,
    /// OpenAPI tag; defaults to the capitalized plural label.
    #[serde(default)]
    pub tag: Option<String>,
}

/// All resource definitions in one struct for in-memory loading.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FullConfig {
    pub resources: Vec<ResourceConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidSetting {
                name: "STORAGE_BACKEND",
                reason: format!("{} (expected mongodb or memory)", s),
            }),
        }
    }
}

/// Process settings read from the environment at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Required when `storage` is MongoDb.
    pub mongo_uri: Option<String>,
    pub mongo_db_name: String,
    pub watchlist_path: PathBuf,
    /// JSON array of [`ResourceConfig`] with snake_case keys; replaces the
    /// built-in resource table when set.
    pub resources_path: Option<PathBuf>,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".into(),
            port: 3000,
            storage: StorageBackend::MongoDb,
            mongo_uri: None,
            mongo_db_name: "yourMovies".into(),
            watchlist_path: PathBuf::from("db/watchlist.json"),
            resources_path: None,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
