//! Movies API: REST resources over a document store plus a file-backed watchlist.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod id;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod watchlist;

pub use config::{builtin_resources, load_resources_from_path, resolve, FullConfig, ResolvedModel, ResolvedResource, Settings, StorageBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use id::DocId;
pub use routes::{app, common_routes, entity_routes, resource_routes, watchlist_routes};
pub use service::{CrudService, RequestValidator};
pub use state::{AppState, ResourceState};
pub use store::{DocumentStore, MemoryStore, MongoStore, Record};
pub use watchlist::{Watchlist, WatchlistItem};
