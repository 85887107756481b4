//! Server: reads settings from env (and `.env`), connects the document store once,
//! loads the watchlist file and serves the API.

use movies_api::{
    app, builtin_resources, load_resources_from_path, resolve, AppState, DocumentStore, MemoryStore, MongoStore,
    Settings, StorageBackend, Watchlist,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movies_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let config = match &settings.resources_path {
        Some(path) => load_resources_from_path(path).await?,
        None => builtin_resources(),
    };
    let model = resolve(&config)?;

    let store: Arc<dyn DocumentStore> = match settings.storage {
        StorageBackend::MongoDb => {
            let uri = settings.mongo_uri.as_deref().unwrap_or_default();
            Arc::new(MongoStore::connect(uri, &settings.mongo_db_name).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let watchlist = Watchlist::load(&settings.watchlist_path).await?;

    let state = AppState {
        store,
        model: Arc::new(model),
        watchlist: Arc::new(watchlist),
    };
    for resource in &state.model.resources {
        tracing::info!(path = %resource.route_prefix(), collection = %resource.collection, "resource enabled");
    }

    let router = app(state, settings.body_limit_bytes);
    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
