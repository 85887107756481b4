//! Shared application state. The store handle is created once at startup and passed to every route.

use crate::config::{ResolvedModel, ResolvedResource};
use crate::store::DocumentStore;
use crate::watchlist::Watchlist;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub model: Arc<ResolvedModel>,
    pub watchlist: Arc<Watchlist>,
}

impl AppState {
    pub fn resource_state(&self, resource: &Arc<ResolvedResource>) -> ResourceState {
        ResourceState {
            store: self.store.clone(),
            resource: resource.clone(),
        }
    }
}

/// State for one resource's router: the store plus the resource definition the generic handlers act on.
#[derive(Clone)]
pub struct ResourceState {
    pub store: Arc<dyn DocumentStore>,
    pub resource: Arc<ResolvedResource>,
}
