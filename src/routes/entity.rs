//! Resource CRUD routes built from the resolved model.
//! Each resource gets its own router over the same generic handlers, nested under `/{path_segment}`.

use crate::config::ResolvedResource;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::{AppState, ResourceState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// `GET|POST /` and `GET|PUT|DELETE /:id` for one resource.
pub fn resource_routes(state: ResourceState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}

pub fn entity_routes(state: AppState) -> Router {
    state
        .model
        .resources
        .iter()
        .fold(Router::new(), |router, resource: &Arc<ResolvedResource>| {
            tracing::debug!(path = %resource.route_prefix(), collection = %resource.collection, "mounting resource");
            router.nest(&resource.route_prefix(), resource_routes(state.resource_state(resource)))
        })
}
