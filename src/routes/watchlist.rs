//! Watchlist routes.

use crate::handlers::watchlist::{add_to_watchlist, get_watchlist};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn watchlist_routes(state: AppState) -> Router {
    Router::new()
        .route("/watchlist", get(get_watchlist).post(add_to_watchlist))
        .with_state(state)
}
