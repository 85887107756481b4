//! Watchlist handlers.

use crate::error::AppError;
use crate::extractors::{Payload, Principal};
use crate::state::AppState;
use crate::watchlist::is_truthy;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn get_watchlist(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.watchlist.items().await)
}

pub async fn add_to_watchlist(
    Principal(user): Principal,
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = body
        .get("movieId")
        .filter(|v| is_truthy(v))
        .cloned()
        .ok_or_else(|| AppError::BadRequest("movieId is required".into()))?;

    let item = state
        .watchlist
        .add(movie_id, user)
        .await
        .map_err(|source| AppError::Io {
            context: "Failed to save watchlist".into(),
            source,
        })?;
    tracing::info!(id = %item.id, user = %item.user, "watchlist entry added");
    Ok((StatusCode::CREATED, Json(item)))
}
