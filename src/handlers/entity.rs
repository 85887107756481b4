//! Resource handlers: list, read, create, update, delete. One set serves every resource.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::response::{created, success_many, success_one};
use crate::service::CrudService;
use crate::state::ResourceState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<ResourceState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list(state.store.as_ref(), &state.resource).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::read(state.store.as_ref(), &state.resource, &id).await?;
    Ok(success_one(row))
}

pub async fn create(
    State(state): State<ResourceState>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let id = CrudService::create(state.store.as_ref(), &state.resource, &body).await?;
    Ok(created(state.resource.messages.created.clone(), id.to_hex_or_text()))
}

pub async fn update(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    CrudService::update(state.store.as_ref(), &state.resource, &id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CrudService::delete(state.store.as_ref(), &state.resource, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
