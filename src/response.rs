//! Response shape helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody {
    pub message: String,
    pub inserted_id: String,
}

pub fn created(message: String, inserted_id: String) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::CREATED,
        Json(CreatedBody {
            message,
            inserted_id,
        }),
    )
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// Bare JSON array; list endpoints carry no envelope.
pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}
