//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("invalid resource '{resource}': {reason}")]
    InvalidResource { resource: String, reason: String },
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("config load: {0}")]
    Load(String),
}

/// Failures reported by the storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database not initialized")]
    NotConnected,
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidId(String),
    #[error("Missing required fields")]
    MissingFields(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn storage(context: impl Into<String>, source: StoreError) -> Self {
        AppError::Storage {
            context: context.into(),
            source,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorBody {
            message: message.into(),
            missing_fields: None,
            error: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidId(message) | AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(message))
            }
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Missing required fields".into(),
                    missing_fields: Some(fields),
                    error: None,
                },
            ),
            AppError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Invalid JSON body".into(),
                    missing_fields: None,
                    error: Some(detail),
                },
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::message("Request body too large"),
            ),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorBody::message(message)),
            AppError::Storage { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: context,
                        missing_fields: None,
                        error: Some(source.to_string()),
                    },
                )
            }
            AppError::Io { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: context,
                        missing_fields: None,
                        error: Some(source.to_string()),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
