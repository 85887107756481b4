//! Request payload as a field map.

use crate::error::AppError;
use crate::store::Record;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde_json::Value;

/// JSON object body of a create/update request.
///
/// A request without a JSON content type, an empty body, or a JSON value that
/// is not an object reads as an empty payload, so required-field validation
/// reports every field as missing. Malformed JSON is a 400 and a body over the
/// configured limit is a 413.
#[derive(Debug, Default)]
pub struct Payload(pub Record);

fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            tracing::debug!("request without JSON content type, treating body as empty");
            return Ok(Payload::default());
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload::default());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Payload(map)),
            Ok(_) => Ok(Payload::default()),
            Err(e) => Err(AppError::InvalidBody(e.to_string())),
        }
    }
}
