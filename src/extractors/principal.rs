//! Extract the authenticated principal forwarded by the identity layer.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the signed-in user's email. Set by the fronting identity
/// layer after federated login; absent for anonymous requests.
pub const PRINCIPAL_HEADER: &str = "X-Authenticated-User";

/// Optional authenticated user identifier.
#[derive(Clone, Debug)]
pub struct Principal(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok())
            .map(|s: &str| s.trim().to_string())
            .filter(|s: &String| !s.is_empty());
        Ok(Principal(value))
    }
}
