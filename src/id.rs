//! Document identifiers: canonical ObjectId vs. opaque string keys.
//!
//! Collections may hold both forms for the same logical key. Reads try the
//! typed form first and fall back to the literal string; writes only accept
//! identifiers that round-trip exactly through the canonical encoding.

use crate::error::StoreError;
use crate::store::{DocumentStore, Record};
use mongodb::bson::{oid::ObjectId, Bson};
use std::fmt;

const CANONICAL_LEN: usize = 24;

/// Value stored under `_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocId {
    Object(ObjectId),
    Text(String),
}

impl DocId {
    /// Fresh canonical identifier, as assigned by storage on insert.
    pub fn generate() -> Self {
        DocId::Object(ObjectId::new())
    }

    /// String form used in JSON responses (hex for ObjectId).
    pub fn to_hex_or_text(&self) -> String {
        match self {
            DocId::Object(oid) => oid.to_hex(),
            DocId::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_or_text())
    }
}

impl From<&DocId> for Bson {
    fn from(id: &DocId) -> Self {
        match id {
            DocId::Object(oid) => Bson::ObjectId(*oid),
            DocId::Text(s) => Bson::String(s.clone()),
        }
    }
}

impl TryFrom<Bson> for DocId {
    type Error = StoreError;

    fn try_from(value: Bson) -> Result<Self, Self::Error> {
        match value {
            Bson::ObjectId(oid) => Ok(DocId::Object(oid)),
            Bson::String(s) => Ok(DocId::Text(s)),
            other => Err(StoreError::Backend(format!(
                "unsupported _id type: {:?}",
                other.element_type()
            ))),
        }
    }
}

/// True when `raw` is 24 ASCII hex digits (either case).
pub fn has_canonical_syntax(raw: &str) -> bool {
    raw.len() == CANONICAL_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Syntax check plus round-trip equality: `raw` must be exactly what the
/// canonical encoder would produce for the parsed identifier.
pub fn is_strictly_valid(raw: &str) -> bool {
    if !has_canonical_syntax(raw) {
        return false;
    }
    match ObjectId::parse_str(raw) {
        Ok(oid) => oid.to_hex() == raw,
        Err(_) => false,
    }
}

/// Parse an identifier for a mutation. `None` means the id must be rejected.
pub fn parse_strict(raw: &str) -> Option<DocId> {
    if !is_strictly_valid(raw) {
        return None;
    }
    ObjectId::parse_str(raw).ok().map(DocId::Object)
}

/// Read-path lookup: typed ObjectId first (errors and misses both fall
/// through), then the literal string.
pub async fn resolve(
    store: &dyn DocumentStore,
    collection: &str,
    raw: &str,
) -> Result<Option<Record>, StoreError> {
    if has_canonical_syntax(raw) {
        if let Ok(oid) = ObjectId::parse_str(raw) {
            match store.find_one(collection, &DocId::Object(oid)).await {
                Ok(Some(record)) => return Ok(Some(record)),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(collection, id = raw, error = %e, "typed lookup failed, trying string id");
                }
            }
        }
    }
    store.find_one(collection, &DocId::Text(raw.to_string())).await
}
