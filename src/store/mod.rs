//! Storage collaborator: document collections addressed by name.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::StoreError;
use crate::id::DocId;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// A document as exposed over HTTP: JSON object including `_id`.
pub type Record = Map<String, Value>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_all(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    async fn find_one(&self, collection: &str, id: &DocId) -> Result<Option<Record>, StoreError>;

    /// Insert and return the storage-assigned identifier.
    async fn insert_one(&self, collection: &str, record: Record) -> Result<DocId, StoreError>;

    /// `$set` the given fields on the document with `id`. Returns the matched count.
    async fn update_one(&self, collection: &str, id: &DocId, fields: Record) -> Result<u64, StoreError>;

    /// Returns the deleted count.
    async fn delete_one(&self, collection: &str, id: &DocId) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Convert a stored document into its JSON form. ObjectIds become hex strings
/// and dates become RFC 3339 strings; anything exotic uses relaxed extended JSON.
pub fn document_to_record(doc: Document) -> Record {
    doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect()
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Int32(n) => Value::Number(n.into()),
        Bson::Int64(n) => Value::Number(n.into()),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::Number(dt.timestamp_millis().into()),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(document_to_record(doc)),
        other => other.into_relaxed_extjson(),
    }
}

pub fn record_to_document(record: &Record) -> Result<Document, StoreError> {
    Ok(mongodb::bson::to_document(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::new();
        let record = document_to_record(doc! { "_id": oid, "title": "X", "views": 3_i64 });
        assert_eq!(record["_id"], Value::String(oid.to_hex()));
        assert_eq!(record["title"], "X");
        assert_eq!(record["views"], 3);
    }

    #[test]
    fn nested_values_are_converted() {
        let oid = ObjectId::new();
        let record = document_to_record(doc! {
            "cast": ["A", "B"],
            "meta": { "ref": oid, "rating": 8.5, "flag": false },
            "addedAt": DateTime::from_millis(0),
        });
        assert_eq!(record["cast"], serde_json::json!(["A", "B"]));
        assert_eq!(record["meta"]["ref"], Value::String(oid.to_hex()));
        assert_eq!(record["meta"]["rating"], 8.5);
        assert_eq!(record["meta"]["flag"], false);
        assert!(record["addedAt"].as_str().unwrap().starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn records_encode_to_documents() {
        let mut record = Record::new();
        record.insert("title".into(), Value::String("X".into()));
        record.insert("genre".into(), serde_json::json!(["Drama"]));
        record.insert("isPopular".into(), Value::Bool(true));
        let doc = record_to_document(&record).unwrap();
        assert_eq!(doc.get_str("title").unwrap(), "X");
        assert!(doc.get_bool("isPopular").unwrap());
        assert_eq!(doc.get_array("genre").unwrap().len(), 1);
    }
}
