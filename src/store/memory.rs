//! In-process document store. Used for local runs without MongoDB and in tests.

use super::{DocumentStore, Record};
use crate::error::StoreError;
use crate::id::DocId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(DocId, Record)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under an explicit id (e.g. a legacy string `_id`).
    pub async fn seed(&self, collection: &str, id: DocId, record: Record) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id, without_id(record)));
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn without_id(mut record: Record) -> Record {
    record.remove("_id");
    record
}

fn with_id(id: &DocId, record: &Record) -> Record {
    let mut out = Record::with_capacity(record.len() + 1);
    out.insert("_id".into(), Value::String(id.to_hex_or_text()));
    out.extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
    out
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(id, r)| with_id(id, r)).collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, id: &DocId) -> Result<Option<Record>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(doc_id, r)| with_id(doc_id, r)))
    }

    async fn insert_one(&self, collection: &str, record: Record) -> Result<DocId, StoreError> {
        let id = DocId::generate();
        self.seed(collection, id.clone(), record).await;
        Ok(id)
    }

    async fn update_one(&self, collection: &str, id: &DocId, fields: Record) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
        else {
            return Ok(0);
        };
        for (k, v) in without_id(fields) {
            doc.1.insert(k, v);
        }
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, id: &DocId) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|(doc_id, _)| doc_id == id) {
            Some(pos) => {
                docs.remove(pos);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
