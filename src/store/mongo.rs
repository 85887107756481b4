//! MongoDB-backed document store.

use super::{document_to_record, record_to_document, DocumentStore, Record};
use crate::error::StoreError;
use crate::id::DocId;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use std::sync::OnceLock;

/// Handle to one MongoDB database. Starts disconnected; every call made before
/// [`MongoStore::init`] succeeds fails with [`StoreError::NotConnected`].
#[derive(Default)]
pub struct MongoStore {
    db: OnceLock<Database>,
}

impl MongoStore {
    pub fn new() -> Self {
        MongoStore { db: OnceLock::new() }
    }

    /// Create a handle and connect it.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let store = Self::new();
        store.init(uri, db_name).await?;
        Ok(store)
    }

    /// Connect once and verify with a ping. A second call is a no-op.
    pub async fn init(&self, uri: &str, db_name: &str) -> Result<(), StoreError> {
        if self.db.get().is_some() {
            return Ok(());
        }
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }).await?;
        if self.db.set(db).is_ok() {
            tracing::info!(database = db_name, "connected to MongoDB");
        }
        Ok(())
    }

    fn collection(&self, name: &str) -> Result<Collection<Document>, StoreError> {
        self.db
            .get()
            .map(|db| db.collection::<Document>(name))
            .ok_or(StoreError::NotConnected)
    }
}

fn id_filter(id: &DocId) -> Document {
    doc! { "_id": Bson::from(id) }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(collection, "find all");
        let cursor = self.collection(collection)?.find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(document_to_record).collect())
    }

    async fn find_one(&self, collection: &str, id: &DocId) -> Result<Option<Record>, StoreError> {
        tracing::debug!(collection, id = %id, "find one");
        let doc = self.collection(collection)?.find_one(id_filter(id)).await?;
        Ok(doc.map(document_to_record))
    }

    async fn insert_one(&self, collection: &str, record: Record) -> Result<DocId, StoreError> {
        tracing::debug!(collection, "insert one");
        let doc = record_to_document(&record)?;
        let result = self.collection(collection)?.insert_one(doc).await?;
        DocId::try_from(result.inserted_id)
    }

    async fn update_one(&self, collection: &str, id: &DocId, fields: Record) -> Result<u64, StoreError> {
        tracing::debug!(collection, id = %id, "update one");
        let set = record_to_document(&fields)?;
        let result = self
            .collection(collection)?
            .update_one(id_filter(id), doc! { "$set": set })
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, id: &DocId) -> Result<u64, StoreError> {
        tracing::debug!(collection, id = %id, "delete one");
        let result = self.collection(collection)?.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let db = self.db.get().ok_or(StoreError::NotConnected)?;
        db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
