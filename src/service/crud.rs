//! Generic CRUD over one resource: identifier policy + field validation + one storage call.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::id::{self, DocId};
use crate::service::RequestValidator;
use crate::store::{DocumentStore, Record};

pub struct CrudService;

impl CrudService {
    /// Full collection, unpaginated.
    pub async fn list(store: &dyn DocumentStore, resource: &ResolvedResource) -> Result<Vec<Record>, AppError> {
        store
            .find_all(&resource.collection)
            .await
            .map_err(|e| AppError::storage(&resource.messages.list_failed, e))
    }

    /// Permissive lookup: typed id, then string id.
    pub async fn read(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        raw_id: &str,
    ) -> Result<Record, AppError> {
        id::resolve(store, &resource.collection, raw_id)
            .await
            .map_err(|e| AppError::storage(&resource.messages.read_failed, e))?
            .ok_or_else(|| AppError::NotFound(resource.messages.not_found.clone()))
    }

    /// Insert the tracked fields. Returns the storage-assigned id.
    pub async fn create(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        payload: &Record,
    ) -> Result<DocId, AppError> {
        RequestValidator::validate(&resource.required_fields, payload)?;
        let record = RequestValidator::tracked(&resource.required_fields, payload);
        let id = store
            .insert_one(&resource.collection, record)
            .await
            .map_err(|e| AppError::storage(&resource.messages.create_failed, e))?;
        tracing::info!(collection = %resource.collection, id = %id, "created");
        Ok(id)
    }

    /// Replace the tracked fields of the document with a strictly valid id.
    pub async fn update(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        raw_id: &str,
        payload: &Record,
    ) -> Result<(), AppError> {
        let id = Self::strict_id(resource, raw_id)?;
        RequestValidator::validate(&resource.required_fields, payload)?;
        let fields = RequestValidator::tracked(&resource.required_fields, payload);
        let matched = store
            .update_one(&resource.collection, &id, fields)
            .await
            .map_err(|e| AppError::storage(&resource.messages.update_failed, e))?;
        if matched == 0 {
            return Err(AppError::NotFound(resource.messages.not_found.clone()));
        }
        tracing::info!(collection = %resource.collection, id = %id, "updated");
        Ok(())
    }

    pub async fn delete(store: &dyn DocumentStore, resource: &ResolvedResource, raw_id: &str) -> Result<(), AppError> {
        let id = Self::strict_id(resource, raw_id)?;
        let deleted = store
            .delete_one(&resource.collection, &id)
            .await
            .map_err(|e| AppError::storage(&resource.messages.delete_failed, e))?;
        if deleted == 0 {
            return Err(AppError::NotFound(resource.messages.not_found.clone()));
        }
        tracing::info!(collection = %resource.collection, id = %id, "deleted");
        Ok(())
    }

    fn strict_id(resource: &ResolvedResource, raw_id: &str) -> Result<DocId, AppError> {
        id::parse_strict(raw_id).ok_or_else(|| {
            tracing::warn!(collection = %resource.collection, id = raw_id, "rejected non-canonical id");
            AppError::InvalidId(resource.messages.invalid_id.clone())
        })
    }
}
