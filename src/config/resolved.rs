//! Resolved resource model: config validated and flattened for runtime use.

use std::sync::Arc;

/// Response messages for one resource, derived from its labels.
#[derive(Clone, Debug)]
pub struct ResourceMessages {
    pub not_found: String,
    pub invalid_id: String,
    pub created: String,
    pub list_failed: String,
    pub read_failed: String,
    pub create_failed: String,
    pub update_failed: String,
    pub delete_failed: String,
}

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub path_segment: String,
    pub collection: String,
    pub label: String,
    pub plural_label: String,
    pub tag: String,
    pub required_fields: Vec<String>,
    pub messages: ResourceMessages,
}

impl ResolvedResource {
    pub fn route_prefix(&self) -> String {
        format!("/{}", self.path_segment)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    pub resources: Vec<Arc<ResolvedResource>>,
}
