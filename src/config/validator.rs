//! Config validation: resource definitions must be routable and unambiguous.

use crate::config::{FullConfig, ResourceConfig};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

const PATH_SEGMENT_PATTERN: &str = "^[a-z0-9][a-z0-9-]*$";

/// Path segments taken by non-resource routes.
const RESERVED_SEGMENTS: &[&str] = &["watchlist", "health", "ready", "version", "api-docs"];

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    if config.resources.is_empty() {
        return Err(ConfigError::Load("at least one resource required".into()));
    }
    let segment_re = Regex::new(PATH_SEGMENT_PATTERN).map_err(|e| ConfigError::Load(e.to_string()))?;

    let mut path_segments = HashSet::new();
    for resource in &config.resources {
        validate_resource(resource, &segment_re)?;
        if !path_segments.insert(resource.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(resource.path_segment.clone()));
        }
    }
    Ok(())
}

fn validate_resource(resource: &ResourceConfig, segment_re: &Regex) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidResource {
        resource: resource.path_segment.clone(),
        reason: reason.to_string(),
    };

    if !segment_re.is_match(&resource.path_segment) {
        return Err(invalid("path_segment must match ^[a-z0-9][a-z0-9-]*$"));
    }
    if RESERVED_SEGMENTS.contains(&resource.path_segment.as_str()) {
        return Err(invalid("path_segment is reserved"));
    }
    if resource.collection.trim().is_empty() {
        return Err(invalid("collection is empty"));
    }
    if resource.label.trim().is_empty() || resource.plural_label.trim().is_empty() {
        return Err(invalid("label and plural_label are required"));
    }
    if resource.required_fields.is_empty() {
        return Err(invalid("required_fields is empty"));
    }
    let mut seen = HashSet::new();
    for field in &resource.required_fields {
        if field.is_empty() || field == "_id" {
            return Err(invalid("required field names must be non-empty and not _id"));
        }
        if !seen.insert(field.as_str()) {
            return Err(ConfigError::InvalidResource {
                resource: resource.path_segment.clone(),
                reason: format!("duplicate required field {}", field),
            });
        }
    }
    Ok(())
}
