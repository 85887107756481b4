//! Request validation: required-field presence.

use crate::error::AppError;
use crate::store::Record;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Required fields absent from `payload` or explicitly null, in `required` order.
    /// Zero, empty string and false all count as present.
    pub fn missing_fields(required: &[String], payload: &Record) -> Vec<String> {
        required
            .iter()
            .filter(|field| matches!(payload.get(field.as_str()), None | Some(Value::Null)))
            .cloned()
            .collect()
    }

    pub fn validate(required: &[String], payload: &Record) -> Result<(), AppError> {
        let missing = Self::missing_fields(required, payload);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingFields(missing))
        }
    }

    /// Project `payload` onto the tracked fields. Call after `validate`.
    pub fn tracked(required: &[String], payload: &Record) -> Record {
        required
            .iter()
            .filter_map(|field| payload.get(field.as_str()).map(|v| (field.clone(), v.clone())))
            .collect()
    }
}
