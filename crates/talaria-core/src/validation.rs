//! Validation-error constructors.
//!
//! Helpers for building [`HandlerError::Validation`] values with the details
//! shape business code conventionally returns to API clients.

use serde_json::json;

use crate::HandlerError;

/// Builds a validation error stating that `field` is not unique.
///
/// `path` overrides the reported field path; it defaults to the field name.
///
/// # Example
///
/// ```
/// use talaria_core::validation::not_unique;
///
/// let err = not_unique("email", None);
/// assert_eq!(err.classify().status, 422);
/// ```
#[must_use]
pub fn not_unique(field: &str, path: Option<&str>) -> HandlerError {
    let path = path.unwrap_or(field);
    HandlerError::validation(json!([
        {
            "message": format!("\"{field}\" is not unique"),
            "path": path,
            "type": "any.unique",
            "context": { "key": path },
        }
    ]))
}
