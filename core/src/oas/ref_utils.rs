#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for turning `$ref` targets into type names. References are never
//! dereferenced; only their final path segment is used, exactly as written.

use serde_json::{Map, Value};

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/io.k8s.api.core.v1.PodSpec` -> `io.k8s.api.core.v1.PodSpec`
pub(crate) fn ref_type_name(ref_loc: &str) -> String {
    ref_loc.rsplit('/').next().unwrap_or_default().to_string()
}

/// The type named by a schema's own `$ref`, or by the `$ref` of its first `allOf` member.
pub(crate) fn referenced_type(schema: &Map<String, Value>) -> Option<String> {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        return Some(ref_type_name(reference));
    }

    schema
        .get("allOf")
        .and_then(Value::as_array)
        .and_then(|all_of| all_of.first())
        .and_then(|first| first.get("$ref"))
        .and_then(Value::as_str)
        .map(ref_type_name)
}
