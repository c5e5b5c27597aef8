//! # Schema Bundles
//!
//! Naming conventions of the per-group OpenAPI bundle files and of the
//! schema identifiers inside them.

use crate::model::ApiKind;
use serde_json::Value;

/// Group name with dots turned into underscores, as used in ids and file names.
fn group_segment(group: &str) -> String {
    group.replace('.', "_")
}

/// Canonical identifier of a kind's schema, e.g. `io.k8s.api.apps.v1.Deployment`.
///
/// The core group is spelled `core`.
pub fn canonical_schema_id(prefix: &str, kind: &ApiKind) -> String {
    let group = if kind.is_core_group() {
        "core".to_string()
    } else {
        group_segment(&kind.group)
    };
    format!(
        "{}.{}.{}.{}",
        prefix,
        group,
        kind.version_or_default(),
        kind.kind
    )
}

/// File name of the bundle expected to hold a kind's schema.
pub fn bundle_file_name(kind: &ApiKind) -> String {
    if kind.is_core_group() {
        format!("api__{}_openapi.json", kind.version_or_default())
    } else {
        format!(
            "apis__{}__{}_openapi.json",
            group_segment(&kind.group),
            kind.version_or_default()
        )
    }
}

/// File-name pattern matching a group's bundles of any version.
pub fn any_version_pattern(kind: &ApiKind) -> String {
    if kind.is_core_group() {
        "api__*_openapi.json".to_string()
    } else {
        format!("apis__{}__*_openapi.json", group_segment(&kind.group))
    }
}

/// Looks up `components.schemas.<id>` in a bundle document. Null entries count as absent.
pub fn schema_in_bundle<'a>(document: &'a Value, id: &str) -> Option<&'a Value> {
    document
        .get("components")
        .and_then(|components| components.get("schemas"))
        .and_then(|schemas| schemas.get(id))
        .filter(|schema| !schema.is_null())
}
