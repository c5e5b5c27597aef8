#![deny(missing_docs)]

//! # Schema Field Walk
//!
//! Flattens a JSON Schema object graph into [`FieldRecord`]s.
//!
//! Logic:
//! - Every entry of `properties` becomes one record, in document order.
//! - Nested `properties` extend the path with `.name`.
//! - `allOf` members carrying `properties` contribute at the *same* path.
//! - Array `items` carrying `properties` extend the path with `[]`.
//!
//! `$ref` targets are named but never followed, so the walk is bounded by the
//! depth of the inline document.

use crate::model::{ApiKind, FieldRecord};
use crate::oas::ref_utils::referenced_type;
use serde_json::{Map, Value};

/// Envelope properties dropped at the resource root.
const ROOT_ENVELOPE: &[&str] = &["apiVersion", "kind"];

/// Extracts every field of a resource schema.
///
/// # Examples
/// ```
/// use kubefields_core::model::ApiKind;
/// use kubefields_core::oas::extract_schema_fields;
/// use serde_json::json;
///
/// let schema = json!({"properties": {"a": {"type": "string"}}, "required": ["a"]});
/// let fields = extract_schema_fields(&schema, &ApiKind::new("", "Thing"));
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].path, "a");
/// assert!(!fields[0].optional);
/// ```
pub fn extract_schema_fields(schema: &Value, owner: &ApiKind) -> Vec<FieldRecord> {
    let mut fields = Vec::new();
    collect_fields(schema, "", &mut fields, owner);
    fields
}

/// Appends the fields declared at `schema` (and below) to `fields`.
///
/// `prefix` is the path of `schema` itself; an empty prefix marks the resource root.
/// Fragments that are not JSON objects are skipped.
pub fn collect_fields(
    schema: &Value,
    prefix: &str,
    fields: &mut Vec<FieldRecord>,
    owner: &ApiKind,
) {
    if let Some(schema) = schema.as_object() {
        walk(schema, prefix, fields, owner);
    }
}

fn walk(
    schema: &Map<String, Value>,
    prefix: &str,
    fields: &mut Vec<FieldRecord>,
    owner: &ApiKind,
) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };
    let required = required_names(schema);

    for (name, property) in properties {
        if prefix.is_empty() && ROOT_ENVELOPE.contains(&name.as_str()) {
            continue;
        }
        let Some(property) = property.as_object() else {
            continue;
        };

        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        fields.push(FieldRecord {
            group: owner.group.clone(),
            kind: owner.kind.clone(),
            path: path.clone(),
            ty: property_type(property),
            tag: name.clone(),
            optional: !required.contains(&name.as_str()),
            extra: property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });

        descend(property, &path, fields, owner);
    }
}

fn descend(
    property: &Map<String, Value>,
    path: &str,
    fields: &mut Vec<FieldRecord>,
    owner: &ApiKind,
) {
    if property.contains_key("properties") {
        walk(property, path, fields, owner);
    } else if let Some(all_of) = property.get("allOf") {
        for member in all_of.as_array().into_iter().flatten() {
            if member.get("properties").is_some() {
                collect_fields(member, path, fields, owner);
            }
        }
    } else if let Some(items) = property.get("items") {
        if items.get("properties").is_some() {
            collect_fields(items, &format!("{}[]", path), fields, owner);
        }
    }
}

fn required_names(schema: &Map<String, Value>) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Normalized type descriptor of a property schema.
///
/// A `$ref` (direct, or on the first `allOf` member) names the type. Arrays
/// become `array of <item type>`. Otherwise the plain `type`, or an empty string.
pub fn property_type(property: &Map<String, Value>) -> String {
    if let Some(name) = referenced_type(property) {
        return name;
    }

    let Some(ty) = property.get("type") else {
        return String::new();
    };
    let ty = type_text(ty);

    match property.get("items").and_then(Value::as_object) {
        Some(items) if ty == "array" => format!("array of {}", item_type(items)),
        _ => ty,
    }
}

fn item_type(items: &Map<String, Value>) -> String {
    referenced_type(items)
        .or_else(|| items.get("type").map(type_text))
        .unwrap_or_default()
}

fn type_text(ty: &Value) -> String {
    match ty {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn owner() -> ApiKind {
        ApiKind::new("apps", "Deployment")
    }

    fn paths(fields: &[FieldRecord]) -> Vec<&str> {
        fields.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_required_property_is_not_optional() {
        let schema = json!({"properties": {"a": {"type": "string"}}, "required": ["a"]});
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(
            fields,
            vec![FieldRecord {
                group: "apps".into(),
                kind: "Deployment".into(),
                path: "a".into(),
                ty: "string".into(),
                tag: "a".into(),
                optional: false,
                extra: String::new(),
            }]
        );
    }

    #[test]
    fn test_unlisted_properties_are_optional() {
        let schema = json!({
            "properties": {"a": {"type": "string"}, "b": {"type": "integer"}},
            "required": ["a"]
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert!(!fields[0].optional);
        assert!(fields[1].optional);
    }

    #[test]
    fn test_array_of_ref() {
        let schema = json!({
            "properties": {
                "items": {"type": "array", "items": {"$ref": "#/components/schemas/Foo"}}
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(fields[0].ty, "array of Foo");
    }

    #[test]
    fn test_array_item_types() {
        let schema = json!({
            "properties": {
                "plain": {"type": "array", "items": {"type": "string"}},
                "wrapped": {"type": "array", "items": {"allOf": [{"$ref": "#/components/schemas/Bar"}]}},
                "untyped": {"type": "array", "items": {}},
                "bare": {"type": "array"}
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        let types: Vec<&str> = fields.iter().map(|f| f.ty.as_str()).collect();
        assert_eq!(types, vec!["array of string", "array of Bar", "array of ", "array"]);
    }

    #[test]
    fn test_ref_and_all_of_ref_types() {
        let schema = json!({
            "properties": {
                "metadata": {
                    "allOf": [{"$ref": "#/components/schemas/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"}],
                    "default": {}
                },
                "spec": {"$ref": "#/components/schemas/io.k8s.api.apps.v1.DeploymentSpec"},
                "status": {"description": "no type at all"}
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(fields[0].ty, "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta");
        assert_eq!(fields[1].ty, "io.k8s.api.apps.v1.DeploymentSpec");
        assert_eq!(fields[2].ty, "");
        assert_eq!(fields[2].extra, "no type at all");
    }

    #[test]
    fn test_envelope_skipped_only_at_root() {
        let schema = json!({
            "properties": {
                "apiVersion": {"type": "string"},
                "kind": {"type": "string"},
                "ref": {
                    "type": "object",
                    "properties": {
                        "apiVersion": {"type": "string"},
                        "kind": {"type": "string"}
                    }
                }
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(paths(&fields), vec!["ref", "ref.apiVersion", "ref.kind"]);
    }

    #[test]
    fn test_nested_properties_extend_path() {
        let schema = json!({
            "properties": {
                "spec": {
                    "type": "object",
                    "required": ["replicas"],
                    "properties": {
                        "replicas": {"type": "integer"},
                        "strategy": {
                            "type": "object",
                            "properties": {"type": {"type": "string"}}
                        }
                    }
                }
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(
            paths(&fields),
            vec!["spec", "spec.replicas", "spec.strategy", "spec.strategy.type"]
        );
        assert!(!fields[1].optional);
        assert_eq!(fields[3].tag, "type");
    }

    #[test]
    fn test_all_of_members_keep_parent_path() {
        let schema = json!({
            "properties": {
                "template": {
                    "allOf": [
                        {"properties": {"labels": {"type": "object"}}},
                        {"$ref": "#/components/schemas/Ignored"},
                        {"properties": {"name": {"type": "string"}}}
                    ]
                }
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(
            paths(&fields),
            vec!["template", "template.labels", "template.name"]
        );
    }

    #[test]
    fn test_array_items_with_properties_use_brackets() {
        let schema = json!({
            "properties": {
                "containers": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {"name": {"type": "string"}}
                    }
                }
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(paths(&fields), vec!["containers", "containers[].name"]);
        assert_eq!(fields[0].ty, "array of object");
        assert!(!fields[1].optional);
    }

    #[test]
    fn test_properties_win_over_all_of_and_items() {
        let schema = json!({
            "properties": {
                "mixed": {
                    "properties": {"direct": {"type": "string"}},
                    "allOf": [{"properties": {"skipped": {"type": "string"}}}]
                }
            }
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(paths(&fields), vec!["mixed", "mixed.direct"]);
    }

    #[test]
    fn test_malformed_fragments_are_skipped() {
        let schema = json!({
            "properties": {
                "broken": "not an object",
                "fine": {"type": "boolean"}
            },
            "required": "fine"
        });
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(paths(&fields), vec!["fine"]);
        assert!(fields[0].optional);

        assert!(extract_schema_fields(&json!({"properties": []}), &owner()).is_empty());
        assert!(extract_schema_fields(&json!("scalar"), &owner()).is_empty());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let raw = r#"{"properties": {"zeta": {"type": "string"}, "alpha": {"type": "string"}, "mid": {"type": "string"}}}"#;
        let schema: Value = serde_json::from_str(raw).unwrap();
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(paths(&fields), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ref_segment_is_reported_verbatim() {
        let schema = json!({"properties": {"a": {"$ref": "#/components/schemas/a~1b%20c"}}});
        let fields = extract_schema_fields(&schema, &owner());
        assert_eq!(fields[0].ty, "a~1b%20c");
    }

    #[test]
    fn test_non_string_type_is_rendered() {
        let property = json!({"type": ["string", "null"]});
        assert_eq!(property_type(property.as_object().unwrap()), r#"["string","null"]"#);
    }
}
