#![deny(missing_docs)]

//! # Parser Module
//!
//! Line-oriented extraction of fields from Go-style struct declarations.
//!
//! This is not a language parser. A declaration block is the text
//! between `type <Name> struct {` and the *first* closing brace, so a struct
//! whose body holds a nested `{ }` pair is cut short. Fields must fit on one
//! line; anything that does not look like `name type [`tags`]` is skipped.

use crate::model::{ApiKind, FieldRecord};
use regex::Regex;
use std::sync::OnceLock;

/// Comment markers flagging the following field as optional.
const OPTIONAL_MARKERS: &[&str] = &["+optional", "+k8s:optional"];

/// Comment markers flagging the following field as required.
const REQUIRED_MARKERS: &[&str] = &["+required", "+k8s:required"];

/// A `type <Name> struct { ... }` block located in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructBlock<'a> {
    /// Declared type name.
    pub name: &'a str,
    /// Raw text between the braces.
    pub body: &'a str,
}

/// Represents a field extracted from a struct body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// The name of the field.
    pub name: String,
    /// The raw type token (e.g. `*int32`, `[]Container`).
    pub ty: String,
    /// Wire name from the `json` tag, or the field name.
    pub json_name: String,
    /// Whether the field is optional.
    pub optional: bool,
    /// Raw text between the backticks (empty when untagged).
    pub struct_tags: String,
}

impl ParsedField {
    /// Attaches the owning group and kind.
    pub fn into_record(self, owner: &ApiKind) -> FieldRecord {
        FieldRecord {
            group: owner.group.clone(),
            kind: owner.kind.clone(),
            path: self.name,
            ty: self.ty,
            tag: self.json_name,
            optional: self.optional,
            extra: self.struct_tags,
        }
    }
}

fn struct_re() -> &'static Regex {
    static STRUCT_RE: OnceLock<Regex> = OnceLock::new();
    STRUCT_RE.get_or_init(|| {
        Regex::new(r"type\s+(\w+)\s+struct\s*\{([^}]+)\}").expect("Invalid regex")
    })
}

fn json_tag_re() -> &'static Regex {
    static JSON_TAG_RE: OnceLock<Regex> = OnceLock::new();
    JSON_TAG_RE.get_or_init(|| Regex::new(r#"json:"([^"]*)""#).expect("Invalid regex"))
}

fn identifier_re() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("Invalid regex"))
}

/// Iterates over every struct block in `content`, in file order.
pub fn struct_blocks(content: &str) -> impl Iterator<Item = StructBlock<'_>> {
    struct_re().captures_iter(content).filter_map(|caps| {
        Some(StructBlock {
            name: caps.get(1)?.as_str(),
            body: caps.get(2)?.as_str(),
        })
    })
}

/// Lists the names of all struct blocks in `content`.
pub fn struct_names(content: &str) -> Vec<String> {
    struct_blocks(content)
        .map(|block| block.name.to_string())
        .collect()
}

/// Returns the first struct block declared as `name`.
pub fn find_struct<'a>(content: &'a str, name: &str) -> Option<StructBlock<'a>> {
    struct_blocks(content).find(|block| block.name == name)
}

/// Whether `content` declares a struct called `name`.
pub fn declares_struct(content: &str, name: &str) -> bool {
    find_struct(content, name).is_some()
}

/// Extracts the fields of struct `name`, or `None` if `content` does not declare it.
///
/// # Examples
/// ```
/// use kubefields_core::parser::extract_struct_fields;
///
/// let code = r#"
/// type Probe struct {
///     // +optional
///     TimeoutSeconds int32 `json:"timeoutSeconds,omitempty"`
/// }
/// "#;
/// let fields = extract_struct_fields(code, "Probe").unwrap();
/// assert_eq!(fields[0].json_name, "timeoutSeconds");
/// assert!(fields[0].optional);
/// ```
pub fn extract_struct_fields(content: &str, name: &str) -> Option<Vec<ParsedField>> {
    find_struct(content, name).map(|block| parse_struct_body(block.body))
}

/// Markers seen in the comment block above the next field.
#[derive(Default)]
struct PendingMarkers {
    optional: bool,
    required: bool,
}

impl PendingMarkers {
    fn observe(&mut self, comment: &str) {
        if contains_any(comment, OPTIONAL_MARKERS) {
            self.optional = true;
        }
        if contains_any(comment, REQUIRED_MARKERS) {
            self.required = true;
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Walks a struct body line by line and emits one field per declaration.
///
/// Embedded fields (a single token, or the name repeated as the type) are
/// dropped. Fields default to optional; only a required marker without an
/// optional marker makes them required.
pub fn parse_struct_body(body: &str) -> Vec<ParsedField> {
    let mut fields = Vec::new();
    let mut pending = PendingMarkers::default();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("//") {
            pending.observe(line);
            continue;
        }

        let markers = std::mem::take(&mut pending);
        if let Some(field) = parse_field_line(line, &markers) {
            fields.push(field);
        }
    }

    fields
}

fn parse_field_line(line: &str, markers: &PendingMarkers) -> Option<ParsedField> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 || parts[0] == parts[1] {
        return None;
    }

    let (name, ty) = (parts[0], parts[1]);
    if !identifier_re().is_match(name) || ty.starts_with('`') {
        return None;
    }

    let struct_tags = line.split('`').nth(1).unwrap_or_default();
    let json_name = json_tag_re()
        .captures(struct_tags)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().split(',').next().unwrap_or_default())
        .filter(|wire| !wire.is_empty())
        .unwrap_or(name);

    let optional = if markers.optional || contains_any(struct_tags, OPTIONAL_MARKERS) {
        true
    } else {
        !markers.required
    };

    Some(ParsedField {
        name: name.to_string(),
        ty: ty.to_string(),
        json_name: json_name.to_string(),
        optional,
        struct_tags: struct_tags.to_string(),
    })
}
