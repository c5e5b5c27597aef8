//! # Data Models
//!
//! Rows flowing into and out of the extractors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version assumed for a kind whose input row carries none.
pub const DEFAULT_VERSION: &str = "v1";

/// One row of the kinds table (`APIGroup,Kind[,Version][,ImportPath]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKind {
    /// Owning API group. Empty for the core group.
    #[serde(rename = "APIGroup")]
    pub group: String,
    /// Resource type name.
    #[serde(rename = "Kind")]
    pub kind: String,
    /// API version (e.g. `v1beta1`), when the table carries one.
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    /// Go import path of the package declaring the kind, when known.
    #[serde(rename = "ImportPath", default)]
    pub import_path: Option<String>,
}

impl ApiKind {
    /// Builds a row with only group and kind set.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            version: None,
            import_path: None,
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the import path hint.
    pub fn with_import_path(mut self, import_path: impl Into<String>) -> Self {
        self.import_path = Some(import_path.into());
        self
    }

    /// The version to use for lookups, falling back to [`DEFAULT_VERSION`].
    pub fn version_or_default(&self) -> &str {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
    }

    /// Whether this kind belongs to the unnamed core group.
    pub fn is_core_group(&self) -> bool {
        self.group.is_empty()
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.kind)
    }
}

/// One extracted field of one kind.
///
/// Column order matches the output table header; see [`ExtractionMode::header`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    /// Owning API group.
    pub group: String,
    /// Owning kind.
    pub kind: String,
    /// Field path from the resource root. A bare name for source extraction,
    /// dotted (and `[]`-suffixed through arrays) for schema extraction.
    pub path: String,
    /// Normalized type descriptor.
    #[serde(rename = "type")]
    pub ty: String,
    /// Wire name of the field.
    pub tag: String,
    /// False only when the field was explicitly marked required.
    pub optional: bool,
    /// Raw struct tags (source) or the property description (schema).
    pub extra: String,
}

/// Which extractor produced (or should produce) a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Declaration files scanned as text.
    #[default]
    Source,
    /// OpenAPI schema bundles walked as JSON.
    Schema,
}

impl ExtractionMode {
    /// Output table header for this mode.
    pub fn header(self) -> [&'static str; 7] {
        let extra = match self {
            ExtractionMode::Source => "StructTags",
            ExtractionMode::Schema => "Description",
        };
        [
            "APIGroup", "Kind", "Field", "Type", "JSONTag", "Optional", extra,
        ]
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Source => write!(f, "source"),
            ExtractionMode::Schema => write!(f, "schema"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" => Ok(ExtractionMode::Source),
            "schema" => Ok(ExtractionMode::Schema),
            other => Err(format!(
                "unknown extraction mode `{}` (expected `source` or `schema`)",
                other
            )),
        }
    }
}
