//! # Schema Bundle Locator
//!
//! Finds a kind's schema inside the OpenAPI bundles of a [`SchemaLayout`].

use crate::config::SchemaLayout;
use crate::error::AppResult;
use crate::locator::glob_sorted;
use crate::model::ApiKind;
use crate::oas::bundle::{any_version_pattern, bundle_file_name, canonical_schema_id};
use crate::oas::schema_in_bundle;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A schema found in a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSchema {
    /// Bundle file the schema came from.
    pub path: PathBuf,
    /// Canonical identifier it was stored under.
    pub id: String,
    /// The schema object itself.
    pub schema: Value,
}

/// Locates kind schemas inside bundle files.
#[derive(Debug, Clone, Default)]
pub struct SchemaLocator {
    layout: SchemaLayout,
}

impl SchemaLocator {
    /// Creates a locator over `layout`.
    pub fn new(layout: SchemaLayout) -> Self {
        Self { layout }
    }

    /// The layout being searched.
    pub fn layout(&self) -> &SchemaLayout {
        &self.layout
    }

    /// Canonical identifier of `kind`'s schema under this layout.
    pub fn schema_id(&self, kind: &ApiKind) -> String {
        canonical_schema_id(&self.layout.id_prefix, kind)
    }

    /// Returns the first non-null schema for `kind`, or `None`.
    ///
    /// Bundles that cannot be read or decoded are logged and skipped.
    pub fn locate(&self, kind: &ApiKind) -> Option<LocatedSchema> {
        let bundles = match self.candidate_bundles(kind) {
            Ok(bundles) => bundles,
            Err(e) => {
                warn!("Could not list bundles for {}: {}", kind, e);
                return None;
            }
        };
        if bundles.is_empty() {
            warn!("Could not find OpenAPI file for {}", kind);
            return None;
        }

        let id = self.schema_id(kind);
        for path in bundles {
            debug!("Checking bundle: {}", path.display());
            match load_schema(&path, &id) {
                Ok(Some(schema)) => {
                    info!("Found schema {} in {}", id, path.display());
                    return Some(LocatedSchema { path, id, schema });
                }
                Ok(None) => {}
                Err(e) => warn!("Error reading {}: {}", path.display(), e),
            }
        }

        warn!("Could not find schema for {} in OpenAPI files", id);
        None
    }

    /// Bundles to search: the exact file for the kind's version, else every
    /// bundle of its group.
    pub fn candidate_bundles(&self, kind: &ApiKind) -> AppResult<Vec<PathBuf>> {
        let dir = &self.layout.bundle_dir;
        let exact = glob_sorted(dir, &bundle_file_name(kind))?;
        if !exact.is_empty() {
            return Ok(exact);
        }
        glob_sorted(dir, &any_version_pattern(kind))
    }
}

fn load_schema(path: &Path, id: &str) -> AppResult<Option<Value>> {
    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text)?;
    Ok(schema_in_bundle(&document, id).cloned())
}
