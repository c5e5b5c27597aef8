#![deny(missing_docs)]

//! # Locators
//!
//! - **source**: Declaration files in a source tree.
//! - **schema**: Schemas inside OpenAPI bundle files.
//!
//! A kind that cannot be found is `None`, never an error.

pub mod schema;
pub mod source;

pub use schema::{LocatedSchema, SchemaLocator};
pub use source::{LocatedSource, SourceLocator};

use crate::error::AppResult;
use std::path::{Path, PathBuf};

/// Paths in `dir` matching a file-name `pattern`, sorted.
///
/// The directory part is escaped, so only `pattern` carries wildcards.
pub(crate) fn glob_sorted(dir: &Path, pattern: &str) -> AppResult<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = format!("{}/{}", escaped.trim_end_matches('/'), pattern);

    let mut paths: Vec<PathBuf> = glob::glob(&full)?.filter_map(Result::ok).collect();
    paths.sort();
    Ok(paths)
}
