#![deny(missing_docs)]

//! # OpenAPI Schema Module
//!
//! - **bundle**: Canonical schema identifiers and lookup inside a bundle document.
//! - **fields**: Recursive walk of a schema tree into field records.
//! - **ref_utils**: Helpers for naming types from `$ref` targets.

pub mod bundle;
pub mod fields;
pub(crate) mod ref_utils;

pub use bundle::{bundle_file_name, canonical_schema_id, schema_in_bundle};
pub use fields::{collect_fields, extract_schema_fields, property_type};
