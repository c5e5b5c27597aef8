#![deny(missing_docs)]

//! # kubefields core
//!
//! Best-effort scraping of API group, kind and field metadata from a
//! Kubernetes-style source tree or its OpenAPI bundles, written as CSV tables.

/// Shared error types.
pub mod error;

/// Table rows and records.
pub mod model;

/// Repository layout configuration.
pub mod config;

/// Line-oriented struct declaration parsing.
pub mod parser;

/// OpenAPI schema bundles and the schema field walk.
pub mod oas;

/// Finding the file or schema that defines a kind.
pub mod locator;

/// Running an extractor over a kinds table.
pub mod driver;

/// CSV input and output.
pub mod table;

/// Building the kinds table from a source tree.
pub mod catalog;

/// Filtering and sorting finished tables.
pub mod postprocess;

/// Benchmark log conversion.
pub mod benchmark;

pub use catalog::build_catalog;
pub use config::{SchemaLayout, SourceLayout};
pub use driver::{extract_fields, extract_to_csv, FieldExtractor, FieldSink, RunSummary};
pub use error::{AppError, AppResult};
pub use locator::{SchemaLocator, SourceLocator};
pub use model::{ApiKind, ExtractionMode, FieldRecord};
pub use oas::extract_schema_fields;
pub use parser::{extract_struct_fields, ParsedField};
pub use table::{read_kinds, write_kinds, CsvFieldSink};
