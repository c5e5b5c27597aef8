#![deny(missing_docs)]

//! # Extraction Driver
//!
//! Runs one extractor over every row of a kinds table, in row order, and
//! hands each record to a sink as soon as it is produced.
//!
//! A kind that cannot be located is logged and skipped. Only sink failures
//! (the output cannot be written) end a run early.

use crate::error::AppResult;
use crate::locator::{SchemaLocator, SourceLocator};
use crate::model::{ApiKind, ExtractionMode, FieldRecord};
use crate::oas::extract_schema_fields;
use crate::parser::extract_struct_fields;
use crate::table::{read_kinds, CsvFieldSink};
use std::path::Path;
use tracing::{info, warn};

/// Produces the field records of a single kind.
pub trait FieldExtractor {
    /// Which output layout this extractor feeds.
    fn mode(&self) -> ExtractionMode;

    /// Fields of `kind`, or `None` when no definition was found.
    fn extract(&self, kind: &ApiKind) -> Option<Vec<FieldRecord>>;
}

impl FieldExtractor for SourceLocator {
    fn mode(&self) -> ExtractionMode {
        ExtractionMode::Source
    }

    fn extract(&self, kind: &ApiKind) -> Option<Vec<FieldRecord>> {
        let source = self.locate(kind)?;
        let fields = extract_struct_fields(&source.content, &kind.kind)?;
        Some(
            fields
                .into_iter()
                .map(|field| field.into_record(kind))
                .collect(),
        )
    }
}

impl FieldExtractor for SchemaLocator {
    fn mode(&self) -> ExtractionMode {
        ExtractionMode::Schema
    }

    fn extract(&self, kind: &ApiKind) -> Option<Vec<FieldRecord>> {
        let located = self.locate(kind)?;
        Some(extract_schema_fields(&located.schema, kind))
    }
}

/// Destination of extracted records.
pub trait FieldSink {
    /// Accepts one record.
    fn push(&mut self, record: FieldRecord) -> AppResult<()>;
}

impl FieldSink for Vec<FieldRecord> {
    fn push(&mut self, record: FieldRecord) -> AppResult<()> {
        Vec::push(self, record);
        Ok(())
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows processed.
    pub processed: usize,
    /// Rows whose definition was found.
    pub found: usize,
    /// Records handed to the sink.
    pub records: usize,
    /// Rows whose definition was not found, in input order.
    pub missing: Vec<ApiKind>,
}

/// Extracts the fields of every kind in order.
pub fn extract_fields(
    kinds: &[ApiKind],
    extractor: &impl FieldExtractor,
    sink: &mut impl FieldSink,
) -> AppResult<RunSummary> {
    let mut summary = RunSummary::default();

    for kind in kinds {
        info!("Processing {}", kind);
        summary.processed += 1;

        let Some(fields) = extractor.extract(kind) else {
            warn!("No definition found for {}, skipping", kind);
            summary.missing.push(kind.clone());
            continue;
        };

        summary.found += 1;
        for field in fields {
            sink.push(field)?;
            summary.records += 1;
        }
    }

    Ok(summary)
}

/// Reads `input`, extracts every kind, and writes the field table to `output`.
pub fn extract_to_csv(
    input: &Path,
    output: &Path,
    extractor: &impl FieldExtractor,
) -> AppResult<RunSummary> {
    let kinds = read_kinds(input)?;
    info!(
        "Extracting {} fields for {} kinds from {}",
        extractor.mode(),
        kinds.len(),
        input.display()
    );

    let mut sink = CsvFieldSink::create(output, extractor.mode())?;
    let summary = extract_fields(&kinds, extractor, &mut sink)?;
    sink.finish()?;

    info!(
        "Field extraction complete: {} records for {}/{} kinds written to {}",
        summary.records,
        summary.found,
        summary.processed,
        output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct Fixed;

    impl FieldExtractor for Fixed {
        fn mode(&self) -> ExtractionMode {
            ExtractionMode::Source
        }

        fn extract(&self, kind: &ApiKind) -> Option<Vec<FieldRecord>> {
            if kind.kind == "Missing" {
                return None;
            }
            Some(
                ["a", "b"]
                    .iter()
                    .map(|name| FieldRecord {
                        group: kind.group.clone(),
                        kind: kind.kind.clone(),
                        path: name.to_string(),
                        ty: "string".into(),
                        tag: name.to_string(),
                        optional: true,
                        extra: String::new(),
                    })
                    .collect(),
            )
        }
    }

    struct Failing;

    impl FieldSink for Failing {
        fn push(&mut self, _record: FieldRecord) -> AppResult<()> {
            Err(AppError::General("disk full".into()))
        }
    }

    #[test]
    fn test_missing_kinds_are_skipped_not_fatal() {
        let kinds = vec![
            ApiKind::new("", "Pod"),
            ApiKind::new("", "Missing"),
            ApiKind::new("apps", "Deployment"),
        ];
        let mut sink: Vec<FieldRecord> = Vec::new();
        let summary = extract_fields(&kinds, &Fixed, &mut sink).unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.records, 4);
        assert_eq!(summary.missing, vec![ApiKind::new("", "Missing")]);

        let order: Vec<(&str, &str)> = sink
            .iter()
            .map(|r| (r.kind.as_str(), r.path.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("Pod", "a"), ("Pod", "b"), ("Deployment", "a"), ("Deployment", "b")]
        );
    }

    #[test]
    fn test_sink_failure_ends_the_run() {
        let kinds = vec![ApiKind::new("", "Pod")];
        let result = extract_fields(&kinds, &Fixed, &mut Failing);
        assert!(matches!(result, Err(AppError::General(_))));
    }
}
