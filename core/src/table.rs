//! # Tables
//!
//! CSV input and output: the kinds table, the field table, and plain
//! header-plus-rows tables for the post-processing utilities.

use crate::driver::FieldSink;
use crate::error::{AppError, AppResult};
use crate::model::{ApiKind, ExtractionMode, FieldRecord};
use csv::StringRecord;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Header of the kinds table written by the catalog builder.
pub const KINDS_HEADER: [&str; 4] = ["APIGroup", "Kind", "Version", "ImportPath"];

/// Reads the kinds table. Rows that do not fit the expected shape are logged and skipped.
pub fn read_kinds(path: &Path) -> AppResult<Vec<ApiKind>> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Kinds table not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut kinds = Vec::new();
    for (index, row) in reader.deserialize::<ApiKind>().enumerate() {
        match row {
            Ok(kind) => kinds.push(kind),
            Err(e) => warn!("Skipping row {} of {}: {}", index + 1, path.display(), e),
        }
    }
    Ok(kinds)
}

/// Writes the kinds table with its full header.
pub fn write_kinds(path: &Path, kinds: &[ApiKind]) -> AppResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(create_file(path)?);
    writer.write_record(KINDS_HEADER)?;
    for kind in kinds {
        writer.serialize(kind)?;
    }
    writer.flush()?;
    Ok(())
}

/// Streams field records into a CSV table as they are produced.
pub struct CsvFieldSink<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl CsvFieldSink<File> {
    /// Creates (or truncates) `path`, creating parent directories as needed.
    pub fn create(path: &Path, mode: ExtractionMode) -> AppResult<Self> {
        Self::new(create_file(path)?, mode)
    }
}

impl<W: Write> CsvFieldSink<W> {
    /// Wraps `inner` and writes the header for `mode`.
    pub fn new(inner: W, mode: ExtractionMode) -> AppResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(mode.header())?;
        Ok(Self { writer, written: 0 })
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> AppResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))
    }
}

impl<W: Write> FieldSink for CsvFieldSink<W> {
    fn push(&mut self, record: FieldRecord) -> AppResult<()> {
        self.writer.serialize(&record)?;
        self.written += 1;
        Ok(())
    }
}

/// A header row plus data rows, column layout left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// The header row.
    pub header: StringRecord,
    /// Data rows in file order.
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Index of a header column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

/// Reads a whole table into memory.
pub fn read_table(path: &Path) -> AppResult<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let header = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(Table { header, rows })
}

/// Writes a table, header first.
pub fn write_table(path: &Path, table: &Table) -> AppResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(create_file(path)?);
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> AppResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
