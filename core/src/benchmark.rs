//! # Benchmark Log Conversion
//!
//! Turns `go test -bench` output of the change-at-leaf validation benchmark
//! into `option,degree,fail,nodeCount,cost` lines.

use crate::error::AppResult;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

fn bench_re() -> &'static Regex {
    static BENCH_RE: OnceLock<Regex> = OnceLock::new();
    BENCH_RE.get_or_init(|| {
        Regex::new(
            r"BenchmarkValidateUpdate_ChangeAtLeaf/Option:_(\d+)_degree:_(\d+)_fail:_(true|false)_nodeCount:_(\d+)(?:-\d+)?\s+(\d+)\s+([\d.]+)\s+ns/op",
        )
        .expect("Invalid regex")
    })
}

/// One parsed benchmark result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRow {
    /// Validation option under test.
    pub option: String,
    /// Tree fan-out.
    pub degree: String,
    /// Whether the run was expected to fail validation.
    pub fail: String,
    /// Number of nodes in the tree.
    pub node_count: String,
    /// Nanoseconds per operation, as printed.
    pub cost: String,
}

impl BenchmarkRow {
    /// Cells in `option,degree,fail,nodeCount,cost` order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.option.as_str(),
            self.degree.as_str(),
            self.fail.as_str(),
            self.node_count.as_str(),
            self.cost.as_str(),
        ]
    }

    /// Renders the row as `option,degree,fail,nodeCount,cost`.
    pub fn to_line(&self) -> String {
        self.cells().join(",")
    }
}

/// Parses one log line; lines that are not benchmark results yield `None`.
pub fn parse_line(line: &str) -> Option<BenchmarkRow> {
    let caps = bench_re().captures(line)?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    Some(BenchmarkRow {
        option: group(1)?,
        degree: group(2)?,
        fail: group(3)?,
        node_count: group(4)?,
        cost: group(6)?,
    })
}

/// Parses every matching line of a log, in order.
pub fn parse_log(log: &str) -> Vec<BenchmarkRow> {
    log.lines().filter_map(parse_line).collect()
}

/// Converts the log at `input` into `output`. Returns the number of rows written.
pub fn convert_file(input: &Path, output: &Path) -> AppResult<usize> {
    let log = fs::read_to_string(input)?;
    let rows = parse_log(&log);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)?;
    for row in &rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;

    info!(
        "Benchmark data extracted from {} to {} ({} rows)",
        input.display(),
        output.display(),
        rows.len()
    );
    Ok(rows.len())
}
