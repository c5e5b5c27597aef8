#![deny(missing_docs)]

//! # Benchmark Command
//!
//! Converts validation benchmark output into CSV rows.

use kubefields_core::benchmark::convert_file;
use kubefields_core::AppResult;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the benchmark command.
#[derive(clap::Args, Debug, Clone)]
pub struct BenchmarkArgs {
    /// Benchmark log to read.
    pub input: PathBuf,

    /// CSV file to write (`option,degree,fail,nodeCount,cost`, no header).
    pub output: PathBuf,
}

/// Executes the conversion.
pub fn execute(args: &BenchmarkArgs) -> AppResult<()> {
    info!("Converting benchmark log {}", args.input.display());
    let rows = convert_file(&args.input, &args.output)?;
    println!(
        "Benchmark data extracted from {:?} to {:?} ({} rows)",
        args.input, args.output, rows
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_benchmark_conversion() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bench.log");
        let output = dir.path().join("bench.csv");
        fs::write(
            &input,
            "BenchmarkValidateUpdate_ChangeAtLeaf/Option:_2_degree:_8_fail:_false_nodeCount:_73-8   \t 1000\t 99.5 ns/op\n",
        )
        .unwrap();

        execute(&BenchmarkArgs {
            input,
            output: output.clone(),
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "2,8,false,73,99.5\n");
    }

    #[test]
    fn test_missing_log_fails() {
        let dir = tempdir().unwrap();
        let result = execute(&BenchmarkArgs {
            input: dir.path().join("absent.log"),
            output: dir.path().join("out.csv"),
        });
        assert!(result.is_err());
    }
}
