#![deny(missing_docs)]

//! # kubefields CLI
//!
//! Command Line Interface for scraping API metadata into CSV tables.
//!
//! Supported Commands:
//! - `kinds`: Source tree -> kinds table.
//! - `fields`: Kinds table -> field table (from source or OpenAPI bundles).
//! - `filter-lists`: Drops `*List` kinds from a table.
//! - `sort`: Reorders a table by group priority.
//! - `benchmark`: Benchmark log -> CSV rows.

use clap::{Parser, Subcommand};
use kubefields_core::AppResult;
use tracing_subscriber::EnvFilter;

mod benchmark;
mod fields;
mod kinds;
mod tables;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Kubernetes API metadata scraper")]
struct Cli {
    /// Log filter directive (e.g. `info`, `kubefields_core=debug`).
    #[clap(long, global = true, env = "KUBEFIELDS_LOG", default_value = "info")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the API group / kind table from a source tree.
    Kinds(kinds::KindsArgs),
    /// Extract the fields of every kind in a kinds table.
    Fields(fields::FieldsArgs),
    /// Remove list companion kinds from a table.
    FilterLists(tables::FilterListsArgs),
    /// Sort a table: Core group first, wildcard group last.
    Sort(tables::SortArgs),
    /// Convert benchmark output into CSV rows.
    Benchmark(benchmark::BenchmarkArgs),
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Commands::Kinds(args) => kinds::execute(args)?,
        Commands::Fields(args) => fields::execute(args)?,
        Commands::FilterLists(args) => tables::execute_filter(args)?,
        Commands::Sort(args) => tables::execute_sort(args)?,
        Commands::Benchmark(args) => benchmark::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fields_mode_parses() {
        let cli = Cli::try_parse_from(["kubefields", "fields", "--mode", "schema"]).unwrap();
        match cli.command {
            Commands::Fields(args) => {
                assert_eq!(args.mode, kubefields_core::ExtractionMode::Schema)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["kubefields", "fields", "--mode", "yaml"]).is_err());
    }
}
