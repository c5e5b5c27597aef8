#![deny(missing_docs)]

//! # Table Commands
//!
//! `filter-lists` and `sort`: rewrites of an existing CSV table.

use kubefields_core::postprocess::{filter_lists_file, sort_file};
use kubefields_core::AppResult;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the filter-lists command.
#[derive(clap::Args, Debug, Clone)]
pub struct FilterListsArgs {
    /// Table to filter.
    #[clap(long, default_value = "data/api_groups_and_kinds.csv")]
    pub input: PathBuf,

    /// Where to write the result. Defaults to rewriting `--input` in place.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the sort command.
#[derive(clap::Args, Debug, Clone)]
pub struct SortArgs {
    /// Table to sort.
    #[clap(long, default_value = "kubernetes_api_validations_final.csv")]
    pub input: PathBuf,

    /// Where to write the sorted table.
    #[clap(long, default_value = "kubernetes_api_validations_sorted.csv")]
    pub output: PathBuf,
}

/// Executes the list filter.
pub fn execute_filter(args: &FilterListsArgs) -> AppResult<()> {
    let output = args.output.as_ref().unwrap_or(&args.input);
    info!("Filtering list kinds from {}", args.input.display());
    let remaining = filter_lists_file(&args.input, output)?;
    println!(
        "Removed all *List kinds. {} entries remaining in {:?}",
        remaining, output
    );
    Ok(())
}

/// Executes the sort.
pub fn execute_sort(args: &SortArgs) -> AppResult<()> {
    info!("Sorting {}", args.input.display());
    let rows = sort_file(&args.input, &args.output)?;
    println!("Wrote {} rows to {:?}", rows, args.output);
    println!(
        "Sorting order: Core API Group first, then alphabetical, with wildcard (*) entries last"
    );
    Ok(())
}
