#![deny(missing_docs)]

//! # Fields Command
//!
//! Reads the kinds table and writes one row per discovered field.
//!
//! - `source` mode scans declaration files below `--repo-root`.
//! - `schema` mode walks the OpenAPI bundles in `--openapi-dir`.

use kubefields_core::{
    extract_to_csv, AppResult, ExtractionMode, RunSummary, SchemaLayout, SchemaLocator,
    SourceLayout, SourceLocator,
};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the fields command.
#[derive(clap::Args, Debug, Clone)]
pub struct FieldsArgs {
    /// Kinds table (`APIGroup,Kind[,Version][,ImportPath]`).
    #[clap(long, env = "KUBEFIELDS_INPUT", default_value = "data/api_groups_and_kinds.csv")]
    pub input: PathBuf,

    /// Field table to write.
    #[clap(long, env = "KUBEFIELDS_OUTPUT", default_value = "data/api_fields.csv")]
    pub output: PathBuf,

    /// Extractor to run: `source` or `schema`.
    #[clap(long, default_value = "source")]
    pub mode: ExtractionMode,

    /// Root of the checked-out repository.
    #[clap(long, env = "KUBEFIELDS_REPO_ROOT", default_value = ".")]
    pub repo_root: PathBuf,

    /// Directory of OpenAPI bundles, relative to `--repo-root` unless absolute.
    #[clap(long, env = "KUBEFIELDS_OPENAPI_DIR", default_value = "api/openapi-spec/v3")]
    pub openapi_dir: PathBuf,
}

/// Executes the field extraction.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &FieldsArgs) -> AppResult<()> {
    info!(
        "Running {} extraction of {} under {}",
        args.mode,
        args.input.display(),
        args.repo_root.display()
    );
    let summary = run(args)?;

    println!(
        "Field extraction complete. {} fields from {}/{} kinds saved to {:?}",
        summary.records, summary.found, summary.processed, args.output
    );
    if !summary.missing.is_empty() {
        println!("{} kinds had no definition:", summary.missing.len());
        for kind in &summary.missing {
            println!("  {}", kind);
        }
    }
    Ok(())
}

fn run(args: &FieldsArgs) -> AppResult<RunSummary> {
    match args.mode {
        ExtractionMode::Source => {
            let locator = SourceLocator::new(SourceLayout::rooted_at(&args.repo_root));
            extract_to_csv(&args.input, &args.output, &locator)
        }
        ExtractionMode::Schema => {
            let bundle_dir = args.repo_root.join(&args.openapi_dir);
            let locator = SchemaLocator::new(SchemaLayout::in_dir(bundle_dir));
            extract_to_csv(&args.input, &args.output, &locator)
        }
    }
}
