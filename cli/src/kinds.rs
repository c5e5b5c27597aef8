#![deny(missing_docs)]

//! # Kinds Command
//!
//! Scans a source tree for API kinds and writes the kinds table.

use kubefields_core::{build_catalog, write_kinds, AppResult, SourceLayout};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the kinds command.
#[derive(clap::Args, Debug, Clone)]
pub struct KindsArgs {
    /// Root of the checked-out repository.
    #[clap(long, env = "KUBEFIELDS_REPO_ROOT", default_value = ".")]
    pub repo_root: PathBuf,

    /// Kinds table to write.
    #[clap(long, default_value = "data/api_groups_and_kinds.csv")]
    pub output: PathBuf,
}

/// Executes the catalog scan.
pub fn execute(args: &KindsArgs) -> AppResult<()> {
    info!("Scanning {} for API kinds", args.repo_root.display());
    let layout = SourceLayout::rooted_at(&args.repo_root);
    let kinds = build_catalog(&layout)?;
    write_kinds(&args.output, &kinds)?;

    println!(
        "Extracted {} unique API kinds to {:?}",
        kinds.len(),
        args.output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_kinds_table_written() {
        let dir = tempdir().unwrap();
        let types = dir.path().join("staging/src/k8s.io/api/batch/v1/types.go");
        fs::create_dir_all(types.parent().unwrap()).unwrap();
        fs::write(&types, "type Job struct {\n\tmetav1.TypeMeta\n}\n").unwrap();

        let args = KindsArgs {
            repo_root: dir.path().to_path_buf(),
            output: dir.path().join("data/kinds.csv"),
        };
        execute(&args).unwrap();

        assert_eq!(
            fs::read_to_string(&args.output).unwrap(),
            "APIGroup,Kind,Version,ImportPath\nbatch,Job,v1,k8s.io/api/batch/v1\n"
        );
    }
}
