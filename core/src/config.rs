//! # Layout Configuration
//!
//! Where declaration files and schema bundles live inside a checked-out
//! repository. Every path is relative to `root` unless stated otherwise.

use std::path::{Path, PathBuf};

/// Layout of the declaration-file corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Repository root all other paths hang off.
    pub root: PathBuf,
    /// Internal (unversioned) API packages, one directory per group.
    pub internal_dir: PathBuf,
    /// Staged versioned API packages, `<group>/<version>/` below it.
    pub staged_dir: PathBuf,
    /// Roots recursively scanned when no conventional file declares a kind.
    pub scan_roots: Vec<PathBuf>,
    /// File name holding a package's type declarations.
    pub types_file: String,
    /// Extension of declaration files considered by the broad scan.
    pub extension: String,
    /// Substrings that exclude a file from the broad scan.
    pub excluded_fragments: Vec<String>,
    /// Import path of `internal_dir`.
    pub internal_import_prefix: String,
    /// Import path of `staged_dir`.
    pub staged_import_prefix: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

impl SourceLayout {
    /// The conventional layout below `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let internal_dir = PathBuf::from("pkg/apis");
        let staged_dir = PathBuf::from("staging/src/k8s.io/api");
        Self {
            root: root.into(),
            scan_roots: vec![internal_dir.clone(), staged_dir.clone()],
            internal_dir,
            staged_dir,
            types_file: "types.go".to_string(),
            extension: "go".to_string(),
            excluded_fragments: vec!["test".to_string(), "generated".to_string()],
            internal_import_prefix: "k8s.io/kubernetes/pkg/apis".to_string(),
            staged_import_prefix: "k8s.io/api".to_string(),
        }
    }

    /// Resolves a repository-relative path against `root`.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Conventional files declaring the core group's kinds.
    pub fn core_candidates(&self) -> Vec<PathBuf> {
        vec![
            self.resolve(self.internal_dir.join("core").join(&self.types_file)),
            self.resolve(self.staged_dir.join("core").join("v1").join(&self.types_file)),
        ]
    }

    /// Whether a repository-relative path is excluded from the broad scan.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let text = relative.to_string_lossy();
        self.excluded_fragments
            .iter()
            .any(|fragment| text.contains(fragment.as_str()))
    }
}

/// Layout of the OpenAPI schema bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLayout {
    /// Directory holding the `*_openapi.json` bundles.
    pub bundle_dir: PathBuf,
    /// Prefix of canonical schema identifiers.
    pub id_prefix: String,
}

impl Default for SchemaLayout {
    fn default() -> Self {
        Self::in_dir("api/openapi-spec/v3")
    }
}

impl SchemaLayout {
    /// Bundles stored directly in `bundle_dir`.
    pub fn in_dir(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            id_prefix: "io.k8s.api".to_string(),
        }
    }
}
