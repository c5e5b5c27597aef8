//! # Declaration File Locator
//!
//! Finds the file declaring a kind's struct. Conventional locations are probed
//! first; only when none of them declares the kind is the whole corpus scanned.

use crate::config::SourceLayout;
use crate::error::{AppError, AppResult};
use crate::locator::glob_sorted;
use crate::model::ApiKind;
use crate::parser::declares_struct;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A declaration file known to declare the requested kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSource {
    /// Path of the file.
    pub path: PathBuf,
    /// Its full text.
    pub content: String,
}

/// Locates struct declarations inside a [`SourceLayout`].
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
    layout: SourceLayout,
}

impl SourceLocator {
    /// Creates a locator over `layout`.
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    /// The layout being searched.
    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    /// Returns the first file declaring `kind`, or `None`.
    ///
    /// Unreadable candidates are logged and skipped; nothing here aborts a run.
    pub fn locate(&self, kind: &ApiKind) -> Option<LocatedSource> {
        let expected = match self.expected_paths(kind) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Could not list conventional files for {}: {}", kind, e);
                Vec::new()
            }
        };

        for path in &expected {
            debug!("Checking file: {}", path.display());
            match read_source(path) {
                Ok(content) if declares_struct(&content, &kind.kind) => {
                    info!("Found {} in {}", kind.kind, path.display());
                    return Some(LocatedSource {
                        path: path.clone(),
                        content,
                    });
                }
                Ok(_) => {}
                Err(e) => warn!("Error reading {}: {}", path.display(), e),
            }
        }

        let found = self.scan(&kind.kind);
        match &found {
            Some(source) => info!(
                "Found {} in {} (broad scan)",
                kind.kind,
                source.path.display()
            ),
            None => warn!("Could not find struct definition for {}", kind),
        }
        found
    }

    /// Conventional files that may declare `kind`, in probe order.
    ///
    /// Import-path hints come first, then the group naming convention.
    /// Only existing files are returned, each once.
    pub fn expected_paths(&self, kind: &ApiKind) -> AppResult<Vec<PathBuf>> {
        let mut candidates = Vec::new();

        if let Some(import_path) = kind.import_path.as_deref().filter(|p| !p.is_empty()) {
            candidates.extend(self.import_path_candidates(import_path)?);
        }

        if kind.is_core_group() {
            candidates.extend(self.layout.core_candidates());
        } else {
            candidates.extend(self.group_candidates(&kind.group)?);
        }

        let mut unique: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for path in candidates {
            if path.is_file() && !unique.contains(&path) {
                unique.push(path);
            }
        }
        Ok(unique)
    }

    fn import_path_candidates(&self, import_path: &str) -> AppResult<Vec<PathBuf>> {
        let import_path = import_path.replace('\\', "/");
        let layout = &self.layout;
        let types_file = &layout.types_file;
        let mut candidates = Vec::new();

        if let Some(rest) = package_suffix(&import_path, &layout.internal_import_prefix) {
            let package = layout.resolve(layout.internal_dir.join(rest));
            candidates.push(package.join(types_file));
            if let Some(parent) = package.parent() {
                candidates.extend(glob_sorted(parent, &format!("*/{}", types_file))?);
            }
        } else if let Some(rest) = package_suffix(&import_path, &layout.staged_import_prefix) {
            candidates.push(layout.resolve(layout.staged_dir.join(rest)).join(types_file));
        }

        Ok(candidates)
    }

    fn group_candidates(&self, group: &str) -> AppResult<Vec<PathBuf>> {
        let segment = group.split('.').next().unwrap_or(group);
        let types_file = &self.layout.types_file;
        let mut candidates = Vec::new();

        let internal = self.layout.resolve(self.layout.internal_dir.join(segment));
        if internal.is_dir() {
            candidates.push(internal.join(types_file));
        }

        let staged = self.layout.resolve(self.layout.staged_dir.join(segment));
        if staged.is_dir() {
            candidates.extend(glob_sorted(&staged, &format!("*/{}", types_file))?);
        }

        Ok(candidates)
    }

    /// Walks every scan root for a file declaring `name`.
    ///
    /// Excluded paths and files that are not valid text are skipped silently.
    fn scan(&self, name: &str) -> Option<LocatedSource> {
        for root in &self.layout.scan_roots {
            let walker = WalkDir::new(self.layout.resolve(root)).sort_by_file_name();

            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if !entry.file_type().is_file() || !self.has_source_extension(path) {
                    continue;
                }

                let relative = path.strip_prefix(&self.layout.root).unwrap_or(path);
                if self.layout.is_excluded(relative) {
                    continue;
                }

                match read_source(path) {
                    Ok(content) if declares_struct(&content, name) => {
                        return Some(LocatedSource {
                            path: path.to_path_buf(),
                            content,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Skipping {}: {}", path.display(), e),
                }
            }
        }
        None
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.layout.extension.as_str())
    }
}

/// The part of `import_path` below `prefix`, if it lies below it.
fn package_suffix<'a>(import_path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = import_path.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/')
}

/// Reads a declaration file, reporting undecodable content distinctly.
fn read_source(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => AppError::General(format!(
            "{} is not valid UTF-8 text",
            path.display()
        )),
        _ => AppError::Io(e),
    })
}
