#![deny(missing_docs)]

//! # Kind Catalog
//!
//! Builds the kinds table consumed by the field extractors.
//!
//! A kind is a struct whose body opens with an embedded `metav1.TypeMeta`.
//! `*List` companions are left out. The group comes from the `GroupName`
//! constant of a sibling `register.go`, falling back to the directory name.

use crate::config::SourceLayout;
use crate::error::AppResult;
use crate::locator::glob_sorted;
use crate::model::ApiKind;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Version reported for files outside any `v<N>` directory.
pub const INTERNAL_VERSION: &str = "internal";

/// Directory name of the core group, which has an empty group name.
const CORE_DIR: &str = "core";

/// Suffix of list companion kinds.
pub const LIST_SUFFIX: &str = "List";

fn kind_re() -> &'static Regex {
    static KIND_RE: OnceLock<Regex> = OnceLock::new();
    KIND_RE.get_or_init(|| {
        Regex::new(r"type\s+(\w+)\s+struct\s*\{\s*metav1\.TypeMeta").expect("Invalid regex")
    })
}

fn group_name_re() -> &'static Regex {
    static GROUP_RE: OnceLock<Regex> = OnceLock::new();
    GROUP_RE.get_or_init(|| {
        Regex::new(r#"const\s+GroupName\s*=\s*"([^"]*)""#).expect("Invalid regex")
    })
}

fn version_re() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| Regex::new(r"^v\d+").expect("Invalid regex"))
}

/// Names of top-level kinds declared in `content`, excluding list companions.
pub fn kinds_in_source(content: &str) -> Vec<String> {
    kind_re()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.ends_with(LIST_SUFFIX))
        .map(str::to_string)
        .collect()
}

/// The `GroupName` constant declared in a `register.go` file.
pub fn group_name_in_register(content: &str) -> Option<String> {
    group_name_re()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Scans the layout and returns one row per distinct (group, kind), sorted.
pub fn build_catalog(layout: &SourceLayout) -> AppResult<Vec<ApiKind>> {
    let root = &layout.root;
    let types_file = &layout.types_file;
    let patterns = [
        (&layout.internal_dir, format!("*/{}", types_file)),
        (&layout.internal_dir, format!("*/v*/{}", types_file)),
        (&layout.staged_dir, format!("*/v*/{}", types_file)),
    ];

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (dir, pattern) in &patterns {
        for path in glob_sorted(&root.join(dir), pattern)? {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let Some(content) = read_lossy(&path) else {
                continue;
            };

            let group = group_for(layout, &path, relative);
            let version = version_for(relative);
            let import_path = import_path_for(layout, relative);

            for kind in kinds_in_source(&content) {
                if seen.insert((group.clone(), kind.clone())) {
                    debug!("Catalogued {}/{} from {}", group, kind, relative.display());
                    rows.push(ApiKind {
                        group: group.clone(),
                        kind,
                        version: Some(version.clone()),
                        import_path: Some(import_path.clone()),
                    });
                }
            }
        }
    }

    rows.sort_by(|a, b| (&a.group, &a.kind).cmp(&(&b.group, &b.kind)));
    info!("Catalogued {} unique API kinds", rows.len());
    Ok(rows)
}

fn read_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            None
        }
    }
}

/// Group of a declaration file: its sibling `register.go`, else the directory below the API root.
fn group_for(layout: &SourceLayout, path: &Path, relative: &Path) -> String {
    if let Some(register) = path.parent().map(|dir| dir.join("register.go")) {
        if register.is_file() {
            if let Some(group) = read_lossy(&register).as_deref().and_then(group_name_in_register)
            {
                return group;
            }
        }
    }

    match group_dir(layout, relative) {
        Some(dir) if dir == CORE_DIR => String::new(),
        Some(dir) => dir,
        None => String::new(),
    }
}

/// First directory below whichever API root contains `relative`.
fn group_dir(layout: &SourceLayout, relative: &Path) -> Option<String> {
    [&layout.internal_dir, &layout.staged_dir]
        .into_iter()
        .find_map(|api_dir| relative.strip_prefix(api_dir).ok())
        .and_then(|rest| rest.components().next())
        .map(|first| first.as_os_str().to_string_lossy().into_owned())
}

/// First `v<N>...` path segment, else [`INTERNAL_VERSION`].
fn version_for(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .find(|part| version_re().is_match(part))
        .unwrap_or(INTERNAL_VERSION)
        .to_string()
}

/// Go import path of the package holding `relative`.
fn import_path_for(layout: &SourceLayout, relative: &Path) -> String {
    let roots = [
        (&layout.internal_dir, &layout.internal_import_prefix),
        (&layout.staged_dir, &layout.staged_import_prefix),
    ];

    for (api_dir, prefix) in roots {
        let Ok(rest) = relative.strip_prefix(api_dir) else {
            continue;
        };
        let parts: Vec<String> = rest
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        return match parts.as_slice() {
            [group, version, _, ..] if version.starts_with('v') => {
                format!("{}/{}/{}", prefix, group, version)
            }
            [group, ..] => format!("{}/{}", prefix, group),
            [] => String::new(),
        };
    }
    String::new()
}
