use crate::app::error::ConsolidateError;
use crate::app::models::FilterConfig;
use crate::app::paths::{extension, relative_segments};
use globset::{escape, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

fn lowercase_all(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.to_lowercase()).collect()
}

fn segments_excluded(candidate: &Path, source_root: &Path, lowered: &[String]) -> bool {
    relative_segments(candidate, source_root)
        .iter()
        .map(|segment| segment.to_lowercase())
        .any(|segment| lowered.iter().any(|name| segment.starts_with(name.as_str())))
}

/// Excludes a path when any of its segments relative to the source root
/// equals or starts with one of the excluded names, ignoring case.
///
/// This is a string prefix test: `dist` also excludes `distribution`.
#[derive(Debug, Clone)]
pub struct DirExclusion {
    root: PathBuf,
    lowered: Vec<String>,
}

impl DirExclusion {
    pub fn new(root: &Path, excluded_dir_names: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            lowered: lowercase_all(excluded_dir_names),
        }
    }

    pub fn is_excluded(&self, dir: &Path) -> bool {
        segments_excluded(dir, &self.root, &self.lowered)
    }
}

/// File-level inclusion: name patterns first, then the extension allow-list.
#[derive(Debug, Clone)]
pub struct FileFilter {
    literals: HashSet<String>,
    wildcards: GlobSet,
    extensions: Option<HashSet<String>>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Result<Self, ConsolidateError> {
        let mut literals = HashSet::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in &config.excluded_file_patterns {
            if pattern.contains('*') {
                let glob = GlobBuilder::new(&single_wildcard_glob(pattern))
                    .backslash_escape(false)
                    .build()
                    .map_err(|source| ConsolidateError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })?;
                builder.add(glob);
            } else {
                literals.insert(pattern.clone());
            }
        }

        let wildcards = builder
            .build()
            .map_err(|source| ConsolidateError::InvalidPattern {
                pattern: config.excluded_file_patterns.join(", "),
                source,
            })?;

        Ok(Self {
            literals,
            wildcards,
            extensions: config
                .included_extensions
                .as_ref()
                .map(|exts| exts.iter().cloned().collect()),
        })
    }

    pub fn includes(&self, file_name: &OsStr) -> bool {
        let literal = file_name
            .to_str()
            .is_some_and(|name| self.literals.contains(name));
        if literal || self.wildcards.is_match(file_name) {
            return false;
        }
        match &self.extensions {
            Some(allowed) => extension(file_name)
                .to_str()
                .is_some_and(|ext| allowed.contains(ext)),
            None => true,
        }
    }
}

/// Only the first `*` is a wildcard; everything else matches itself.
fn single_wildcard_glob(pattern: &str) -> String {
    match pattern.split_once('*') {
        Some((head, tail)) => format!("{}*{}", escape(head), escape(tail)),
        None => escape(pattern),
    }
}
