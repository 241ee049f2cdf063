use std::path::PathBuf;

pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", ".git", "dist", "build", ".angular", ".vscode"];
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["*.log", ".env", "*.tmp"];
pub const DEFAULT_TARGET_DIR_NAME: &str = "context-output";

/// Which entries survive the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Compared case-insensitively against every relative path segment, prefix match.
    pub excluded_dir_names: Vec<String>,
    /// Literal file names or single-wildcard patterns, in the order given.
    pub excluded_file_patterns: Vec<String>,
    /// Extensions including the leading dot. `None` lets every extension through.
    pub included_extensions: Option<Vec<String>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_dir_names: to_strings(DEFAULT_EXCLUDED_DIRS),
            excluded_file_patterns: to_strings(DEFAULT_EXCLUDED_FILES),
            included_extensions: None,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// What to do when a single file fails to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyErrorPolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Record the failure and continue with the next file.
    Skip,
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source: PathBuf,
    pub target: PathBuf,
    pub filter: FilterConfig,
    pub on_copy_error: CopyErrorPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlanEntry {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub target: PathBuf,
    pub reason: String,
}

/// Outcome of one run, in enumeration order.
#[derive(Debug, Default)]
pub struct ConsolidationReport {
    pub copied: Vec<CopyPlanEntry>,
    pub failed: Vec<CopyFailure>,
}
