use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a consolidation run.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error("Failed to prepare target directory {path:?}")]
    PrepareTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Refusing to reset target {target:?}: it contains the source {source_root:?}")]
    TargetContainsSource { source_root: PathBuf, target: PathBuf },
    #[error("Cannot read source directory {path:?}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid file pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Failed to copy {from:?} to {to:?}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
