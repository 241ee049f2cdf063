use crate::app::error::ConsolidateError;
use crate::app::filters::{DirExclusion, FileFilter};
use crate::app::models::FilterConfig;
use crate::app::paths::display_path;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::PathBuf;

pub struct Scanner {
    root: PathBuf,
    dirs: DirExclusion,
    files: FileFilter,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &FilterConfig) -> Result<Self, ConsolidateError> {
        Ok(Self {
            dirs: DirExclusion::new(&root, &config.excluded_dir_names),
            files: FileFilter::new(config)?,
            root,
        })
    }

    /// Depth-first, pre-order list of every file that passes the filters.
    ///
    /// Children are visited in file name order. Excluded directories are pruned
    /// before they are listed. A directory that cannot be read is logged and
    /// contributes nothing; only a failure at the root is returned.
    pub fn scan(&self) -> Result<Vec<PathBuf>, ConsolidateError> {
        self.check_root()?;

        let mut files = Vec::new();
        if self.dirs.is_excluded(&self.root) {
            log::info!("Skipping excluded directory: {}", display_path(&self.root));
            return Ok(files);
        }

        let exclusion = self.dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false) // Every file is a candidate, hidden or ignored
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if is_dir && exclusion.is_excluded(entry.path()) {
                    log::info!("Skipping excluded directory: {}", display_path(entry.path()));
                    return false;
                }
                true
            })
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.depth() == 0 {
                        continue;
                    }
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if file_type.is_dir() {
                        continue;
                    }
                    if !file_type.is_file() {
                        log::debug!("Skipping special file: {}", display_path(entry.path()));
                        continue;
                    }
                    if self.files.includes(entry.file_name()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => log::warn!("Error reading directory: {}", err),
            }
        }

        Ok(files)
    }

    fn check_root(&self) -> Result<(), ConsolidateError> {
        let unreadable = |source: io::Error| ConsolidateError::SourceUnreadable {
            path: self.root.clone(),
            source,
        };
        if !fs::metadata(&self.root).map_err(unreadable)?.is_dir() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a directory",
            )));
        }
        fs::read_dir(&self.root).map_err(unreadable)?;
        Ok(())
    }
}
