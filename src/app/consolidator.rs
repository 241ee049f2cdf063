use crate::app::error::ConsolidateError;
use crate::app::models::{
    ConsolidationReport, CopyErrorPolicy, CopyFailure, CopyPlanEntry, FilterConfig,
};
use crate::app::paths::{display_path, split_extension};
use crate::app::scanner::Scanner;
use filetime::{set_file_times, FileTime};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resets `target_root`, then copies every file the scan of `source_root`
/// yields into it, renaming on collision.
///
/// Files are handled strictly in enumeration order, so the `_<N>` suffixes for
/// a shared name follow that order.
pub fn consolidate(
    source_root: &Path,
    target_root: &Path,
    config: &FilterConfig,
    on_copy_error: CopyErrorPolicy,
) -> Result<ConsolidationReport, ConsolidateError> {
    let scanner = Scanner::new(source_root.to_path_buf(), config)?;

    prepare_target(source_root, target_root)?;

    log::info!("Scanning for files...");
    let files = scanner.scan()?;

    log::info!("Copying files...");
    copy_files(files, target_root, on_copy_error)
}

/// Copies `files` in order into `target_root`, each under the first free name.
fn copy_files(
    files: Vec<PathBuf>,
    target_root: &Path,
    on_copy_error: CopyErrorPolicy,
) -> Result<ConsolidationReport, ConsolidateError> {
    let mut report = ConsolidationReport::default();
    for source in files {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = resolve_target_path(target_root, file_name);

        match fs::copy(&source, &target) {
            Ok(_) => {
                preserve_times(&source, &target);
                log::info!("Copied: {} -> {}", display_path(&source), display_path(&target));
                report.copied.push(CopyPlanEntry { source, target });
            }
            Err(err) => {
                discard_partial(&target);
                match on_copy_error {
                    CopyErrorPolicy::Abort => {
                        return Err(ConsolidateError::Copy {
                            from: source,
                            to: target,
                            source: err,
                        });
                    }
                    CopyErrorPolicy::Skip => {
                        log::error!(
                            "Failed to copy {} -> {}: {}",
                            display_path(&source),
                            display_path(&target),
                            err
                        );
                        report.failed.push(CopyFailure {
                            source,
                            target,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(report)
}

/// Removes whatever is at `target_root` and recreates it as an empty directory.
fn prepare_target(source_root: &Path, target_root: &Path) -> Result<(), ConsolidateError> {
    if source_root.starts_with(target_root) {
        return Err(ConsolidateError::TargetContainsSource {
            source_root: source_root.to_path_buf(),
            target: target_root.to_path_buf(),
        });
    }

    let prepare = |source: io::Error| ConsolidateError::PrepareTarget {
        path: target_root.to_path_buf(),
        source,
    };

    match fs::symlink_metadata(target_root) {
        Ok(metadata) => {
            log::info!("Removing existing target directory");
            if metadata.is_dir() {
                fs::remove_dir_all(target_root).map_err(prepare)?;
            } else {
                fs::remove_file(target_root).map_err(prepare)?;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(prepare(err)),
    }

    fs::create_dir_all(target_root).map_err(prepare)
}

/// First free path for `file_name` in `target_root`: the name itself, then
/// `<stem>_1<ext>`, `<stem>_2<ext>`, ...
pub fn resolve_target_path(target_root: &Path, file_name: &OsStr) -> PathBuf {
    resolve_with(target_root, file_name, |candidate| {
        fs::symlink_metadata(candidate).is_ok()
    })
}

fn resolve_with(
    target_root: &Path,
    file_name: &OsStr,
    taken: impl Fn(&Path) -> bool,
) -> PathBuf {
    let mut candidate = target_root.join(file_name);
    let mut counter: u64 = 1;
    while taken(&candidate) {
        candidate = target_root.join(suffixed_name(file_name, counter));
        counter += 1;
    }
    candidate
}

/// `a.txt` + 2 => `a_2.txt`
fn suffixed_name(file_name: &OsStr, counter: u64) -> OsString {
    let (stem, ext) = split_extension(file_name);
    let mut name = stem.to_os_string();
    name.push(format!("_{}", counter));
    name.push(ext);
    name
}

/// Carries access and modification times over. Not every filesystem allows
/// it, so a failure only warns.
fn preserve_times(source: &Path, target: &Path) {
    let applied = fs::metadata(source).and_then(|metadata| {
        set_file_times(
            target,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )
    });
    if let Err(err) = applied {
        log::warn!("Could not keep timestamps on {}: {}", display_path(target), err);
    }
}

/// Removes whatever a failed copy left behind so the name stays free.
fn discard_partial(target: &Path) {
    match fs::remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => log::warn!(
            "Could not remove partial copy {}: {}",
            display_path(target),
            err
        ),
    }
}
