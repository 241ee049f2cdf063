use pathdiff::diff_paths;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Lexically resolves `.` and `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Anchors `path` at `base` when relative, then normalizes it.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Forward-slash rendering used in log output.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Splits `path` relative to `root` into its segments.
///
/// The root itself yields a single empty segment, so an empty excluded name
/// still matches it.
pub fn relative_segments(path: &Path, root: &Path) -> Vec<String> {
    let relative = diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    let segments: Vec<String> = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        vec![String::new()]
    } else {
        segments
    }
}

/// Splits a file name into stem and extension, the extension keeping its
/// leading dot. Works on the raw name, so non-UTF-8 names survive unchanged.
///
/// Leading dots belong to the name: `.env` has no extension, `.eslintrc.json`
/// has `.json`, `archive.` has `.`.
pub fn split_extension(file_name: &OsStr) -> (&OsStr, &OsStr) {
    let bytes = file_name.as_encoded_bytes();
    let body_start = bytes.iter().take_while(|&&b| b == b'.').count();
    match bytes[body_start..].iter().rposition(|&b| b == b'.') {
        Some(idx) => {
            let (stem, ext) = bytes.split_at(body_start + idx);
            // SAFETY: both halves come from a valid encoded `OsStr` split right
            // before an ASCII `.`.
            unsafe {
                (
                    OsStr::from_encoded_bytes_unchecked(stem),
                    OsStr::from_encoded_bytes_unchecked(ext),
                )
            }
        }
        None => (file_name, OsStr::new("")),
    }
}

/// Extension of a file name including the leading dot, or `""`.
pub fn extension(file_name: &OsStr) -> &OsStr {
    split_extension(file_name).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_dot_segments() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn absolutize_joins_relative_paths_onto_base() {
        let base = Path::new("/work/project");
        assert_eq!(
            absolutize(Path::new("../out"), base),
            PathBuf::from("/work/out")
        );
        assert_eq!(absolutize(Path::new("/tmp/x"), base), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn display_path_uses_forward_slashes() {
        assert_eq!(display_path(Path::new(r"a\b\c.txt")), "a/b/c.txt");
    }

    #[test]
    fn relative_segments_of_nested_path() {
        let root = Path::new("/src");
        assert_eq!(
            relative_segments(Path::new("/src/sub/dist"), root),
            vec!["sub".to_string(), "dist".to_string()]
        );
        assert_eq!(relative_segments(root, root), vec![String::new()]);
    }

    #[test]
    fn extension_matches_dotted_name_rules() {
        let ext = |name: &str| extension(OsStr::new(name)).to_os_string();
        assert_eq!(ext("app.ts"), ".ts");
        assert_eq!(ext("archive.tar.gz"), ".gz");
        assert_eq!(ext("Makefile"), "");
        assert_eq!(ext(".env"), "");
        assert_eq!(ext(".eslintrc.json"), ".json");
        assert_eq!(ext("trailing."), ".");
        assert_eq!(ext(".."), "");
    }

    #[test]
    fn split_extension_keeps_stem_intact() {
        let split = |name: &'static str| split_extension(OsStr::new(name));
        assert_eq!(split("a.txt"), (OsStr::new("a"), OsStr::new(".txt")));
        assert_eq!(
            split("archive.tar.gz"),
            (OsStr::new("archive.tar"), OsStr::new(".gz"))
        );
        assert_eq!(split(".env"), (OsStr::new(".env"), OsStr::new("")));
    }

    #[cfg(unix)]
    #[test]
    fn split_extension_preserves_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.txt");
        let (stem, ext) = split_extension(name);
        assert_eq!(stem.as_bytes(), b"caf\xe9");
        assert_eq!(ext, OsStr::new(".txt"));
    }
}
