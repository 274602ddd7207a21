//! Locating the images to convert.

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Default file pattern, matched inside the target directory only.
pub const DEFAULT_PATTERN: &str = "*.png";

/// List the regular files in `directory` whose names match `pattern`.
///
/// Wildcard characters in `directory` itself are taken literally. Hidden files
/// only match when the pattern starts with a dot. A missing directory simply
/// matches nothing. The order is whatever the matcher yields.
pub fn discover(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = if directory.as_os_str().is_empty() {
        "."
    } else {
        directory
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(directory.to_path_buf()))?
    };
    let full = format!("{}/{}", Pattern::escape(dir.trim_end_matches('/')), pattern);
    log::debug!("Searching for images matching {}", full);

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob_with(&full, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        } else {
            log::debug!("Skipping non-file match {}", path.display());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_discover_matches_pngs_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let files = discover(dir.path(), DEFAULT_PATTERN).unwrap();
        assert_eq!(names(&files), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_discover_does_not_recurse() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.png"), b"").unwrap();
        fs::create_dir(dir.path().join("folder.png")).unwrap();
        fs::write(dir.path().join("top.png"), b"").unwrap();

        let files = discover(dir.path(), DEFAULT_PATTERN).unwrap();
        assert_eq!(names(&files), vec!["top.png"]);
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let files = discover(&dir.path().join("nope"), DEFAULT_PATTERN).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_escapes_directory() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("cards[1]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("x.png"), b"").unwrap();

        let files = discover(&odd, DEFAULT_PATTERN).unwrap();
        assert_eq!(names(&files), vec!["x.png"]);
    }

    #[test]
    fn test_discover_custom_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("glow_a.png"), b"").unwrap();
        fs::write(dir.path().join("plain.png"), b"").unwrap();

        let files = discover(dir.path(), "glow_*.png").unwrap();
        assert_eq!(names(&files), vec!["glow_a.png"]);
    }

    #[test]
    fn test_discover_invalid_pattern() {
        let dir = tempdir().unwrap();
        let err = discover(dir.path(), "[*.png").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_discover_skips_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.png"), b"").unwrap();
        fs::write(dir.path().join(".unglow-XyZ123.png"), b"").unwrap();
        fs::write(dir.path().join("shown.png"), b"").unwrap();

        let files = discover(dir.path(), DEFAULT_PATTERN).unwrap();
        assert_eq!(names(&files), vec!["shown.png"]);

        let hidden = discover(dir.path(), ".hidden*").unwrap();
        assert_eq!(names(&hidden), vec![".hidden.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_non_utf8_directory() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"cards\xff"));
        let err = discover(&odd, DEFAULT_PATTERN).unwrap_err();
        assert!(matches!(err, Error::NonUtf8Path(p) if p == odd));
    }
}
