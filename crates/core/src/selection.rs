//! File selection expansion
//!
//! Expands a selection's include/exclude patterns against its base
//! directory into the concrete list of relative file paths.

use crate::error::{Error, Result};
use crate::job::FileSelection;
use crate::pattern;
use walkdir::WalkDir;

/// Expand a selection into relative file paths, in scan order.
///
/// Fails with a scan error when the base directory is missing or
/// unreadable; callers decide whether that aborts the job.
pub fn expand(selection: &FileSelection) -> Result<Vec<String>> {
    let dir = &selection.dir;
    if !dir.is_dir() {
        return Err(Error::Scan {
            dir: dir.clone(),
            message: "base directory does not exist or is not a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| Error::Scan {
            dir: dir.clone(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).map_err(|e| Error::Scan {
            dir: dir.clone(),
            message: e.to_string(),
        })?;
        let relative = relative.to_string_lossy().replace('\\', "/");
        if is_selected(&relative, selection) {
            files.push(relative);
        }
    }
    Ok(files)
}

/// Empty includes select everything; excludes always win.
fn is_selected(path: &str, selection: &FileSelection) -> bool {
    let included = selection.include.is_empty()
        || selection.include.iter().any(|p| pattern::matches(p, path));
    if !included {
        return false;
    }
    !selection.exclude.iter().any(|p| pattern::matches(p, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn selection(dir: &Path, include: &[&str], exclude: &[&str]) -> FileSelection {
        FileSelection {
            dir: dir.to_path_buf(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn populate(dir: &Path) {
        fs::create_dir_all(dir.join("css")).unwrap();
        fs::create_dir_all(dir.join("js/vendor")).unwrap();
        fs::write(dir.join("index.html"), "<html></html>").unwrap();
        fs::write(dir.join("css/app.css"), "body {}").unwrap();
        fs::write(dir.join("js/app.js"), "let x;").unwrap();
        fs::write(dir.join("js/vendor/lib.js"), "let y;").unwrap();
    }

    #[test]
    fn test_empty_includes_select_everything() {
        let tmp = tempfile::tempdir().unwrap();
        populate(tmp.path());

        let mut files = expand(&selection(tmp.path(), &[], &[])).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec!["css/app.css", "index.html", "js/app.js", "js/vendor/lib.js"]
        );
    }

    #[test]
    fn test_include_pattern_filters() {
        let tmp = tempfile::tempdir().unwrap();
        populate(tmp.path());

        let mut files = expand(&selection(tmp.path(), &["**/*.js"], &[])).unwrap();
        files.sort();
        assert_eq!(files, vec!["js/app.js", "js/vendor/lib.js"]);
    }

    #[test]
    fn test_exclude_overrides_include() {
        let tmp = tempfile::tempdir().unwrap();
        populate(tmp.path());

        let mut files =
            expand(&selection(tmp.path(), &["**/*.js"], &["js/vendor/**"])).unwrap();
        files.sort();
        assert_eq!(files, vec!["js/app.js"]);
    }

    #[test]
    fn test_missing_dir_is_scan_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let err = expand(&selection(&missing, &[], &[])).unwrap_err();
        assert!(err.is_scan());
    }
}
