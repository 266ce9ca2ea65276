//! Source enumerator: lists the event files of a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EntryOrder;
use crate::error::{ExtractError, Result};

/// List every file entry of `dir`.
///
/// Sub-directories are skipped. With [`EntryOrder::Listing`] the raw
/// `read_dir` order is kept, which is platform dependent.
pub fn list_event_files(dir: &Path, order: EntryOrder) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ExtractError::from_read(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ExtractError::from_read(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            log::debug!("Skipping sub-directory {:?}", path);
            continue;
        }
        files.push(path);
    }

    if order == EntryOrder::Sorted {
        files.sort();
    }

    log::debug!("Found {} event file(s) in {:?}", files.len(), dir);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = list_event_files(&missing, EntryOrder::Sorted).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn test_sorted_listing_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("a.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("c.json"), "[]").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let files = list_event_files(temp_dir.path(), EntryOrder::Sorted).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_listing_order_keeps_every_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("2.json"), "[]").unwrap();

        let mut files = list_event_files(temp_dir.path(), EntryOrder::Listing).unwrap();
        assert_eq!(files.len(), 2);
        files.sort();
        assert!(files[0].ends_with("1.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores mode bits; nothing to check then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = list_event_files(&locked, EntryOrder::Sorted);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(ExtractError::PermissionDenied { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = list_event_files(temp_dir.path(), EntryOrder::Sorted).unwrap();
        assert!(files.is_empty());
    }
}
