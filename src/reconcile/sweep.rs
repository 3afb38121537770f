//! Post-removal emptiness check.
use std::io;
use std::path::PathBuf;

use crate::error::{FsOperation, ReconcileError};
use crate::fs::FileSystem;

/// Keep the directories of `directories` that are empty right now.
///
/// Order is preserved, repeated directories are reported once, and
/// directories that no longer exist are dropped.  This only reports: nothing
/// is deleted.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be listed.
pub fn filter_empty(
    fs: &dyn FileSystem,
    directories: &[PathBuf],
) -> Result<Vec<PathBuf>, ReconcileError> {
    let mut empty: Vec<PathBuf> = Vec::new();

    for dir in directories {
        if empty.contains(dir) {
            continue;
        }
        match fs.list_directory(dir) {
            Ok(entries) if entries.is_empty() => empty.push(dir.clone()),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ReconcileError::fs(FsOperation::List, dir, e)),
        }
    }

    Ok(empty)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::fs::test_helpers::MemoryFs;

    fn dirs(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn no_directories() {
        assert!(filter_empty(&MemoryFs::new(), &[]).unwrap().is_empty());
    }

    #[test]
    fn keeps_only_empty_directories() {
        let fs = MemoryFs::new()
            .with_dir("/empty_dir")
            .with_file("/full_dir/file_in_dir");
        let result = filter_empty(&fs, &dirs(&["/empty_dir", "/full_dir"])).unwrap();
        assert_eq!(result, dirs(&["/empty_dir"]));
    }

    #[test]
    fn directory_holding_only_a_link_is_not_empty() {
        let fs = MemoryFs::new().with_link("/tmp/f", "/store/f");
        assert!(filter_empty(&fs, &dirs(&["/tmp"])).unwrap().is_empty());
    }

    #[test]
    fn vanished_directory_is_dropped() {
        let fs = MemoryFs::new();
        assert!(filter_empty(&fs, &dirs(&["/gone"])).unwrap().is_empty());
    }

    #[test]
    fn repeated_directory_is_reported_once() {
        let fs = MemoryFs::new().with_dir("/tmp");
        let result = filter_empty(&fs, &dirs(&["/tmp", "/tmp"])).unwrap();
        assert_eq!(result, dirs(&["/tmp"]));
    }

    #[test]
    fn is_idempotent() {
        let fs = MemoryFs::new()
            .with_dir("/a")
            .with_dir("/b")
            .with_file("/c/x");
        let once = filter_empty(&fs, &dirs(&["/c", "/b", "/a", "/gone"])).unwrap();
        let twice = filter_empty(&fs, &once).unwrap();
        assert_eq!(once, dirs(&["/b", "/a"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn listing_errors_propagate() {
        let mut fs = crate::fs::MockFileSystem::new();
        fs.expect_list_directory()
            .returning(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        let err = filter_empty(&fs, &dirs(&["/root"])).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Filesystem {
                operation: FsOperation::List,
                ..
            }
        ));
    }
}
