//! [`FileSystem`] implementation over `std::fs`.
use std::io;
use std::path::{Path, PathBuf};

use super::FileSystem;

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

/// `symlink_metadata` that maps an absent entry to `None`.
fn metadata_if_present(path: &Path) -> io::Result<Option<std::fs::Metadata>> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl FileSystem for SystemFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(metadata_if_present(path)?.is_some())
    }

    fn is_link(&self, path: &Path) -> io::Result<bool> {
        Ok(metadata_if_present(path)?.is_some_and(|m| m.file_type().is_symlink()))
    }

    fn read_link_target(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn create_link(&self, target: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }

        #[cfg(windows)]
        {
            if target.is_dir() {
                std::os::windows::fs::symlink_dir(target, link)
            } else {
                std::os::windows::fs::symlink_file(target, link)
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = (target, link);
            Err(io::Error::from(io::ErrorKind::Unsupported))
        }
    }

    /// Remove a file or link.  Directory symlinks on Windows must go through
    /// `remove_dir`, so the raw directory attribute decides.
    fn remove_entry(&self, path: &Path) -> io::Result<()> {
        let meta = std::fs::symlink_metadata(path)?;
        if is_dir_like(&meta) {
            std::fs::remove_dir(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn make_directories(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Check if metadata represents a directory-like entry.
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory symlinks,
/// so we check the raw `FILE_ATTRIBUTE_DIRECTORY` bit instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
