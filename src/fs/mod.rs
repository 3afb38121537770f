//! Filesystem capability used by the reconciler.
//!
//! Every read and write the linker performs goes through [`FileSystem`], so
//! classification and execution can be exercised against an in-memory fake
//! instead of the real disk.
mod system;

pub use system::SystemFs;

use std::io;
use std::path::{Path, PathBuf};

/// Narrow interface over the filesystem operations the linker needs.
///
/// None of the inspection methods follow a final symbolic link: a broken link
/// still "exists" and "is a link".
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Whether any entry (file, directory or link) exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata lookup fails for a reason other than
    /// the entry being absent.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Whether the entry at `path` is a symbolic link.  `false` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata lookup fails for a reason other than
    /// the entry being absent.
    fn is_link(&self, path: &Path) -> io::Result<bool>;

    /// Raw target of the symbolic link at `path`, exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is absent or not a link.
    fn read_link_target(&self, path: &Path) -> io::Result<PathBuf>;

    /// Entries directly inside the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is absent or not a directory.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a symbolic link at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry already exists at `link` or its parent
    /// directory is missing.
    fn create_link(&self, target: &Path, link: &Path) -> io::Result<()>;

    /// Remove the file or symbolic link at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error with [`io::ErrorKind::NotFound`] if nothing exists at
    /// `path`, or another error if removal fails.
    fn remove_entry(&self, path: &Path) -> io::Result<()>;

    /// Create the directory at `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a component exists and is not a directory, or
    /// creation fails.
    fn make_directories(&self, path: &Path) -> io::Result<()>;
}
