//! Reconciliation of on-disk links between two generations.
//!
//! A run is strictly "classify everything, abort on any problem, else apply
//! everything once":
//!
//! - **[`classify`]** decides, for every path of the new generation, whether a
//!   link must be (re)created, nothing needs doing, or the path is a problem.
//! - **[`find_stale`]** finds links of the old generation that the new one no
//!   longer declares and that are still exactly as the linker left them.
//! - **[`execute`]** applies the resulting transactions (or logs them in dry
//!   run) and reports the directories removals touched.
//! - **[`filter_empty`]** narrows those directories to the ones now empty.
mod classify;
mod execute;
mod stale;
mod sweep;

pub use classify::classify;
pub use execute::execute;
pub use stale::find_stale;
pub use sweep::filter_empty;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{FsOperation, ReconcileError};
use crate::fs::FileSystem;

/// One required filesystem mutation.
///
/// `Remove` carries no source, so two removals are equal exactly when their
/// paths are.
///
/// # Examples
///
/// ```
/// use linker::reconcile::Transaction;
///
/// let link = Transaction::link("/store/f", "/tmp/f");
/// assert_eq!(link.to_string(), "link /store/f /tmp/f");
/// assert_eq!(Transaction::remove("/tmp/f").to_string(), "remove /tmp/f");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Create (or replace) a symbolic link at `on_disk` pointing to `source`.
    Link {
        /// Store location the link points to.
        source: PathBuf,
        /// Managed path.
        on_disk: PathBuf,
    },
    /// Remove the link at `on_disk`.
    Remove {
        /// Managed path.
        on_disk: PathBuf,
    },
}

impl Transaction {
    /// A [`Transaction::Link`].
    #[must_use]
    pub fn link(source: impl Into<PathBuf>, on_disk: impl Into<PathBuf>) -> Self {
        Self::Link {
            source: source.into(),
            on_disk: on_disk.into(),
        }
    }

    /// A [`Transaction::Remove`].
    #[must_use]
    pub fn remove(on_disk: impl Into<PathBuf>) -> Self {
        Self::Remove {
            on_disk: on_disk.into(),
        }
    }

    /// The managed path this transaction acts on.
    #[must_use]
    pub fn on_disk(&self) -> &Path {
        match self {
            Self::Link { on_disk, .. } | Self::Remove { on_disk } => on_disk,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link { source, on_disk } => {
                write!(f, "link {} {}", source.display(), on_disk.display())
            }
            Self::Remove { on_disk } => write!(f, "remove {}", on_disk.display()),
        }
    }
}

/// Output of [`classify`]: the links to apply and the paths that block the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Link transactions, in path order.
    pub transactions: Vec<Transaction>,
    /// Paths whose current state cannot be reconciled safely.
    pub problems: Vec<PathBuf>,
}

impl Plan {
    /// Whether the run may proceed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// What occupies a managed path right now.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OnDisk {
    Absent,
    /// A file, directory or anything else that is not a symbolic link.
    Other,
    /// A symbolic link, with its target resolved against the link's directory.
    Link(PathBuf),
}

/// Inspect `path` without following a final link.
///
/// Relative link targets are joined to the link's parent directory; absolute
/// ones replace it.  No further normalisation is done, so `a/../b` and `b`
/// compare unequal.
fn inspect(fs: &dyn FileSystem, path: &Path) -> Result<OnDisk, ReconcileError> {
    let fail = |source| ReconcileError::fs(FsOperation::Inspect, path, source);

    if !fs.exists(path).map_err(fail)? {
        return Ok(OnDisk::Absent);
    }
    if !fs.is_link(path).map_err(fail)? {
        return Ok(OnDisk::Other);
    }
    let raw = fs.read_link_target(path).map_err(fail)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("/"));
    Ok(OnDisk::Link(parent.join(raw)))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::fs::test_helpers::MemoryFs;

    #[test]
    fn remove_equality_ignores_nothing_but_path() {
        assert_eq!(Transaction::remove("/tmp/f"), Transaction::remove("/tmp/f"));
        assert_ne!(Transaction::remove("/tmp/f"), Transaction::remove("/tmp/g"));
    }

    #[test]
    fn link_equality_depends_on_source() {
        assert_eq!(
            Transaction::link("/store/a", "/tmp/f"),
            Transaction::link("/store/a", "/tmp/f")
        );
        assert_ne!(
            Transaction::link("/store/a", "/tmp/f"),
            Transaction::link("/store/b", "/tmp/f")
        );
        assert_ne!(
            Transaction::link("/store/a", "/tmp/f"),
            Transaction::remove("/tmp/f")
        );
    }

    #[test]
    fn on_disk_is_shared_by_both_variants() {
        assert_eq!(
            Transaction::link("/store/a", "/tmp/f").on_disk(),
            Path::new("/tmp/f")
        );
        assert_eq!(Transaction::remove("/tmp/g").on_disk(), Path::new("/tmp/g"));
    }

    #[test]
    fn inspect_distinguishes_absent_other_and_link() {
        let fs = MemoryFs::new()
            .with_file("/tmp/file")
            .with_dir("/tmp/dir")
            .with_link("/tmp/link", "/store/f");

        assert_eq!(inspect(&fs, Path::new("/tmp/none")).unwrap(), OnDisk::Absent);
        assert_eq!(inspect(&fs, Path::new("/tmp/file")).unwrap(), OnDisk::Other);
        assert_eq!(inspect(&fs, Path::new("/tmp/dir")).unwrap(), OnDisk::Other);
        assert_eq!(
            inspect(&fs, Path::new("/tmp/link")).unwrap(),
            OnDisk::Link(PathBuf::from("/store/f"))
        );
    }

    #[test]
    fn inspect_resolves_relative_targets_against_parent() {
        let fs = MemoryFs::new().with_link("/home/u/.bashrc", "dots/bashrc");
        assert_eq!(
            inspect(&fs, Path::new("/home/u/.bashrc")).unwrap(),
            OnDisk::Link(PathBuf::from("/home/u/dots/bashrc"))
        );
    }

    #[test]
    fn inspect_propagates_metadata_errors() {
        let mut fs = crate::fs::MockFileSystem::new();
        fs.expect_exists().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            ))
        });
        let err = inspect(&fs, Path::new("/root/secret")).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Filesystem {
                operation: FsOperation::Inspect,
                ..
            }
        ));
    }
}
