//! Reverse classification: links the new generation dropped.
use super::{OnDisk, Transaction, inspect};
use crate::error::ReconcileError;
use crate::fs::FileSystem;
use crate::generation::{FileKind, Generation};

/// Find links recorded in `old` but not declared in `new` that are safe to
/// remove.
///
/// A stale path is removed only if it is still a link to the recorded
/// source.  Anything else (already gone, replaced by a file, repointed) is
/// left alone: an orphaned entry is less harmful than deleting something a
/// user changed.  This never reports problems.
///
/// # Errors
///
/// Returns an error if a path cannot be inspected.
pub fn find_stale(
    fs: &dyn FileSystem,
    new: &Generation,
    old: &Generation,
) -> Result<Vec<Transaction>, ReconcileError> {
    let mut removals = Vec::new();

    for (path, recorded) in old.iter().filter(|(path, _)| !new.contains(path)) {
        let owned = match inspect(fs, path)? {
            OnDisk::Link(current) => {
                recorded.kind == FileKind::Link && current == recorded.source
            }
            OnDisk::Absent | OnDisk::Other => false,
        };

        if owned {
            removals.push(Transaction::remove(path));
        } else {
            tracing::debug!("{}: leaving stale entry alone", path.display());
        }
    }

    Ok(removals)
}
