//! Transaction application.
use std::io;
use std::path::{Path, PathBuf};

use super::Transaction;
use crate::error::{FsOperation, ReconcileError};
use crate::fs::FileSystem;
use crate::logging::Log;

/// Apply `transactions` in order.
///
/// In dry-run mode every transaction is logged in its display form
/// (`link <source> <path>` / `remove <path>`) and nothing is touched.
/// Otherwise a link transaction creates missing parent directories, clears
/// whatever link currently occupies the path, and creates the new link; a
/// removal deletes the entry, which must still exist.
///
/// Returns the parent directories of removed entries, in order, for
/// [`filter_empty`](super::filter_empty).  Dry runs return nothing.
///
/// # Errors
///
/// Stops at the first failing transaction.  Transactions already applied are
/// not undone.
pub fn execute(
    fs: &dyn FileSystem,
    log: &dyn Log,
    transactions: &[Transaction],
    dry_run: bool,
) -> Result<Vec<PathBuf>, ReconcileError> {
    let mut touched = Vec::new();

    for transaction in transactions {
        if dry_run {
            log.dry_run(&transaction.to_string());
            continue;
        }

        match transaction {
            Transaction::Link { source, on_disk } => apply_link(fs, source, on_disk)?,
            Transaction::Remove { on_disk } => {
                touched.push(parent_of(on_disk).to_path_buf());
                apply_remove(fs, on_disk)?;
            }
        }
        log.debug(&transaction.to_string());
    }

    Ok(touched)
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("/"))
}

fn apply_link(fs: &dyn FileSystem, source: &Path, on_disk: &Path) -> Result<(), ReconcileError> {
    let parent = parent_of(on_disk);
    fs.make_directories(parent)
        .map_err(|e| ReconcileError::fs(FsOperation::CreateDirectory, parent, e))?;

    // Only a link recorded by the previous generation can be here.
    match fs.remove_entry(on_disk) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ReconcileError::fs(FsOperation::Remove, on_disk, e)),
    }

    fs.create_link(source, on_disk)
        .map_err(|e| ReconcileError::fs(FsOperation::CreateLink, on_disk, e))
}

fn apply_remove(fs: &dyn FileSystem, on_disk: &Path) -> Result<(), ReconcileError> {
    fs.remove_entry(on_disk).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ReconcileError::MissingEntry {
                path: on_disk.to_path_buf(),
            }
        } else {
            ReconcileError::fs(FsOperation::Remove, on_disk, e)
        }
    })
}
