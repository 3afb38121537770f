//! Forward classification of the new generation against disk.
use super::{OnDisk, Plan, Transaction, inspect};
use crate::error::ReconcileError;
use crate::fs::FileSystem;
use crate::generation::{FileInfo, FileKind, Generation};

/// Verdict for a single managed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// (Re)create the link.
    Apply,
    /// The link is already correct and may be adopted.
    Skip,
    /// The path is in a state the linker must not touch.
    Problem,
}

/// Check every path of `new` against disk and `old`.
///
/// Produces a [`Transaction::Link`] for each path that is absent or still
/// holds exactly the link recorded in `old`, nothing for a recorded link that
/// already points at the desired source, and a problem for every path
/// whose state is foreign or ambiguous.  A link that already points at the
/// desired source but was not recorded as such is a problem unless
/// `adopt_identical_links` is set, in which case it is left alone.
///
/// Paths of `old` that `new` no longer declares are not considered here; see
/// [`find_stale`](super::find_stale).
///
/// # Errors
///
/// Returns an error if a path cannot be inspected.
pub fn classify(
    fs: &dyn FileSystem,
    new: &Generation,
    old: &Generation,
    adopt_identical_links: bool,
) -> Result<Plan, ReconcileError> {
    let mut plan = Plan::default();

    for (path, desired) in new.iter() {
        let on_disk = inspect(fs, path)?;
        let verdict = judge(&on_disk, desired, old.get(path), adopt_identical_links);
        tracing::debug!("{}: {on_disk:?} -> {verdict:?}", path.display());

        match verdict {
            Verdict::Apply => plan
                .transactions
                .push(Transaction::link(&desired.source, path)),
            Verdict::Skip => {}
            Verdict::Problem => plan.problems.push(path.to_path_buf()),
        }
    }

    Ok(plan)
}

fn judge(
    on_disk: &OnDisk,
    desired: &FileInfo,
    recorded: Option<&FileInfo>,
    adopt_identical_links: bool,
) -> Verdict {
    let current = match on_disk {
        OnDisk::Absent => return Verdict::Apply,
        OnDisk::Other => return Verdict::Problem,
        OnDisk::Link(current) => current.as_path(),
    };
    let already_desired = current == desired.source;

    match recorded {
        Some(previous) if previous.kind != FileKind::Link => Verdict::Problem,
        // Exactly as declared and as recorded: nothing to do.
        Some(previous) if current == previous.source && already_desired => Verdict::Skip,
        Some(previous) if current == previous.source => Verdict::Apply,
        _ if already_desired && adopt_identical_links => Verdict::Skip,
        _ => Verdict::Problem,
    }
}
