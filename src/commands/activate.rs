//! Activate command: reconcile disk with a new generation.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::ActivateOptions;
use crate::error::ReconcileError;
use crate::fs::{FileSystem, SystemFs};
use crate::generation::{Generation, load_links_file};
use crate::logging::Log;
use crate::reconcile::{classify, execute, filter_empty, find_stale};

/// How an activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Paths that block the activation; nothing was changed.
    Conflicts(Vec<PathBuf>),
    /// Check-only run found no problems; nothing was changed.
    Checked,
    /// Transactions were applied (or logged, in dry run).
    Applied {
        /// Number of link transactions.
        linked: usize,
        /// Number of removal transactions.
        removed: usize,
        /// Directories left empty by removals.
        emptied: Vec<PathBuf>,
    },
}

impl Outcome {
    /// Whether the process should exit successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Conflicts(_))
    }
}

/// Reconcile disk from `old` to `new`.
///
/// Classification runs first and any problem aborts before the first
/// mutation.  Links are applied before removals.
///
/// # Errors
///
/// Returns an error if a path cannot be inspected or a transaction fails.
/// Transactions applied before a failure stay applied.
pub fn activate(
    fs: &dyn FileSystem,
    log: &dyn Log,
    old: &Generation,
    new: &Generation,
    options: ActivateOptions,
) -> Result<Outcome, ReconcileError> {
    log.stage("Checking links");
    let plan = classify(fs, new, old, options.adopt_identical_links)?;
    if !plan.is_clean() {
        return Ok(Outcome::Conflicts(plan.problems));
    }
    log.info(&format!("{} link(s) to apply", plan.transactions.len()));
    if options.check_only {
        return Ok(Outcome::Checked);
    }

    log.stage("Finding stale links");
    let removals = find_stale(fs, new, old)?;
    log.info(&format!("{} stale link(s) to remove", removals.len()));

    log.stage(if options.dry_run {
        "Planned transactions"
    } else {
        "Applying transactions"
    });
    let linked = plan.transactions.len();
    let removed = removals.len();
    let mut transactions = plan.transactions;
    transactions.extend(removals);
    let touched = execute(fs, log, &transactions, options.dry_run)?;
    let emptied = filter_empty(fs, &touched)?;

    Ok(Outcome::Applied {
        linked,
        removed,
        emptied,
    })
}

/// Log `outcome` for the operator.
pub fn report(outcome: &Outcome, log: &dyn Log) {
    match outcome {
        Outcome::Conflicts(problems) => {
            log.error("Detected problems at paths:");
            for problem in problems {
                log.error(&format!("- {}", problem.display()));
            }
            log.error("Aborting");
        }
        Outcome::Checked => log.info("no problems found"),
        Outcome::Applied {
            linked,
            removed,
            emptied,
        } => {
            log.info(&format!("{linked} linked, {removed} removed"));
            if !emptied.is_empty() {
                log.warn("The following directories have been emptied; you may want to remove them");
                for dir in emptied {
                    log.warn(&format!("- {}", dir.display()));
                }
            }
        }
    }
}

/// Run the activate command against the real filesystem.
///
/// # Errors
///
/// Returns an error if either links file cannot be loaded, or activation fails.
pub fn run(args: &Cli, log: &dyn Log) -> Result<ExitCode> {
    let options = ActivateOptions::from_env(&args.activate);
    log.debug(&format!("{options:?}"));

    log.stage("Loading generations");
    let old = load_links_file(&args.old)
        .with_context(|| format!("loading old generation {}", args.old.display()))?;
    let new = load_links_file(&args.new)
        .with_context(|| format!("loading new generation {}", args.new.display()))?;
    log.info(&format!("{} old path(s), {} new path(s)", old.len(), new.len()));

    let outcome = activate(&SystemFs, log, &old, &new, options).context("activation failed")?;
    report(&outcome, log);
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
