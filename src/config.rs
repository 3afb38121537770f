//! Activation settings resolved from flags and environment toggles.
use crate::cli::ActivateOpts;

/// Environment toggle equivalent to `--dry-run`.
pub const DRY_RUN_ENV: &str = "DRY_RUN";
/// Environment toggle equivalent to `--check-only`.
pub const CHECK_ONLY_ENV: &str = "CHECK_ONLY";
/// Environment toggle equivalent to `--adopt-identical-links`.
pub const ADOPT_ENV: &str = "ADOPT_IDENTICAL_LINKS";

/// Effective switches for one activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivateOptions {
    /// Stop after classification, even when there are no problems.
    pub check_only: bool,
    /// Log transactions instead of applying them.
    pub dry_run: bool,
    /// Skip, rather than reject, links that already point at the desired source.
    pub adopt_identical_links: bool,
}

impl ActivateOptions {
    /// Combine CLI flags with environment toggles.
    ///
    /// A toggle is on when its variable is set at all, whatever the value
    /// (an empty `DRY_RUN=` enables dry run).  Flags can only turn switches
    /// on.
    #[must_use]
    pub fn resolve(opts: &ActivateOpts, is_set: impl Fn(&str) -> bool) -> Self {
        Self {
            check_only: opts.check_only || is_set(CHECK_ONLY_ENV),
            dry_run: opts.dry_run || is_set(DRY_RUN_ENV),
            adopt_identical_links: opts.adopt_identical_links || is_set(ADOPT_ENV),
        }
    }

    /// [`resolve`](Self::resolve) against the process environment.
    #[must_use]
    pub fn from_env(opts: &ActivateOpts) -> Self {
        Self::resolve(opts, |name| std::env::var_os(name).is_some())
    }
}
