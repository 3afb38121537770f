//! Declared link state of one activation.
//!
//! A [`Generation`] maps every managed on-disk path to the [`FileInfo`] it
//! should have.  Two generations take part in each run: the one recorded at
//! the previous activation and the one being activated now.
mod links_file;

pub use links_file::{SUPPORTED_VERSION, load_links_file, parse_links};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Kind of entry a managed path should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A symbolic link pointing into the store.
    Link,
}

/// What a managed path should look like on disk.
///
/// # Examples
///
/// ```
/// use linker::generation::{FileInfo, FileKind};
///
/// let info = FileInfo::link("/store/abc-bashrc");
/// assert_eq!(info.kind, FileKind::Link);
/// assert_eq!(info.source, std::path::PathBuf::from("/store/abc-bashrc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileInfo {
    /// Store location the path should point to.
    pub source: PathBuf,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl FileInfo {
    /// Describe a symbolic link to `source`.
    #[must_use]
    pub fn link(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            kind: FileKind::Link,
        }
    }
}

/// Immutable mapping from on-disk path to its declared [`FileInfo`].
///
/// Iteration is ordered by path so that reconciliation output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Generation {
    files: BTreeMap<PathBuf, FileInfo>,
}

impl Generation {
    /// An empty generation (nothing managed).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declared state for `path`, if managed.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&FileInfo> {
        self.files.get(path)
    }

    /// Whether `path` is managed by this generation.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Iterate over managed paths in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &FileInfo)> {
        self.files.iter().map(|(p, info)| (p.as_path(), info))
    }

    /// Number of managed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no path is managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<(P, FileInfo)> for Generation {
    fn from_iter<I: IntoIterator<Item = (P, FileInfo)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(|(p, info)| (p.into(), info)).collect(),
        }
    }
}
