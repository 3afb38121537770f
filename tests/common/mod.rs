// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed sandbox with a fake store, a fake
// home, and a fluent builder for links files, so each integration test can
// set up an isolated activation without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use linker::logging::Log;

/// An isolated activation sandbox backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `store/` — immutable link sources
/// - `home/`  — the managed tree
/// - `state/` — links files
pub struct Sandbox {
    /// Temporary directory holding the whole sandbox.
    pub root: tempfile::TempDir,
}

impl Sandbox {
    /// Create a sandbox with empty `store/`, `home/` and `state/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        for dir in ["store", "home", "state"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create sandbox dir");
        }
        Self { root }
    }

    /// Absolute path of `name` inside the store, creating the file.
    pub fn store_file(&self, name: &str) -> PathBuf {
        let path = self.root.path().join("store").join(name);
        std::fs::write(&path, name).expect("write store file");
        path
    }

    /// Absolute path of `rel` inside the managed home.
    pub fn home(&self, rel: &str) -> PathBuf {
        self.root.path().join("home").join(rel)
    }

    /// Write a links file named `name` into `state/` and return its path.
    pub fn links_file(&self, name: &str, links: &LinksFile) -> PathBuf {
        let path = self.root.path().join("state").join(name);
        std::fs::write(&path, links.to_json()).expect("write links file");
        path
    }

    /// Directory to use as `XDG_CACHE_HOME` so log files stay in the sandbox.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.path().join("cache")
    }
}

/// Fluent builder for a version 1 links file.
#[derive(Default)]
pub struct LinksFile {
    entries: Vec<(PathBuf, PathBuf)>,
}

impl LinksFile {
    /// Begin an empty links file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `on_disk` as a link to `source`.
    pub fn link(mut self, on_disk: &Path, source: &Path) -> Self {
        self.entries.push((on_disk.to_path_buf(), source.to_path_buf()));
        self
    }

    /// Serialise to the links file JSON schema.
    pub fn to_json(&self) -> String {
        let files: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(on_disk, source)| {
                (
                    on_disk.display().to_string(),
                    serde_json::json!({ "source": source, "type": "link" }),
                )
            })
            .collect();
        serde_json::json!({ "version": 1, "files": files }).to_string()
    }
}

/// A [`Log`] that keeps dry-run lines and discards everything else.
#[derive(Debug, Default)]
pub struct CaptureLog {
    dry_run: Mutex<Vec<String>>,
}

impl CaptureLog {
    /// Dry-run lines logged so far.
    pub fn dry_run_lines(&self) -> Vec<String> {
        self.dry_run.lock().expect("lock").clone()
    }
}

impl Log for CaptureLog {
    fn stage(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn debug(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
    fn dry_run(&self, msg: &str) {
        self.dry_run.lock().expect("lock").push(msg.to_string());
    }
}

/// Create a symbolic link at `link` pointing to `target`.
#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) {
    if let Some(parent) = link.parent() {
        std::fs::create_dir_all(parent).expect("create link parent");
    }
    std::os::unix::fs::symlink(target, link).expect("create symlink");
}
