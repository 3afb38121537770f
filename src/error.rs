//! Domain-specific error types for the linker.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`SchemaError`],
//! [`ReconcileError`]) while the CLI boundary converts them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! LinkerError
//! ├── Schema(SchemaError)       — links file reading and validation
//! └── Reconcile(ReconcileError) — filesystem inspection and mutation
//! ```
//!
//! Conflicting paths are not errors: they are returned as data so every
//! problem can be reported at once.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the linker.
#[derive(Error, Debug)]
pub enum LinkerError {
    /// A links file could not be read or is not a supported generation.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The filesystem could not be inspected or changed.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Errors that arise while loading a links file.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The links file could not be read.
    #[error("IO error reading links file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The links file is not valid JSON or does not match the schema.
    #[error("Malformed links file {origin}: {source}")]
    Malformed {
        /// Where the document came from (usually a file path).
        origin: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// The links file declares a schema version this linker does not know.
    #[error("Unknown schema version {version} in {origin}")]
    UnsupportedVersion {
        /// Where the document came from (usually a file path).
        origin: String,
        /// The declared version.
        version: u64,
    },
}

/// Filesystem operation attempted by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// Reading metadata or a link target.
    Inspect,
    /// Listing a directory.
    List,
    /// Creating a directory and its ancestors.
    CreateDirectory,
    /// Creating a symbolic link.
    CreateLink,
    /// Removing a file or symbolic link.
    Remove,
}

impl std::fmt::Display for FsOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Inspect => "inspect",
            Self::List => "list",
            Self::CreateDirectory => "create directory",
            Self::CreateLink => "create link",
            Self::Remove => "remove",
        })
    }
}

/// Errors that arise while classifying or applying transactions.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// An entry confirmed during classification had vanished by execution time.
    #[error("entry unexpectedly absent: {}", path.display())]
    MissingEntry {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// A filesystem call failed.
    #[error("failed to {operation} {}: {source}", path.display())]
    Filesystem {
        /// Operation that failed.
        operation: FsOperation,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl ReconcileError {
    /// Wrap an I/O error raised by `operation` on `path`.
    pub fn fs(operation: FsOperation, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // SchemaError
    // -----------------------------------------------------------------------

    #[test]
    fn schema_error_io_display() {
        let e = SchemaError::Io {
            path: PathBuf::from("/run/old-links.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/run/old-links.json"));
        assert!(e.to_string().contains("IO error reading links file"));
    }

    #[test]
    fn schema_error_unsupported_version_display() {
        let e = SchemaError::UnsupportedVersion {
            origin: "new.json".to_string(),
            version: 2,
        };
        assert_eq!(e.to_string(), "Unknown schema version 2 in new.json");
    }

    #[test]
    fn schema_error_malformed_has_source() {
        use std::error::Error as StdError;
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let e = SchemaError::Malformed {
            origin: "old.json".to_string(),
            source,
        };
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("Malformed links file old.json"));
    }

    // -----------------------------------------------------------------------
    // ReconcileError
    // -----------------------------------------------------------------------

    #[test]
    fn missing_entry_display() {
        let e = ReconcileError::MissingEntry {
            path: PathBuf::from("/etc/motd"),
        };
        assert_eq!(e.to_string(), "entry unexpectedly absent: /etc/motd");
    }

    #[test]
    fn filesystem_display_names_operation() {
        let e = ReconcileError::fs(
            FsOperation::CreateLink,
            "/etc/motd",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            e.to_string(),
            "failed to create link /etc/motd: permission denied"
        );
    }

    // -----------------------------------------------------------------------
    // LinkerError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn linker_error_from_schema_error() {
        let e: LinkerError = SchemaError::UnsupportedVersion {
            origin: "x".to_string(),
            version: 7,
        }
        .into();
        assert!(e.to_string().contains("Schema error"));
    }

    #[test]
    fn linker_error_from_reconcile_error() {
        let e: LinkerError = ReconcileError::MissingEntry {
            path: PathBuf::from("/a"),
        }
        .into();
        assert!(e.to_string().contains("Reconcile error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<LinkerError>();
        assert_send_sync::<SchemaError>();
        assert_send_sync::<ReconcileError>();
    }

    #[test]
    fn reconcile_error_converts_to_anyhow() {
        let e = ReconcileError::MissingEntry {
            path: PathBuf::from("/a"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
