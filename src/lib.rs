//! Generation-to-generation symlink activation engine.
//!
//! Reconciles the symbolic links on disk with the links a declarative
//! configuration manager wants, given what the previous activation recorded.
//! Anything changed outside the linker's control is reported, never
//! overwritten.
//!
//! The public API is organised into four layers:
//!
//! - **[`generation`]** — declared link state and the links file loader
//! - **[`fs`]** — the filesystem capability the engine works through
//! - **[`reconcile`]** — classification, stale detection, execution, sweeping
//! - **[`commands`]** — the `activate` orchestration used by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod generation;
pub mod logging;
pub mod reconcile;
