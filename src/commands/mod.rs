//! Top-level command orchestration.
pub mod activate;
