//! Core building blocks for cargo-gate
//!
//! - **config**: gate.toml parsing and validation
//! - **context**: per-invocation repository root and config
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: the release VCS contract and the system-git backend

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
