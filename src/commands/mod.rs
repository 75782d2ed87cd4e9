//! CLI commands for cargo-gate
//!
//! ## Release gating
//! - **validate**: check the repository is in a releasable state
//! - **revision**: describe the revision that would be released
//! - **changelog** / **release-log**: history since the previous release
//! - **tag**: create and publish the release tag
//! - **release**: all of the above, in order
//!
//! ## Utilities
//! - **commit**: commit tracked changes
//! - **complete**: shell completion candidates
//!
//! All repository commands accept `&GateContext`.

pub mod changelog;
pub mod complete;
pub mod release;
pub mod revision;
pub mod tag;
pub mod validate;

pub use changelog::{PreviousRevision, run_changelog, run_release_log};
pub use complete::{CompletionKind, run_complete};
pub use release::{ReleaseOptions, run_release};
pub use revision::run_revision;
pub use tag::{run_commit, run_tag};
pub use validate::run_validate;
