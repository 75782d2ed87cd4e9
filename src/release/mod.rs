//! Release gating on top of a VCS backend
//!
//! The git adapter runs a fixed, fail-fast sequence before anything is
//! tagged:
//!
//! 1. the repository must have a working tree
//! 2. the branch must have an upstream (unless `vcs.git.allow_no_upstream`)
//! 3. the branch must match `vcs.git.releasable_branches`, when set
//! 4. the working tree must match HEAD
//! 5. the branch must be level with its upstream after a remote update
//!
//! After validation it describes the revision being released, collects the
//! log since the previous release, and creates and pushes the release tag.
//!
//! Nothing here is cached: every call re-queries git.

pub mod changelog;
pub mod git;
pub mod revision;
pub mod tags;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_repo;

pub use git::GitReleaseVcs;

use crate::core::config::GateConfig;
use crate::core::error::{GateResult, SetupError};
use crate::core::vcs::{ReleaseVcs, VcsKind};
use std::path::Path;

/// Open the release adapter for whichever backend owns `path`
pub fn open_release_vcs(path: &Path, config: &GateConfig) -> GateResult<Box<dyn ReleaseVcs>> {
  match VcsKind::detect(path) {
    Some(VcsKind::Git) => Ok(Box::new(GitReleaseVcs::open(
      path,
      config.vcs.git.clone(),
      config.vcs.debug,
    )?)),
    None => Err(
      SetupError::NotARepository {
        path: path.to_path_buf(),
        reason: format!(
          "no supported VCS found (looked for: {})",
          VcsKind::ALL.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ")
        ),
      }
      .into(),
    ),
  }
}
