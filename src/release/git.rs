//! Git implementation of the release VCS contract

use crate::core::config::GitSettings;
use crate::core::error::GateResult;
use crate::core::vcs::{ReleaseVcs, RevisionRecord, SystemGit, TagOutcome};
use std::path::Path;

/// Message used by [`GitReleaseVcs::commit`] when none is given
pub const DEFAULT_COMMIT_MESSAGE: &str = "Auto Commit from cargo-gate.";

/// Release adapter bound to one git working tree
#[derive(Debug)]
pub struct GitReleaseVcs {
  pub(crate) git: SystemGit,
  pub(crate) settings: GitSettings,
  /// Emit debug notes about release data (`vcs.debug`)
  pub(crate) debug: bool,
}

impl GitReleaseVcs {
  /// Locate git and bind to the repository rooted at `path`
  pub fn open(path: &Path, settings: GitSettings, debug: bool) -> GateResult<Self> {
    let git = SystemGit::open(path)?;
    Ok(Self { git, settings, debug })
  }

  /// Commit tracked changes
  pub fn commit(&self, add_all: bool, message: Option<&str>) -> GateResult<()> {
    let message = message.unwrap_or(DEFAULT_COMMIT_MESSAGE);
    tracing::info!("committing in {} (add all: {})", self.git.repo_path.display(), add_all);
    self.git.commit(add_all, message)
  }
}

impl ReleaseVcs for GitReleaseVcs {
  fn name(&self) -> &str {
    "git"
  }

  fn path(&self) -> &Path {
    &self.git.repo_path
  }

  fn validate_repostate(&self) -> GateResult<()> {
    self.validate()
  }

  fn get_current_revision(&self) -> GateResult<RevisionRecord> {
    self.current_revision()
  }

  fn get_changelog(&self, previous: Option<&RevisionRecord>) -> GateResult<String> {
    self.changelog(previous)
  }

  fn get_release_log(&self, previous: Option<&RevisionRecord>) -> GateResult<Vec<String>> {
    Ok(
      self
        .release_log(previous)?
        .into_iter()
        .map(|entry| entry.to_string())
        .collect(),
    )
  }

  fn create_release_tag(&self, tag_name: &str, message: Option<&str>) -> GateResult<TagOutcome> {
    self.create_tag(tag_name, message)
  }
}
