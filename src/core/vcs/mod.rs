pub mod parse;
pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::GateResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Release-facing contract every VCS backend implements
///
/// A release orchestrator calls these in order: `validate_repostate`,
/// `get_current_revision`, `get_changelog`, `get_release_log`,
/// `create_release_tag`. Handles are not meant to be shared between threads
/// while a release is running; calls against one handle must be serialized.
pub trait ReleaseVcs {
  /// Backend name ("git")
  fn name(&self) -> &str;

  /// Repository root this handle is bound to
  fn path(&self) -> &Path;

  /// Fail with the first violated release precondition
  fn validate_repostate(&self) -> GateResult<()>;

  /// Describe the exact state being released
  fn get_current_revision(&self) -> GateResult<RevisionRecord>;

  /// Raw log text since the previous release (full history without one)
  fn get_changelog(&self, previous: Option<&RevisionRecord>) -> GateResult<String>;

  /// `<release>` notes since the previous release, oldest first
  fn get_release_log(&self, previous: Option<&RevisionRecord>) -> GateResult<Vec<String>>;

  /// Create an annotated tag and publish it to the tracking remote
  fn create_release_tag(&self, tag_name: &str, message: Option<&str>) -> GateResult<TagOutcome>;
}

/// Snapshot of the revision being released
///
/// Only `commit` is guaranteed; every other field is filled in on a
/// best-effort basis and simply left out when it could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
  /// Full HEAD commit id. Records written by other tools may lack it.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub commit: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub branch: Option<String>,

  /// `<remote>/<branch>`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tracking_branch: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fetch_url: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub push_url: Option<String>,
}

impl RevisionRecord {
  /// Record for a resolved HEAD commit
  pub fn new(commit: impl Into<String>) -> Self {
    Self {
      commit: Some(commit.into()),
      ..Default::default()
    }
  }

  /// Commit id, ignoring blank values
  pub fn commit(&self) -> Option<&str> {
    self.commit.as_deref().map(str::trim).filter(|c| !c.is_empty())
  }
}

/// Upstream of the current local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingBranch {
  pub remote: String,
  pub branch: String,
}

impl fmt::Display for TrackingBranch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.remote, self.branch)
  }
}

/// Commits the local branch is ahead (positive) or behind (negative) its upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseOffset(pub i64);

impl ReleaseOffset {
  pub fn is_synced(self) -> bool {
    self.0 == 0
  }

  /// "ahead of" or "behind"
  pub fn direction(self) -> &'static str {
    if self.0 > 0 { "ahead of" } else { "behind" }
  }
}

impl fmt::Display for ReleaseOffset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_synced() {
      write!(f, "in sync with")
    } else {
      write!(f, "{} commits {}", self.0.unsigned_abs(), self.direction())
    }
  }
}

/// Which side of a remote a URL is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteDirection {
  Fetch,
  Push,
}

impl RemoteDirection {
  /// Marker `git remote -v` prints after the URL
  pub fn marker(self) -> &'static str {
    match self {
      RemoteDirection::Fetch => "(fetch)",
      RemoteDirection::Push => "(push)",
    }
  }
}

impl fmt::Display for RemoteDirection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RemoteDirection::Fetch => write!(f, "fetch"),
      RemoteDirection::Push => write!(f, "push"),
    }
  }
}

/// What `create_release_tag` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
  /// Tag already existed locally; nothing was created or pushed
  AlreadyExists,
  /// Tag created; no upstream to publish it to
  Created,
  /// Tag created and pushed to the named remote
  Pushed { remote: String },
}

/// Known VCS backends, probed in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsKind {
  Git,
}

impl VcsKind {
  pub const ALL: &'static [VcsKind] = &[VcsKind::Git];

  /// Backend whose metadata lives directly under `path`
  pub fn detect(path: &Path) -> Option<VcsKind> {
    Self::ALL.iter().copied().find(|kind| kind.is_valid_root(path))
  }

  pub fn is_valid_root(self, path: &Path) -> bool {
    match self {
      VcsKind::Git => SystemGit::is_valid_root(path),
    }
  }
}

impl fmt::Display for VcsKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VcsKind::Git => write!(f, "git"),
    }
  }
}
