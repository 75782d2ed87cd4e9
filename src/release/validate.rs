//! Repository state checks that gate a release

use super::GitReleaseVcs;
use crate::core::config::ALLOW_NO_UPSTREAM_KEY;
use crate::core::error::{GateResult, PreconditionError};
use crate::core::vcs::TrackingBranch;

impl GitReleaseVcs {
  /// Run every release precondition in order, stopping at the first failure
  pub(crate) fn validate(&self) -> GateResult<()> {
    self.check_not_bare()?;
    let upstream = self.check_upstream()?;
    self.check_releasable_branch()?;
    self.check_clean_tree()?;
    if let Some(upstream) = upstream {
      self.check_in_sync(&upstream)?;
    }
    tracing::info!("repository state allows a release");
    Ok(())
  }

  fn check_not_bare(&self) -> GateResult<()> {
    if self.git.is_bare_repository()? {
      return Err(PreconditionError::BareRepository.into());
    }
    Ok(())
  }

  /// Returns the upstream for the sync check
  fn check_upstream(&self) -> GateResult<Option<TrackingBranch>> {
    let upstream = self.git.tracking_branch()?;
    if upstream.is_none() {
      if !self.settings.allow_no_upstream {
        return Err(
          PreconditionError::NoUpstream {
            override_key: ALLOW_NO_UPSTREAM_KEY.to_string(),
          }
          .into(),
        );
      }
      tracing::debug!("no upstream branch, allowed by {}", ALLOW_NO_UPSTREAM_KEY);
    }
    Ok(upstream)
  }

  fn check_releasable_branch(&self) -> GateResult<()> {
    if self.settings.releasable_branches.is_empty() {
      return Ok(());
    }

    let patterns = self.settings.compiled_branch_patterns()?;
    let branch = self.git.local_branch()?;

    if patterns.iter().any(|re| re.is_match(&branch)) {
      return Ok(());
    }

    Err(
      PreconditionError::BranchNotReleasable {
        branch,
        patterns: self.settings.releasable_branches.clone(),
      }
      .into(),
    )
  }

  fn check_clean_tree(&self) -> GateResult<()> {
    if self.git.has_uncommitted_changes()? {
      let stat = self.git.diff_stat()?;
      return Err(PreconditionError::UncommittedChanges { stat }.into());
    }
    Ok(())
  }

  fn check_in_sync(&self, upstream: &TrackingBranch) -> GateResult<()> {
    self.git.update_remotes()?;
    let offset = self.git.relative_to_remote()?;
    if !offset.is_synced() {
      return Err(
        PreconditionError::OutOfSync {
          offset,
          remote_ref: upstream.to_string(),
        }
        .into(),
      );
    }
    Ok(())
  }
}
