//! Release tag creation and publication

use super::GitReleaseVcs;
use crate::core::error::GateResult;
use crate::core::vcs::TagOutcome;

impl GitReleaseVcs {
  /// Create an annotated tag at HEAD and push it to the upstream remote
  ///
  /// An existing tag of the same name is left alone with a warning. Without
  /// an upstream the tag stays local.
  pub(crate) fn create_tag(&self, tag_name: &str, message: Option<&str>) -> GateResult<TagOutcome> {
    if self.git.list_tags()?.iter().any(|t| t == tag_name) {
      tracing::warn!("Skipped tag creation, tag '{}' already exists", tag_name);
      println!("⚠️  Skipped tag creation, tag '{}' already exists", tag_name);
      return Ok(TagOutcome::AlreadyExists);
    }

    // Resolved first so a failure here leaves no tag behind
    let upstream = self.git.tracking_branch()?;

    println!("🏷️  Creating tag '{}'...", tag_name);
    // `git tag -a` without -m would open an editor
    self.git.create_annotated_tag(tag_name, message.unwrap_or(tag_name))?;

    let Some(upstream) = upstream else {
      tracing::debug!("no upstream branch, tag '{}' not pushed", tag_name);
      return Ok(TagOutcome::Created);
    };

    println!("   Pushing tag '{}' to {}...", tag_name, upstream);
    self.git.push_ref(&upstream.remote, tag_name)?;
    println!("   ✅ Pushed {} to {}", tag_name, upstream.remote);

    Ok(TagOutcome::Pushed {
      remote: upstream.remote,
    })
  }
}
