//! Release command implementation
//!
//! Runs the release steps in their fixed order:
//! 1. validate repository state
//! 2. record the current revision
//! 3. collect changelog and release notes since the previous release
//! 4. create and push the tag
//!
//! Any failing step stops the release.

use super::changelog::PreviousRevision;
use super::revision::print_revision;
use crate::core::context::GateContext;
use crate::core::error::{GateResult, ResultExt};
use crate::core::vcs::TagOutcome;
use std::path::Path;

/// Options for `cargo gate release`
#[derive(Debug, Clone)]
pub struct ReleaseOptions<'a> {
  pub tag: &'a str,
  pub message: Option<&'a str>,
  pub previous: &'a PreviousRevision,
  /// Write the new revision record here
  pub record: Option<&'a Path>,
  pub dry_run: bool,
}

/// Run the release command
pub fn run_release(ctx: &GateContext, opts: ReleaseOptions<'_>) -> GateResult<()> {
  let vcs = ctx.open_vcs()?;
  let previous = opts.previous.load()?;

  println!("🔍 Validating repository state...");
  vcs.validate_repostate()?;

  let revision = vcs.get_current_revision()?;
  print_revision(&revision);
  println!();

  let changelog = vcs.get_changelog(previous.as_ref())?;
  let notes = vcs.get_release_log(previous.as_ref())?;

  println!("📋 Changelog");
  println!();
  println!("{}", changelog);
  println!();

  if notes.is_empty() {
    println!("   No release notes since the previous release");
  } else {
    println!("📝 Release notes");
    for note in &notes {
      println!("  - {}", note);
    }
  }
  println!();

  if opts.dry_run {
    println!("🔍 Dry-run mode (tag '{}' not created)", opts.tag);
    return Ok(());
  }

  match vcs.create_release_tag(opts.tag, opts.message)? {
    TagOutcome::AlreadyExists => {}
    TagOutcome::Created => println!("   Created tag: {}", opts.tag),
    TagOutcome::Pushed { remote } => println!("   Created tag: {} (pushed to {})", opts.tag, remote),
  }

  if let Some(path) = opts.record {
    let json = serde_json::to_string_pretty(&revision)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write revision record to {}", path.display()))?;
    println!("   Wrote revision record to {}", path.display());
  }

  println!();
  println!("✅ Release {} completed!", opts.tag);

  Ok(())
}
