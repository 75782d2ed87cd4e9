use crate::core::context::GateContext;
use crate::core::error::{GateResult, ResultExt};
use crate::core::vcs::RevisionRecord;
use clap::Args;
use std::path::PathBuf;

/// Where the previous release's revision comes from
#[derive(Debug, Clone, Default, Args)]
pub struct PreviousRevision {
  /// Commit of the previous release
  #[arg(long, conflicts_with = "previous")]
  pub since: Option<String>,

  /// Revision record (JSON) written by the previous release
  #[arg(long)]
  pub previous: Option<PathBuf>,
}

impl PreviousRevision {
  /// `None` on a first release
  pub fn load(&self) -> GateResult<Option<RevisionRecord>> {
    if let Some(commit) = &self.since {
      return Ok(Some(RevisionRecord::new(commit.clone())));
    }

    let Some(path) = &self.previous else {
      return Ok(None);
    };

    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read revision record from {}", path.display()))?;
    let record: RevisionRecord = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse revision record from {}", path.display()))?;
    Ok(Some(record))
  }
}

/// Run the changelog command
pub fn run_changelog(ctx: &GateContext, previous: &PreviousRevision) -> GateResult<()> {
  let previous = previous.load()?;
  let changelog = ctx.open_vcs()?.get_changelog(previous.as_ref())?;
  println!("{}", changelog);
  Ok(())
}

/// Run the release-log command
pub fn run_release_log(ctx: &GateContext, previous: &PreviousRevision, json: bool) -> GateResult<()> {
  let previous = previous.load()?;
  let notes = ctx.open_vcs()?.get_release_log(previous.as_ref())?;

  if json {
    println!("{}", serde_json::to_string_pretty(&notes)?);
  } else {
    for note in &notes {
      println!("- {}", note);
    }
  }

  Ok(())
}
