//! Tests for the `release` pipeline

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_release_end_to_end() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  let previous = repo.head()?;
  repo.commit_file("a.txt", "a", "Add a <release>Faster startup</release>")?;
  git(&repo.path, &["push", "origin", "main"])?;

  let record_path = repo.scratch().join("release.json");
  let output = run_cargo_gate(
    &repo.path,
    &[
      "gate",
      "release",
      "v1.1.0",
      "--since",
      &previous,
      "--record",
      record_path.to_str().unwrap(),
    ],
  )?;
  let out = stdout(&output);
  assert!(out.contains("Test User: Faster startup"), "stdout: {}", out);
  assert!(out.contains("Release v1.1.0 completed"), "stdout: {}", out);

  let remote_tags = git(&repo.remote_path(), &["tag", "-l"])?;
  assert_eq!(stdout(&remote_tags).trim(), "v1.1.0");

  let record: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&record_path)?)?;
  assert_eq!(record["commit"], repo.head()?);
  assert_eq!(record["tracking_branch"], "origin/main");

  Ok(())
}

#[test]
fn test_release_stops_when_not_releasable() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  repo.commit_file("a.txt", "a", "Unpushed work")?;

  let output = cargo_gate(&repo.path, &["gate", "release", "v1.0.0"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("1 commits ahead of origin/main"));

  let tags = git(&repo.path, &["tag", "-l"])?;
  assert!(stdout(&tags).trim().is_empty());

  Ok(())
}

#[test]
fn test_release_dry_run_creates_no_tag() -> Result<()> {
  let repo = TestRepo::with_upstream()?;

  let output = run_cargo_gate(&repo.path, &["gate", "release", "v1.0.0", "--dry-run"])?;
  assert!(stdout(&output).contains("Dry-run"));

  let tags = git(&repo.path, &["tag", "-l"])?;
  assert!(stdout(&tags).trim().is_empty());

  Ok(())
}
