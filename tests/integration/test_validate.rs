//! Tests for the `validate` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_validate_clean_synced_repo() -> Result<()> {
  let repo = TestRepo::with_upstream()?;

  let output = run_cargo_gate(&repo.path, &["gate", "validate"])?;
  assert!(stdout(&output).contains("Repository is ready to release"));

  Ok(())
}

#[test]
fn test_validate_without_upstream_fails() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = cargo_gate(&repo.path, &["gate", "validate"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("there is no upstream branch"), "stderr: {}", err);
  assert!(err.contains("vcs.git.allow_no_upstream"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_validate_without_upstream_allowed_by_config() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_config("[vcs.git]\nallow_no_upstream = true\n")?;

  run_cargo_gate(&repo.path, &["gate", "validate"])?;

  Ok(())
}

#[test]
fn test_validate_reports_uncommitted_changes() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  std::fs::write(repo.path.join("README.md"), "# changed\n")?;

  let output = cargo_gate(&repo.path, &["gate", "validate"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("uncommitted changes"), "stderr: {}", err);
  assert!(err.contains("README.md"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_validate_rejects_branch_outside_allow_list() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  repo.write_config("[vcs.git]\nreleasable_branches = [\"^release/.*\"]\n")?;

  let output = cargo_gate(&repo.path, &["gate", "validate"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("current branch is main"), "stderr: {}", err);
  assert!(err.contains("^release/.*"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_validate_reports_commits_ahead() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  repo.commit_file("a.txt", "a", "Add a")?;
  repo.commit_file("b.txt", "b", "Add b")?;

  let output = cargo_gate(&repo.path, &["gate", "validate"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("2 commits ahead of origin/main"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_validate_outside_repository() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = cargo_gate(dir.path(), &["gate", "validate"])?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("not a git repository"));

  Ok(())
}

#[test]
fn test_validate_with_repo_flag() -> Result<()> {
  let repo = TestRepo::with_upstream()?;
  let path = repo.path.to_str().unwrap();

  run_cargo_gate(repo.scratch(), &["gate", "-C", path, "validate"])?;

  Ok(())
}
