//! Tests for the `changelog` and `release-log` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_changelog_since_commit() -> Result<()> {
  let repo = TestRepo::new()?;
  let previous = repo.head()?;
  repo.commit_file("a.txt", "a", "Add feature a")?;

  let output = run_cargo_gate(&repo.path, &["gate", "changelog", "--since", &previous])?;
  let out = stdout(&output);
  assert!(out.contains("Add feature a"));
  assert!(!out.contains("Initial commit"));

  Ok(())
}

#[test]
fn test_changelog_first_release_is_full_log() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.commit_file("a.txt", "a", "Add feature a")?;

  let output = run_cargo_gate(&repo.path, &["gate", "changelog"])?;
  let out = stdout(&output);
  assert!(out.contains("Add feature a"));
  assert!(out.contains("Initial commit"));

  Ok(())
}

#[test]
fn test_release_log_collects_notes_oldest_first() -> Result<()> {
  let repo = TestRepo::new()?;
  let previous = repo.head()?;
  repo.commit_file("a.txt", "a", "Add a <release>First note</release>")?;
  repo.commit_file("b.txt", "b", "Add b without notes")?;
  repo.commit_file("c.txt", "c", "Add c <release>Second note</release>")?;

  let output = run_cargo_gate(&repo.path, &["gate", "release-log", "--since", &previous, "--json"])?;
  let notes: Vec<String> = serde_json::from_str(&stdout(&output))?;

  assert_eq!(
    notes,
    vec![
      "Test User: First note".to_string(),
      "Test User: Second note".to_string()
    ]
  );

  Ok(())
}

#[test]
fn test_release_log_reads_previous_record() -> Result<()> {
  let repo = TestRepo::new()?;
  let record_path = repo.scratch().join("previous.json");
  std::fs::write(
    &record_path,
    format!(r#"{{"commit":"{}","branch":"main"}}"#, repo.head()?),
  )?;
  repo.commit_file("a.txt", "a", "Add a <release>Shiny</release>")?;

  let output = run_cargo_gate(
    &repo.path,
    &["gate", "release-log", "--previous", record_path.to_str().unwrap()],
  )?;
  assert!(stdout(&output).contains("- Test User: Shiny"));

  Ok(())
}

#[test]
fn test_release_log_first_release_is_empty() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.commit_file("a.txt", "a", "Add a <release>Ignored</release>")?;

  let output = run_cargo_gate(&repo.path, &["gate", "release-log", "--json"])?;
  let notes: Vec<String> = serde_json::from_str(&stdout(&output))?;
  assert!(notes.is_empty());

  Ok(())
}
