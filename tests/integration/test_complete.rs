//! Tests for the `complete` command

use crate::helpers::*;
use anyhow::Result;

fn candidates(output: &std::process::Output) -> Vec<String> {
  stdout(output).lines().map(String::from).collect()
}

#[test]
fn test_complete_config_keys() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_cargo_gate(dir.path(), &["gate", "complete", "config", "vcs.git."])?;
  assert_eq!(
    candidates(&output),
    vec!["vcs.git.allow_no_upstream", "vcs.git.releasable_branches"]
  );

  Ok(())
}

#[test]
fn test_complete_files_with_pattern() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::create_dir(dir.path().join("docs"))?;
  std::fs::write(dir.path().join("notes.md"), "")?;
  std::fs::write(dir.path().join("notes.txt"), "")?;

  let output = run_cargo_gate(dir.path(), &["gate", "complete", "files", "no", "--pattern", "*.md"])?;
  assert_eq!(candidates(&output), vec!["notes.md"]);

  Ok(())
}

#[test]
fn test_complete_dirs_only() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::create_dir(dir.path().join("docs"))?;
  std::fs::write(dir.path().join("doc.md"), "")?;

  let output = run_cargo_gate(dir.path(), &["gate", "complete", "dirs", "do"])?;
  let found = candidates(&output);
  assert!(found.contains(&"docs/".to_string()));
  assert!(!found.contains(&"doc.md".to_string()));

  Ok(())
}
