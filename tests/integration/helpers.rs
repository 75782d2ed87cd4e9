//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A working repository on `main`, optionally tracking a bare `origin`
pub struct TestRepo {
  root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repository with a single commit and no remote
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("work");
    std::fs::create_dir_all(&path)?;

    // Initialize git repo with main as default branch
    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgSign", "false"])?;
    git(&path, &["config", "tag.gpgSign", "false"])?;

    std::fs::write(path.join("README.md"), "# test\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    Ok(Self { root, path })
  }

  /// Create a repository whose `main` tracks `origin/main`
  pub fn with_upstream() -> Result<Self> {
    let repo = Self::new()?;
    let remote = repo.remote_path();
    git(repo.root.path(), &["init", "--bare", "origin.git"])?;
    git(
      &repo.path,
      &["remote", "add", "origin", remote.to_str().context("non-utf8 temp path")?],
    )?;
    git(&repo.path, &["push", "-u", "origin", "main"])?;
    Ok(repo)
  }

  /// Path of the bare `origin` repository
  pub fn remote_path(&self) -> PathBuf {
    self.root.path().join("origin.git")
  }

  /// Scratch directory outside the working tree
  pub fn scratch(&self) -> &Path {
    self.root.path()
  }

  /// Write a file and commit it, returning the commit SHA
  pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Result<String> {
    std::fs::write(self.path.join(name), content)?;
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head()
  }

  /// Get the HEAD commit SHA
  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(stdout(&output).trim().to_string())
  }

  /// Write gate.toml at the repository root
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("gate.toml"), content)?;
    Ok(())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run cargo-gate and return its output whatever the exit status
pub fn cargo_gate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let cargo_gate_bin = env!("CARGO_BIN_EXE_cargo-gate");

  Command::new(cargo_gate_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("CARGO_GATE_LOG")
    .output()
    .context("Failed to run cargo-gate")
}

/// Run cargo-gate, failing unless it exits successfully
pub fn run_cargo_gate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = cargo_gate(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "cargo-gate command failed: cargo {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout(&output),
      stderr(&output)
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
