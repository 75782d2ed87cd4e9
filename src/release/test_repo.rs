//! Throwaway git repositories for release tests

use crate::core::config::GitSettings;
use crate::release::GitReleaseVcs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working repository on `main`, optionally with a bare `origin`
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  pub remote: Option<PathBuf>,
}

impl TestRepo {
  /// Repository with one commit and no remote
  pub fn new() -> Self {
    let root = TempDir::new().unwrap();
    let path = root.path().join("work");
    std::fs::create_dir_all(&path).unwrap();

    git(&path, &["init", "-q", "--initial-branch=main"]);
    git(&path, &["config", "user.name", "Test User"]);
    git(&path, &["config", "user.email", "test@example.com"]);
    git(&path, &["config", "tag.gpgSign", "false"]);
    git(&path, &["config", "commit.gpgSign", "false"]);

    std::fs::write(path.join("README.md"), "# test\n").unwrap();
    git(&path, &["add", "."]);
    git(&path, &["commit", "-q", "-m", "Initial commit"]);

    Self {
      _root: root,
      path,
      remote: None,
    }
  }

  /// Repository whose `main` tracks `origin/main` in a bare sibling repo
  pub fn with_upstream() -> Self {
    let mut repo = Self::new();
    let remote = repo._root.path().join("origin.git");
    git(repo._root.path(), &["init", "-q", "--bare", "origin.git"]);
    git(&repo.path, &["remote", "add", "origin", remote.to_str().unwrap()]);
    git(&repo.path, &["push", "-q", "-u", "origin", "main"]);
    repo.remote = Some(remote);
    repo
  }

  /// Write a file and commit it, returning the new HEAD
  pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
    std::fs::write(self.path.join(name), content).unwrap();
    git(&self.path, &["add", "."]);
    git(&self.path, &["commit", "-q", "-m", message]);
    self.head()
  }

  pub fn head(&self) -> String {
    git(&self.path, &["rev-parse", "HEAD"])
  }

  pub fn git(&self, args: &[&str]) -> String {
    git(&self.path, args)
  }

  /// Adapter over this repository
  pub fn vcs(&self, settings: GitSettings) -> GitReleaseVcs {
    GitReleaseVcs::open(&self.path, settings, false).unwrap()
  }
}

/// Run git, panicking on failure, and return trimmed stdout
pub fn git(cwd: &Path, args: &[&str]) -> String {
  let output = Command::new("git").current_dir(cwd).args(args).output().unwrap();
  assert!(
    output.status.success(),
    "git {} failed: {}",
    args.join(" "),
    String::from_utf8_lossy(&output.stderr)
  );
  String::from_utf8_lossy(&output.stdout).trim().to_string()
}
