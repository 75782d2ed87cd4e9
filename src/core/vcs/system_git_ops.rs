//! Repository queries and mutations used by the release adapter

use super::parse;
use super::system_git::SystemGit;
use super::{ReleaseOffset, RemoteDirection, TrackingBranch};
use crate::core::error::{GateError, GateResult, GitError, ParseError};

impl SystemGit {
  /// True when the repository has no working tree
  pub fn is_bare_repository(&self) -> GateResult<bool> {
    let lines = self.run(["rev-parse", "--is-bare-repository"])?;
    Ok(lines.first().map(|l| l.trim() == "true").unwrap_or(false))
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> GateResult<String> {
    first_line(self.run(["rev-parse", "HEAD"])?, "HEAD commit")
  }

  /// Current local branch name ("HEAD" when detached)
  pub fn local_branch(&self) -> GateResult<String> {
    first_line(self.run(["rev-parse", "--abbrev-ref", "HEAD"])?, "current branch")
  }

  /// Upstream of the current branch, `None` when none is configured
  ///
  /// Any failure other than "no upstream" is returned as an error.
  pub fn tracking_branch(&self) -> GateResult<Option<TrackingBranch>> {
    match self.run(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"]) {
      Ok(lines) => {
        let symbolic = first_line(lines, "upstream branch")?;
        Ok(Some(parse::parse_tracking_branch(&symbolic)?))
      }
      Err(e) if e.is_no_upstream() => Ok(None),
      Err(e) => Err(e),
    }
  }

  /// True when the working tree or index differs from HEAD
  pub fn has_uncommitted_changes(&self) -> GateResult<bool> {
    Ok(!self.succeeds(["diff-index", "--quiet", "HEAD"])?)
  }

  /// File-level summary of uncommitted changes
  pub fn diff_stat(&self) -> GateResult<Vec<String>> {
    self.run(["diff-index", "--stat", "HEAD"])
  }

  /// Refresh remote-tracking refs for every remote
  pub fn update_remotes(&self) -> GateResult<()> {
    self.run(["remote", "update"]).map(|_| ())
  }

  /// Header line of `git status --short -b`
  pub fn status_header(&self) -> GateResult<String> {
    first_line(self.run(["status", "--short", "-b"])?, "status header")
  }

  /// Commits ahead (+) or behind (-) the tracking branch, from local refs
  pub fn relative_to_remote(&self) -> GateResult<ReleaseOffset> {
    let header = self.status_header()?;
    Ok(parse::parse_release_offset(&header)?)
  }

  /// Configured URL of `remote` for fetching or pushing
  pub fn remote_url(&self, remote: &str, direction: RemoteDirection) -> GateResult<String> {
    let lines = self.run(["remote", "-v"])?;
    Ok(parse::parse_remote_url(&lines, remote, direction)?)
  }

  /// Local tag names
  pub fn list_tags(&self) -> GateResult<Vec<String>> {
    self.run(["tag"])
  }

  /// Full `git log` output, optionally limited to `<since>..HEAD`
  pub fn log_since(&self, since: Option<&str>) -> GateResult<Vec<String>> {
    match since {
      Some(commit) => self.run(["log".to_string(), format!("{}..HEAD", commit)]),
      None => self.run(["log"]),
    }
  }

  /// Hashes of the newest `limit` non-merge commits after `since`, oldest first
  ///
  /// Limited to history touching the repository directory.
  pub fn non_merge_commits_since(&self, since: &str, limit: usize) -> GateResult<Vec<String>> {
    let lines = self.run([
      "log".to_string(),
      "-n".to_string(),
      limit.to_string(),
      format!("{}..", since),
      "--no-merges".to_string(),
      "--reverse".to_string(),
      "--pretty=%H".to_string(),
      ".".to_string(),
    ])?;
    Ok(lines.into_iter().filter(|l| !l.trim().is_empty()).collect())
  }

  /// One commit as `<author>: <subject>`
  pub fn author_summary(&self, commit: &str) -> GateResult<String> {
    // Not trimmed: an empty subject still leaves the "<author>: " separator intact
    self
      .run(["log", commit, "--no-merges", "-1", "--pretty=format:%an: %s"])?
      .into_iter()
      .next()
      .ok_or_else(|| ParseError::new(format!("summary of commit {}", commit), "", "git printed nothing").into())
  }

  /// Create an annotated tag at HEAD
  pub fn create_annotated_tag(&self, name: &str, message: &str) -> GateResult<()> {
    self.run(["tag", "-a", name, "-m", message]).map(|_| ())
  }

  /// Push a single ref to a remote
  pub fn push_ref(&self, remote: &str, refname: &str) -> GateResult<()> {
    match self.run(["push", remote, refname]) {
      Ok(_) => Ok(()),
      Err(GateError::Git(GitError::CommandFailed { stderr, .. })) => Err(
        GitError::PushFailed {
          remote: remote.to_string(),
          refname: refname.to_string(),
          reason: stderr,
        }
        .into(),
      ),
      Err(e) => Err(e),
    }
  }

  /// Commit tracked changes (`-a` when `add_all`)
  pub fn commit(&self, add_all: bool, message: &str) -> GateResult<()> {
    let mut args = vec!["commit"];
    if add_all {
      args.push("-a");
    }
    args.extend(["-m", message]);
    self.run(args).map(|_| ())
  }
}

fn first_line(lines: Vec<String>, what: &str) -> GateResult<String> {
  lines
    .into_iter()
    .next()
    .map(|l| l.trim().to_string())
    .filter(|l| !l.is_empty())
    .ok_or_else(|| ParseError::new(what, "", "git printed nothing").into())
}
