//! Changelog and release-note extraction
//!
//! Two views of the history since the previous release:
//!
//! - the changelog: raw `git log` text for `<previous>..HEAD`, or the full
//!   history on a first release
//! - the release log: notes authors embedded in commit subjects as
//!   `<release>...</release>`, one entry per commit, at most
//!   [`RELEASE_LOG_LIMIT`] commits, and nothing at all without a previous
//!   release to anchor the range

use super::GitReleaseVcs;
use crate::core::error::GateResult;
use crate::core::vcs::RevisionRecord;
use crate::core::vcs::parse::{author_from_log, release_message_from_log};
use std::fmt;

/// Most recent non-merge commits scanned for release notes
pub const RELEASE_LOG_LIMIT: usize = 100;

/// One commit's release note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
  pub author: String,
  pub message: String,
}

impl ChangelogEntry {
  /// Extract from a `<author>: <subject>` log line
  ///
  /// `None` when the subject carries no release note.
  pub fn from_log_line(line: &str) -> GateResult<Option<Self>> {
    let author = author_from_log(line)?;
    let message = release_message_from_log(line);
    if message.is_empty() {
      return Ok(None);
    }
    Ok(Some(Self {
      author: author.to_string(),
      message,
    }))
  }
}

impl fmt::Display for ChangelogEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.author, self.message)
  }
}

impl GitReleaseVcs {
  /// Previous release commit, noting in debug mode when it is missing
  fn previous_commit<'a>(&self, previous: Option<&'a RevisionRecord>) -> Option<&'a str> {
    let previous = previous?;
    let commit = previous.commit();
    if commit.is_none() && self.debug {
      tracing::debug!("couldn't determine previous commit from: {:?}", previous);
    }
    commit
  }

  /// Raw log since the previous release, newline-joined
  ///
  /// `git log <prev>..HEAD` walks back to the common ancestor, so a previous
  /// release cut from another branch still gives a sensible range.
  pub(crate) fn changelog(&self, previous: Option<&RevisionRecord>) -> GateResult<String> {
    let since = self.previous_commit(previous);
    let lines = self.git.log_since(since)?;
    Ok(lines.join("\n"))
  }

  /// Release notes since the previous release, oldest first
  pub(crate) fn release_log(&self, previous: Option<&RevisionRecord>) -> GateResult<Vec<ChangelogEntry>> {
    let Some(since) = self.previous_commit(previous) else {
      return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for hash in self.git.non_merge_commits_since(since, RELEASE_LOG_LIMIT)? {
      let line = self.git.author_summary(&hash)?;
      if let Some(entry) = ChangelogEntry::from_log_line(&line)? {
        entries.push(entry);
      }
    }

    Ok(entries)
  }
}
