//! Parsers for the handful of git output shapes release gating depends on
//!
//! These are fixed contracts: `git status --short -b` headers, `@{u}`
//! symbolic names, `git remote -v` lines, and single-commit logs printed with
//! `--pretty=format:%an: %s`. If git changes any of them, these tests are
//! where it shows up.

use super::{ReleaseOffset, RemoteDirection, TrackingBranch};
use crate::core::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("static regex"));

static RELEASE_NOTE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)<release>(.*?)</release>").expect("static regex"));

/// Separator between author and subject in `%an: %s` log lines
pub const AUTHOR_SEPARATOR: &str = ": ";

/// Read the ahead/behind count from the first line of `git status --short -b`
///
/// `## main...origin/main [ahead 3]` is `+3`, `[behind 2]` is `-2` and a line
/// without brackets is in sync. When several bracketed fragments appear the
/// last one wins. Anything unexpected inside it is an error, never zero.
pub fn parse_release_offset(status_line: &str) -> Result<ReleaseOffset, ParseError> {
  let Some(fragment) = BRACKETED
    .captures_iter(status_line)
    .last()
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
  else {
    return Ok(ReleaseOffset(0));
  };

  let fail = |reason: String| ParseError::new("first line of 'git status --short -b'", status_line, reason);

  let tokens: Vec<&str> = fragment.split_whitespace().collect();
  let [adj, n] = tokens.as_slice() else {
    return Err(fail(format!("expected '<ahead|behind> <n>', got '{}'", fragment)));
  };

  let n: i64 = n
    .parse()
    .map_err(|e| fail(format!("bad commit count '{}': {}", n, e)))?;
  if n <= 0 {
    return Err(fail(format!("commit count must be positive, got {}", n)));
  }

  match *adj {
    "ahead" => Ok(ReleaseOffset(n)),
    "behind" => Ok(ReleaseOffset(-n)),
    other => Err(fail(format!("expected 'ahead' or 'behind', got '{}'", other))),
  }
}

/// Split `origin/release/1.2` into remote `origin` and branch `release/1.2`
pub fn parse_tracking_branch(symbolic: &str) -> Result<TrackingBranch, ParseError> {
  let symbolic = symbolic.trim();
  match symbolic.split_once('/') {
    Some((remote, branch)) if !remote.is_empty() && !branch.is_empty() => Ok(TrackingBranch {
      remote: remote.to_string(),
      branch: branch.to_string(),
    }),
    _ => Err(ParseError::new(
      "upstream branch name",
      symbolic,
      "expected '<remote>/<branch>'",
    )),
  }
}

/// Pick the URL of `remote` for `direction` out of `git remote -v` lines
///
/// Format: `origin  git@github.com:user/repo.git (fetch)`
pub fn parse_remote_url(lines: &[String], remote: &str, direction: RemoteDirection) -> Result<String, ParseError> {
  let matching: Vec<&String> = lines
    .iter()
    .filter(|line| {
      let tokens: Vec<&str> = line.split_whitespace().collect();
      tokens.contains(&remote) && tokens.contains(&direction.marker())
    })
    .collect();

  matching
    .first()
    .and_then(|line| line.split_whitespace().nth(1))
    .map(str::to_string)
    .ok_or_else(|| {
      ParseError::new(
        format!("{} url of remote '{}'", direction, remote),
        matching.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("\n"),
        "no matching 'git remote -v' line",
      )
    })
}

/// Author part of a `%an: %s` log line
pub fn author_from_log(log: &str) -> Result<&str, ParseError> {
  log
    .split_once(AUTHOR_SEPARATOR)
    .map(|(author, _)| author)
    .ok_or_else(|| ParseError::new("commit log line", log, "expected '<author>: <subject>'"))
}

/// Every `<release>...</release>` body in a log line, newline-joined
///
/// No tags yields an empty string.
pub fn release_message_from_log(log: &str) -> String {
  RELEASE_NOTE
    .captures_iter(log)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str())
    .collect::<Vec<_>>()
    .join("\n")
}
