//! Error types for cargo-gate with contextual messages and exit codes
//!
//! Every fatal outcome of a release step is a `GateError`. Release-state
//! violations are `Precondition` errors, unexpected git output is a `Parse`
//! error, and a git invocation that exits non-zero is a `Git` error carrying
//! the raw stderr so the failure can be diagnosed without rerunning.

use crate::core::vcs::ReleaseOffset;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
  /// Release gate failure (repository not releasable)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-gate
#[derive(Debug)]
pub enum GateError {
  /// Adapter could not be constructed
  Setup(SetupError),

  /// The repository is not in a releasable state
  Precondition(PreconditionError),

  /// Git printed something we could not make sense of
  Parse(ParseError),

  /// Git operation errors
  Git(GitError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      GateError::Io(e) => GateError::Message {
        message: ctx_str,
        context: Some(e.to_string()),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Setup(_) => ExitCode::User,
      GateError::Precondition(_) => ExitCode::Validation,
      GateError::Parse(_) => ExitCode::System,
      GateError::Git(_) => ExitCode::System,
      GateError::Config(_) => ExitCode::User,
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Setup(e) => e.help_message(),
      GateError::Precondition(e) => e.help_message(),
      GateError::Git(e) => e.help_message(),
      GateError::Config(e) => e.help_message(),
      GateError::Parse(_) | GateError::Io(_) | GateError::Message { .. } => None,
    }
  }

  /// True when git reported that the current branch has no upstream
  pub fn is_no_upstream(&self) -> bool {
    // Older git says "No upstream branch found", newer "no upstream configured"
    matches!(self, GateError::Git(GitError::CommandFailed { stderr, .. }) if stderr.to_lowercase().contains("no upstream"))
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Setup(e) => write!(f, "{}", e),
      GateError::Precondition(e) => write!(f, "{}", e),
      GateError::Parse(e) => write!(f, "{}", e),
      GateError::Git(e) => write!(f, "{}", e),
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<String> for GateError {
  fn from(msg: String) -> Self {
    GateError::message(msg)
  }
}

impl From<&str> for GateError {
  fn from(msg: &str) -> Self {
    GateError::message(msg)
  }
}

impl From<SetupError> for GateError {
  fn from(err: SetupError) -> Self {
    GateError::Setup(err)
  }
}

impl From<PreconditionError> for GateError {
  fn from(err: PreconditionError) -> Self {
    GateError::Precondition(err)
  }
}

impl From<ParseError> for GateError {
  fn from(err: ParseError) -> Self {
    GateError::Parse(err)
  }
}

impl From<GitError> for GateError {
  fn from(err: GitError) -> Self {
    GateError::Git(err)
  }
}

impl From<ConfigError> for GateError {
  fn from(err: ConfigError) -> Self {
    GateError::Config(err)
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

/// Errors raised while constructing a repository handle
#[derive(Debug)]
pub enum SetupError {
  /// The VCS executable is not on PATH
  ExecutableNotFound { name: String },

  /// Path is not the root of a repository the backend understands
  NotARepository { path: PathBuf, reason: String },
}

impl SetupError {
  fn help_message(&self) -> Option<String> {
    match self {
      SetupError::ExecutableNotFound { name } => {
        Some(format!("Install {} and make sure it is on your PATH.", name))
      }
      SetupError::NotARepository { .. } => {
        Some("Run cargo-gate from the repository root, or pass -C <path>.".to_string())
      }
    }
  }
}

impl fmt::Display for SetupError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SetupError::ExecutableNotFound { name } => {
        write!(f, "Could not find the '{}' executable on PATH", name)
      }
      SetupError::NotARepository { path, reason } => {
        write!(f, "{} is not a git repository", path.display())?;
        if !reason.is_empty() {
          write!(f, "\n{}", reason)?;
        }
        Ok(())
      }
    }
  }
}

/// Release-state violations, one per gate check
#[derive(Debug)]
pub enum PreconditionError {
  /// Repository has no working tree
  BareRepository,

  /// No upstream configured and the config does not allow that
  NoUpstream { override_key: String },

  /// Current branch matches none of the releasable patterns
  BranchNotReleasable { branch: String, patterns: Vec<String> },

  /// Working tree differs from HEAD
  UncommittedChanges { stat: Vec<String> },

  /// Local branch has diverged from its tracking branch
  OutOfSync { offset: ReleaseOffset, remote_ref: String },
}

impl PreconditionError {
  fn help_message(&self) -> Option<String> {
    match self {
      PreconditionError::NoUpstream { .. } => {
        Some("Push the branch with `git push -u <remote> <branch>` to set an upstream.".to_string())
      }
      PreconditionError::UncommittedChanges { .. } => {
        Some("Commit or stash your changes before releasing.".to_string())
      }
      PreconditionError::OutOfSync { offset, .. } if offset.0 > 0 => {
        Some("Push your local commits before releasing.".to_string())
      }
      PreconditionError::OutOfSync { .. } => Some("Pull the remote commits before releasing.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for PreconditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PreconditionError::BareRepository => write!(f, "Could not release: bare git repository"),
      PreconditionError::NoUpstream { override_key } => write!(
        f,
        "Release cancelled: there is no upstream branch. To allow the release, set the config entry '{}' to true.",
        override_key
      ),
      PreconditionError::BranchNotReleasable { branch, patterns } => write!(
        f,
        "Could not release: current branch is {}, must match one of: {}",
        branch,
        patterns.join(", ")
      ),
      PreconditionError::UncommittedChanges { stat } => {
        write!(f, "Could not release: there are uncommitted changes:\n{}", stat.join("\n"))
      }
      PreconditionError::OutOfSync { offset, remote_ref } => {
        write!(f, "Could not release: {} {}.", offset, remote_ref)
      }
    }
  }
}

/// Git printed output in a shape we do not understand
#[derive(Debug)]
pub struct ParseError {
  /// What we were trying to read
  pub what: String,
  /// The raw output
  pub output: String,
  /// Why it did not parse
  pub reason: String,
}

impl ParseError {
  pub fn new(what: impl Into<String>, output: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      what: what.into(),
      output: output.into(),
      reason: reason.into(),
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Problem parsing {} ({}):\n{}", self.what, self.reason, self.output)
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Push failed
  PushFailed { remote: String, refname: String, reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and remote access.".to_string())
        } else if reason.contains("already exists") {
          Some("The tag already exists on the remote. Delete it there or pick another name.".to_string())
        } else {
          None
        }
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::PushFailed { remote, refname, reason } => {
        write!(f, "Push of {} to {} failed: {}", refname, remote, reason)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A releasable-branch pattern is not a valid regex
  InvalidPattern { pattern: String, reason: String },

  /// Config file could not be parsed
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidPattern { .. } => {
        Some("Patterns in vcs.git.releasable_branches are regular expressions, e.g. \"^release/.*\".".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid releasable branch pattern '{}': {}", pattern, reason)
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for cargo-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
