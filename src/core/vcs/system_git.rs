//! System git backend
//!
//! Every operation is one `git` subprocess run to completion. Output is read
//! in full and split into lines; a non-zero exit becomes a `GitError` with the
//! command line and stderr attached.

use crate::core::error::{GateResult, GitError, ResultExt, SetupError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Variables git still sees after the environment is cleared
///
/// Identity, config location and credential helpers commonly come from the
/// environment in CI; without them tagging and pushing fail.
const INHERITED_ENV: &[&str] = &[
  "PATH",
  "HOME",
  "XDG_CONFIG_HOME",
  "GIT_CONFIG_GLOBAL",
  "GIT_CONFIG_SYSTEM",
  "GIT_CONFIG_NOSYSTEM",
  "GIT_CONFIG_COUNT",
  "GIT_AUTHOR_NAME",
  "GIT_AUTHOR_EMAIL",
  "GIT_COMMITTER_NAME",
  "GIT_COMMITTER_EMAIL",
  "EMAIL",
  "GIT_ASKPASS",
  "SSH_ASKPASS",
  "GIT_SSH",
  "GIT_SSH_COMMAND",
  "SSH_AUTH_SOCK",
  "HTTP_PROXY",
  "HTTPS_PROXY",
  "NO_PROXY",
  "http_proxy",
  "https_proxy",
  "no_proxy",
  // Windows profile lookup
  "USERPROFILE",
  "HOMEDRIVE",
  "HOMEPATH",
  "SYSTEMROOT",
];

/// Prefixes of numbered `GIT_CONFIG_KEY_<n>` / `GIT_CONFIG_VALUE_<n>` pairs
const INHERITED_ENV_PREFIXES: &[&str] = &["GIT_CONFIG_KEY_", "GIT_CONFIG_VALUE_"];

/// Git backend using system git
#[derive(Debug)]
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Located git executable
  pub(crate) executable: PathBuf,

  /// Whitelisted variables captured when the handle was opened
  pub(crate) env: Vec<(OsString, OsString)>,
}

impl SystemGit {
  /// Open a git repository, inheriting whitelisted variables from this process
  ///
  /// Fails if git is not on PATH, if `path` has no `.git` entry, or if
  /// `git rev-parse` does not accept it.
  pub fn open(path: &Path) -> GateResult<Self> {
    Self::open_with_env(path, std::env::vars_os())
  }

  /// Open a git repository, passing git only the whitelisted subset of `env`
  pub fn open_with_env(path: &Path, env: impl IntoIterator<Item = (OsString, OsString)>) -> GateResult<Self> {
    let executable = Self::find_executable("git")?;

    if !Self::is_valid_root(path) {
      return Err(
        SetupError::NotARepository {
          path: path.to_path_buf(),
          reason: "no .git directory at this path".to_string(),
        }
        .into(),
      );
    }

    let git = Self {
      repo_path: path.to_path_buf(),
      executable,
      env: inherited_env(env),
    };

    if let Err(e) = git.run(["rev-parse"]) {
      return Err(
        SetupError::NotARepository {
          path: path.to_path_buf(),
          reason: e.to_string(),
        }
        .into(),
      );
    }

    Ok(git)
  }

  /// Does `path` hold git metadata directly (a `.git` dir, or a `.git` file for worktrees)
  pub fn is_valid_root(path: &Path) -> bool {
    path.join(".git").exists()
  }

  /// Locate an executable on PATH
  pub fn find_executable(name: &str) -> GateResult<PathBuf> {
    let not_found = || SetupError::ExecutableNotFound { name: name.to_string() };
    let path_var = std::env::var_os("PATH").ok_or_else(not_found)?;

    let file_names: Vec<String> = if cfg!(windows) {
      vec![format!("{}.exe", name), name.to_string()]
    } else {
      vec![name.to_string()]
    };

    std::env::split_paths(&path_var)
      .flat_map(|dir| file_names.iter().map(move |f| dir.join(f)))
      .find(|candidate| candidate.is_file())
      .ok_or_else(|| not_found().into())
  }

  /// Run git and return its stdout lines
  ///
  /// Trailing newline is dropped; an empty stdout gives no lines.
  pub fn run<I, S>(&self, args: I) -> GateResult<Vec<String>>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let (command, output) = self.output(args)?;

    if !output.status.success() {
      return Err(
        GitError::CommandFailed {
          command,
          stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        }
        .into(),
      );
    }

    Ok(stdout_lines(&output.stdout))
  }

  /// Run git and report only whether it exited zero
  ///
  /// For commands like `diff-index --quiet` whose exit status is the answer.
  pub fn succeeds<I, S>(&self, args: I) -> GateResult<bool>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let (command, output) = self.output(args)?;
    if !output.status.success() {
      tracing::debug!(
        "{} exited with {}: {}",
        command,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim_end()
      );
    }
    Ok(output.status.success())
  }

  fn output<I, S>(&self, args: I) -> GateResult<(String, Output)>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let args: Vec<S> = args.into_iter().collect();
    let command = format!(
      "git {}",
      args
        .iter()
        .map(|a| a.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
    );

    tracing::debug!("running {} in {}", command, self.repo_path.display());

    let output = self
      .git_cmd()
      .args(&args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    Ok((command, output))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists identity, config location and credential variables
  /// - Forces the C locale so status and error text stay parseable
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new(&self.executable);

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
    cmd.env("LC_ALL", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("color.ui=false");

    cmd
  }
}

fn inherited_env(env: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<(OsString, OsString)> {
  env
    .into_iter()
    .filter(|(name, _)| name.to_str().is_some_and(is_inherited))
    .collect()
}

fn is_inherited(name: &str) -> bool {
  let matches = |known: &str| {
    if cfg!(windows) {
      name.eq_ignore_ascii_case(known)
    } else {
      name == known
    }
  };
  INHERITED_ENV.iter().any(|known| matches(known))
    || INHERITED_ENV_PREFIXES
      .iter()
      .any(|prefix| name.starts_with(prefix) && name[prefix.len()..].chars().all(|c| c.is_ascii_digit()))
}

fn stdout_lines(stdout: &[u8]) -> Vec<String> {
  let text = String::from_utf8_lossy(stdout);
  let text = text.trim_end_matches(['\n', '\r']);
  if text.is_empty() {
    return Vec::new();
  }
  text.lines().map(str::to_string).collect()
}
