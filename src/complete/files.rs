use super::Completer;
use glob::Pattern;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Completes file and directory paths
///
/// Directories are always offered with a trailing separator so the user can
/// keep descending; `dirs` additionally offers them bare. Files are offered
/// when `files` is set and their name matches one of `file_patterns` (or
/// there are no patterns).
#[derive(Debug, Clone)]
pub struct FilesCompleter {
  pub files: bool,
  pub dirs: bool,
  pub file_patterns: Vec<Pattern>,
}

impl Default for FilesCompleter {
  fn default() -> Self {
    Self {
      files: true,
      dirs: true,
      file_patterns: Vec::new(),
    }
  }
}

impl FilesCompleter {
  /// Directories only
  pub fn dirs_only() -> Self {
    Self {
      files: false,
      ..Default::default()
    }
  }

  /// Restrict files to glob patterns; invalid patterns are ignored
  pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.file_patterns = patterns
      .into_iter()
      .filter_map(|p| match Pattern::new(p.as_ref()) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
          tracing::warn!("ignoring file pattern '{}': {}", p.as_ref(), e);
          None
        }
      })
      .collect();
    self
  }

  /// Complete `prefix` relative to `cwd`
  ///
  /// Candidates keep the directory part of the prefix as typed, so relative
  /// prefixes give relative candidates.
  pub fn complete_in(&self, cwd: &Path, prefix: &str) -> Vec<String> {
    let (dir_part, file_part) = match prefix.rfind(is_separator) {
      Some(i) => (&prefix[..=i], &prefix[i + 1..]),
      None => ("", prefix),
    };

    let list_dir: PathBuf = if dir_part.is_empty() {
      cwd.to_path_buf()
    } else if Path::new(dir_part).is_absolute() {
      PathBuf::from(dir_part)
    } else {
      cwd.join(dir_part)
    };

    let Ok(entries) = fs::read_dir(&list_dir) else {
      return Vec::new();
    };

    let mut names: Vec<String> = entries
      .filter_map(|entry| entry.ok())
      .map(|entry| entry.file_name().to_string_lossy().into_owned())
      .collect();
    if dir_part.is_empty() {
      names.push(".".to_string());
      names.push("..".to_string());
    }
    names.sort();

    let mut candidates = Vec::new();
    for name in names.iter().filter(|n| n.starts_with(file_part)) {
      let full = list_dir.join(name);
      if full.is_dir() {
        candidates.push(format!("{}{}{}", dir_part, name, MAIN_SEPARATOR));
        if self.dirs {
          candidates.push(format!("{}{}", dir_part, name));
        }
      } else if full.is_file() && self.files && self.matches_patterns(name) {
        candidates.push(format!("{}{}", dir_part, name));
      }
    }

    candidates
  }

  fn matches_patterns(&self, name: &str) -> bool {
    self.file_patterns.is_empty() || self.file_patterns.iter().any(|p| p.matches(name))
  }
}

impl Completer for FilesCompleter {
  fn complete(&self, prefix: &str) -> Vec<String> {
    match std::env::current_dir() {
      Ok(cwd) => self.complete_in(&cwd, prefix),
      Err(e) => {
        tracing::debug!("no current directory to complete in: {}", e);
        Vec::new()
      }
    }
  }
}

fn is_separator(c: char) -> bool {
  c == '/' || c == MAIN_SEPARATOR
}
