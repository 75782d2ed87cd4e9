use crate::core::error::{ConfigError, GateError, GateResult, ResultExt};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config key that lets a release through without an upstream branch
pub const ALLOW_NO_UPSTREAM_KEY: &str = "vcs.git.allow_no_upstream";

/// Configuration for cargo-gate
/// Searched in order: gate.toml, .gate.toml, .cargo/gate.toml, .config/gate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub vcs: VcsConfig,
}

/// Settings shared by every VCS backend, plus one table per backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VcsConfig {
  /// Print debug notes while computing release data
  #[serde(default)]
  pub debug: bool,

  #[serde(default)]
  pub git: GitSettings,
}

/// Git backend settings
///
/// ```toml
/// [vcs.git]
/// allow_no_upstream = false
/// releasable_branches = ["^main$", "^release/.*"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSettings {
  /// Permit releasing from a branch with no tracking branch
  #[serde(default)]
  pub allow_no_upstream: bool,

  /// Regexes; when non-empty the current branch must match one of them
  #[serde(default)]
  pub releasable_branches: Vec<String>,
}

impl GitSettings {
  /// Check that every releasable-branch pattern compiles
  pub fn validate(&self) -> GateResult<()> {
    self.compiled_branch_patterns().map(|_| ())
  }

  /// Compile the releasable-branch patterns in order
  pub fn compiled_branch_patterns(&self) -> GateResult<Vec<Regex>> {
    self
      .releasable_branches
      .iter()
      .map(|pattern| {
        Regex::new(pattern).map_err(|e| {
          GateError::Config(ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
          })
        })
      })
      .collect()
  }
}

impl GateConfig {
  /// Every settable key, dotted, in declaration order
  pub const KEYS: &'static [&'static str] = &["vcs.debug", "vcs.git.allow_no_upstream", "vcs.git.releasable_branches"];

  /// Find config file in search order: gate.toml, .gate.toml, .cargo/gate.toml, .config/gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gate.toml"),
      path.join(".gate.toml"),
      path.join(".cargo").join("gate.toml"),
      path.join(".config").join("gate.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config (searches multiple locations). No file means defaults.
  pub fn load(path: &Path) -> GateResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!("no gate.toml under {}, using defaults", path.display());
      return Ok(Self::default());
    };

    Self::load_file(&config_path)
  }

  /// Load a specific config file
  pub fn load_file(config_path: &Path) -> GateResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GateConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Invalid {
      path: config_path.to_path_buf(),
      reason: e.to_string(),
    })?;

    config.vcs.git.validate()?;

    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
  }
}
