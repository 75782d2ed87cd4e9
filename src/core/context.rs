//! Per-invocation context - load config once, pass everywhere
//!
//! ```text
//! main.rs:
//!   GateContext::build() -> &GateContext
//!   |
//!   v
//! commands/validate.rs, tag.rs, etc:
//!   fn run_*(ctx: &GateContext, ...)
//! ```

use crate::core::config::GateConfig;
use crate::core::error::GateResult;
use crate::core::vcs::ReleaseVcs;
use crate::release::{self, GitReleaseVcs};
use std::path::{Path, PathBuf};

/// Repository root plus loaded configuration
#[derive(Debug, Clone)]
pub struct GateContext {
  /// Repository root directory
  pub root: PathBuf,

  /// gate.toml (defaults when absent)
  pub config: GateConfig,
}

impl GateContext {
  /// Build context for the repository at `root`
  pub fn build(root: &Path) -> GateResult<Self> {
    let config = GateConfig::load(root)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Release adapter for whichever VCS owns the root
  pub fn open_vcs(&self) -> GateResult<Box<dyn ReleaseVcs>> {
    release::open_release_vcs(&self.root, &self.config)
  }

  /// Git adapter, for git-only operations
  pub fn open_git(&self) -> GateResult<GitReleaseVcs> {
    GitReleaseVcs::open(&self.root, self.config.vcs.git.clone(), self.config.vcs.debug)
  }
}
