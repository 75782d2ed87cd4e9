//! Shell completion candidates
//!
//! Completers take the word being completed and return candidate strings.
//! The shell integration only has to print them one per line.

mod config_keys;
mod files;

pub use config_keys::ConfigCompleter;
pub use files::FilesCompleter;

/// Something that proposes completions for a partial word
pub trait Completer {
  fn complete(&self, prefix: &str) -> Vec<String>;
}
