use crate::complete::{Completer, ConfigCompleter, FilesCompleter};
use crate::core::error::GateResult;
use clap::ValueEnum;

/// What kind of word is being completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionKind {
  /// Files and directories
  Files,
  /// Directories only
  Dirs,
  /// gate.toml keys
  Config,
}

/// Run the complete command
pub fn run_complete(kind: CompletionKind, prefix: &str, patterns: &[String]) -> GateResult<()> {
  let completer: Box<dyn Completer> = match kind {
    CompletionKind::Files => Box::new(FilesCompleter::default().with_patterns(patterns)),
    CompletionKind::Dirs => Box::new(FilesCompleter::dirs_only()),
    CompletionKind::Config => Box::new(ConfigCompleter),
  };

  for candidate in completer.complete(prefix) {
    println!("{}", candidate);
  }
  Ok(())
}
