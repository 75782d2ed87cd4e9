use super::Completer;
use crate::core::config::GateConfig;

/// Completes dotted configuration keys
#[derive(Debug, Default)]
pub struct ConfigCompleter;

impl Completer for ConfigCompleter {
  fn complete(&self, prefix: &str) -> Vec<String> {
    GateConfig::KEYS
      .iter()
      .filter(|key| key.starts_with(prefix))
      .map(|key| key.to_string())
      .collect()
  }
}
