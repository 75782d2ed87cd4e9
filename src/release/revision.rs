//! Revision record assembly

use super::GitReleaseVcs;
use crate::core::error::GateResult;
use crate::core::vcs::{RemoteDirection, RevisionRecord};

impl GitReleaseVcs {
  /// Describe HEAD; only the commit id is mandatory
  ///
  /// Every other field is resolved independently. A failure is logged and
  /// the field left empty; URLs are only looked up once a tracking branch
  /// is known.
  pub(crate) fn current_revision(&self) -> GateResult<RevisionRecord> {
    let mut record = RevisionRecord::new(self.git.head_commit()?);

    record.branch = best_effort("branch", || self.git.local_branch());

    let tracking = best_effort("tracking_branch", || self.git.tracking_branch()).flatten();

    if let Some(upstream) = tracking {
      record.tracking_branch = Some(upstream.to_string());
      record.fetch_url = best_effort("fetch_url", || {
        self.git.remote_url(&upstream.remote, RemoteDirection::Fetch)
      });
      record.push_url = best_effort("push_url", || {
        self.git.remote_url(&upstream.remote, RemoteDirection::Push)
      });
    }

    Ok(record)
  }
}

fn best_effort<T>(field: &str, resolve: impl FnOnce() -> GateResult<T>) -> Option<T> {
  match resolve() {
    Ok(value) => Some(value),
    Err(e) => {
      tracing::error!("Error retrieving {}: {}", field, e);
      None
    }
  }
}
