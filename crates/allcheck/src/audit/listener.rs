/*!
Result listeners.

Listeners see the full, post-suppression result list of every run, in
registration order, before the runner decides whether the run failed.
*/

use crate::hierarchy::Hierarchy;
use crate::types::CheckResult;
use parking_lot::Mutex;

/// Observer of completed runs.
pub trait ResultListener: Send + Sync {
  fn on_results(&self, h: &Hierarchy, results: &[CheckResult]);
}

impl<F> ResultListener for F
where
  F: Fn(&Hierarchy, &[CheckResult]) + Send + Sync,
{
  fn on_results(&self, h: &Hierarchy, results: &[CheckResult]) {
    self(h, results);
  }
}

/// Keeps a copy of every run's results.
#[derive(Debug, Default)]
pub struct RecordingListener {
  runs: Mutex<Vec<Vec<CheckResult>>>,
}

impl RecordingListener {
  pub fn new() -> Self {
    Self::default()
  }

  /// Results of every recorded run, oldest first.
  pub fn runs(&self) -> Vec<Vec<CheckResult>> {
    self.runs.lock().clone()
  }

  pub fn last_run(&self) -> Option<Vec<CheckResult>> {
    self.runs.lock().last().cloned()
  }

  pub fn run_count(&self) -> usize {
    self.runs.lock().len()
  }

  pub fn clear(&self) {
    self.runs.lock().clear();
  }
}

impl ResultListener for RecordingListener {
  fn on_results(&self, _h: &Hierarchy, results: &[CheckResult]) {
    self.runs.lock().push(results.to_vec());
  }
}
