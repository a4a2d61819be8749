/*!
Aggregate audit failure.

One failure per run, carrying every unsuppressed result at or above the
threshold. The human-readable report is rendered on first use.
*/

use super::Summary;
use crate::checks::Check;
use crate::messages::{keys, render, Catalog};
use crate::types::{CheckResult, Locale, Severity};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A run produced results at or above the failure threshold.
pub struct AuditFailure {
  failures: Vec<CheckResult>,
  results: Vec<CheckResult>,
  threshold: Severity,
  renderer: Renderer,
  rendered: OnceLock<String>,
}

/// What it takes to turn results into text later.
pub(crate) struct Renderer {
  pub(crate) checks: Vec<Arc<dyn Check>>,
  pub(crate) catalog: Arc<dyn Catalog>,
  pub(crate) locale: Locale,
}

impl Renderer {
  /// Message for one result, or `None` when no known check produced it.
  pub(crate) fn message(&self, result: &CheckResult) -> Option<String> {
    self
      .check_for(result)
      .map(|check| check.message(self.catalog.as_ref(), &self.locale, result))
  }

  pub(crate) fn title(&self, result: &CheckResult) -> Option<String> {
    self
      .check_for(result)
      .map(|check| check.title(self.catalog.as_ref(), &self.locale))
  }

  fn check_for(&self, result: &CheckResult) -> Option<&Arc<dyn Check>> {
    self.checks.iter().find(|c| c.id() == result.check_id())
  }

  /// One line per result: severity, check title, subject, message.
  pub(crate) fn line(&self, result: &CheckResult) -> String {
    let title = self
      .title(result)
      .unwrap_or_else(|| result.check_id().to_owned());
    let message = self.message(result).unwrap_or_default();
    match result.element() {
      Some(id) => format!("{} {title} (element {id}): {message}", result.severity()),
      None => format!("{} {title}: {message}", result.severity()),
    }
  }
}

impl AuditFailure {
  pub(crate) fn new(
    failures: Vec<CheckResult>,
    results: Vec<CheckResult>,
    threshold: Severity,
    renderer: Renderer,
  ) -> Self {
    Self {
      failures,
      results,
      threshold,
      renderer,
      rendered: OnceLock::new(),
    }
  }

  /// Results at or above the threshold, in run order.
  pub fn failures(&self) -> &[CheckResult] {
    &self.failures
  }

  /// Every result of the run, suppressed ones included.
  pub fn results(&self) -> &[CheckResult] {
    &self.results
  }

  pub fn into_results(self) -> Vec<CheckResult> {
    self.results
  }

  pub const fn threshold(&self) -> Severity {
    self.threshold
  }

  pub fn summary(&self) -> Summary {
    Summary::of(&self.results)
  }

  /// Rendered message for one result of this run.
  pub fn message_for(&self, result: &CheckResult) -> Option<String> {
    self.renderer.message(result)
  }

  /// The full report. Rendered once, on first call.
  pub fn report(&self) -> &str {
    self.rendered.get_or_init(|| {
      let count = self.failures.len().to_string();
      let header = render(
        self.renderer.catalog.as_ref(),
        &self.renderer.locale,
        keys::FAILURE_HEADER,
        &[("count", count)],
      );
      let lines = self
        .failures
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, self.renderer.line(r)));
      std::iter::once(header).chain(lines).collect::<Vec<_>>().join("\n")
    })
  }
}

impl fmt::Display for AuditFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.report())
  }
}

impl fmt::Debug for AuditFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuditFailure")
      .field("failures", &self.failures.len())
      .field("results", &self.results.len())
      .field("threshold", &self.threshold)
      .finish_non_exhaustive()
  }
}

impl std::error::Error for AuditFailure {}
