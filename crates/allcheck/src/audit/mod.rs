/*!
Audit pipeline.

An [`AuditRunner`] runs an ordered list of checks over one hierarchy and
post-processes the merged results:

1. Run each check in order (parameters are cloned once per run) and
   concatenate the results.
2. Replace every result matched by the suppression [`Matcher`] with its
   `Suppressed` copy. Count and order are preserved.
3. Classify into a [`Summary`].
4. Hand the full list to every [`ResultListener`], in registration order.
5. Fail with one [`AuditFailure`] if any result is at or above the
   threshold, otherwise return the results.

# Example

```
use allcheck::audit::{AuditRunner, Matcher};
use allcheck::{ElementSnapshot, HierarchySnapshot, Rect, Severity, WindowSnapshot};

let hierarchy = HierarchySnapshot::default()
  .window(
    WindowSnapshot::new(1, Rect::new(0, 0, 1080, 1920))
      .active(true)
      .element(ElementSnapshot::new(1).child(2))
      .element(ElementSnapshot::new(2).bounds(Rect::new(0, 0, 200, 200))),
  )
  .build()
  .unwrap();

let runner = AuditRunner::builder()
  .suppress(Matcher::by_check("speakable_text_present"))
  .threshold(Severity::Error)
  .build();
let results = runner.run(&hierarchy, None).unwrap();
assert!(results.iter().any(|r| r.severity() == Severity::Suppressed));
```

## Module Structure

- `mod.rs` - `AuditRunner`, its builder, `Summary`
- `suppression.rs` - `Matcher` combinators
- `listener.rs` - `ResultListener`, `RecordingListener`
- `failure.rs` - `AuditFailure`
*/

mod failure;
mod listener;
mod suppression;

pub use failure::AuditFailure;
pub use listener::{RecordingListener, ResultListener};
pub use suppression::Matcher;

use crate::checks::{Check, Parameters, Preset};
use crate::hierarchy::Hierarchy;
use crate::messages::{BuiltinCatalog, Catalog};
use crate::types::{CheckResult, ElementId, Locale, Severity};
use failure::Renderer;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use ts_rs::TS;

/// Outcome of [`AuditRunner::run`].
pub type AuditResult = Result<Vec<CheckResult>, AuditFailure>;

/// Result counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
pub struct Summary {
  pub info: usize,
  pub warning: usize,
  pub error: usize,
  pub not_run: usize,
  pub suppressed: usize,
}

impl Summary {
  pub fn of(results: &[CheckResult]) -> Self {
    results.iter().fold(Self::default(), |mut s, r| {
      match r.severity() {
        Severity::Info => s.info += 1,
        Severity::Warning => s.warning += 1,
        Severity::Error => s.error += 1,
        Severity::NotRun => s.not_run += 1,
        Severity::Suppressed => s.suppressed += 1,
      }
      s
    })
  }

  /// Classified results (info, warning, error).
  pub const fn classified(&self) -> usize {
    self.info + self.warning + self.error
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} error(s), {} warning(s), {} info, {} not run, {} suppressed",
      self.error, self.warning, self.info, self.not_run, self.suppressed
    )
  }
}

/// Configured check pipeline. Cheap to share; runs never mutate it.
pub struct AuditRunner {
  checks: Vec<Arc<dyn Check>>,
  root: Option<ElementId>,
  suppress: Option<Matcher>,
  listeners: Vec<Arc<dyn ResultListener>>,
  threshold: Severity,
  locale: Option<Locale>,
  catalog: Arc<dyn Catalog>,
}

impl fmt::Debug for AuditRunner {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuditRunner")
      .field("checks", &self.checks)
      .field("root", &self.root)
      .field("listeners", &self.listeners.len())
      .field("threshold", &self.threshold)
      .field("locale", &self.locale)
      .finish_non_exhaustive()
  }
}

impl Default for AuditRunner {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl AuditRunner {
  pub fn builder() -> AuditRunnerBuilder {
    AuditRunnerBuilder::default()
  }

  pub fn checks(&self) -> &[Arc<dyn Check>] {
    &self.checks
  }

  pub const fn root(&self) -> Option<ElementId> {
    self.root
  }

  pub const fn threshold(&self) -> Severity {
    self.threshold
  }

  /// Run every check in order.
  pub fn run(&self, h: &Hierarchy, params: Option<&Parameters>) -> AuditResult {
    let params = params.cloned();
    let results = self
      .checks
      .iter()
      .flat_map(|check| self.run_one(check.as_ref(), h, params.as_ref()))
      .collect();
    self.finish(h, results)
  }

  /// Like [`run`](Self::run), with checks spread over the rayon pool.
  /// Results come back in the same order.
  pub fn run_parallel(&self, h: &Hierarchy, params: Option<&Parameters>) -> AuditResult {
    let params = params.cloned();
    let per_check: Vec<Vec<CheckResult>> = self
      .checks
      .par_iter()
      .map(|check| self.run_one(check.as_ref(), h, params.as_ref()))
      .collect();
    self.finish(h, per_check.into_iter().flatten().collect())
  }

  /// Run and suppress, without listeners or the failure threshold.
  pub fn evaluate(&self, h: &Hierarchy, params: Option<&Parameters>) -> Vec<CheckResult> {
    let params = params.cloned();
    let results = self
      .checks
      .iter()
      .flat_map(|check| self.run_one(check.as_ref(), h, params.as_ref()))
      .collect();
    self.apply_suppression(h, results)
  }

  /// Localized message for a result produced by one of this runner's checks.
  pub fn message_for(&self, h: &Hierarchy, result: &CheckResult) -> Option<String> {
    self.renderer(h).message(result)
  }

  /// Localized title of the check that produced `result`.
  pub fn title_for(&self, h: &Hierarchy, result: &CheckResult) -> Option<String> {
    self.renderer(h).title(result)
  }

  fn run_one(
    &self,
    check: &dyn Check,
    h: &Hierarchy,
    params: Option<&Parameters>,
  ) -> Vec<CheckResult> {
    let results = check.run(h, self.root, params);
    log::debug!("{}: {} result(s)", check.id(), results.len());
    results
  }

  fn apply_suppression(&self, h: &Hierarchy, results: Vec<CheckResult>) -> Vec<CheckResult> {
    let Some(matcher) = &self.suppress else {
      return results;
    };
    results
      .into_iter()
      .map(|r| if matcher.matches(&r, h) { r.suppressed() } else { r })
      .collect()
  }

  fn finish(&self, h: &Hierarchy, results: Vec<CheckResult>) -> AuditResult {
    let results = self.apply_suppression(h, results);
    let summary = Summary::of(&results);

    for listener in &self.listeners {
      listener.on_results(h, &results);
    }

    let failures: Vec<CheckResult> = results
      .iter()
      .filter(|r| r.severity().is_at_least(self.threshold))
      .cloned()
      .collect();
    if failures.is_empty() {
      log::info!("Audit passed: {summary}");
      return Ok(results);
    }

    log::warn!(
      "Audit failed: {} result(s) at or above {} ({summary})",
      failures.len(),
      self.threshold
    );
    Err(AuditFailure::new(
      failures,
      results,
      self.threshold,
      self.renderer(h),
    ))
  }

  fn renderer(&self, h: &Hierarchy) -> Renderer {
    Renderer {
      checks: self.checks.clone(),
      catalog: Arc::clone(&self.catalog),
      locale: self
        .locale
        .clone()
        .unwrap_or_else(|| h.device_state().locale.clone()),
    }
  }
}

/// Builder for an [`AuditRunner`].
///
/// Starts from [`Preset::Latest`], no sub-root, no suppression, threshold
/// `Error`, the built-in English catalog, and the hierarchy's own locale.
///
/// ```
/// use allcheck::audit::AuditRunner;
/// use allcheck::checks::{Preset, TouchTargetSizeCheck};
/// use allcheck::Severity;
///
/// let runner = AuditRunner::builder()
///   .preset(Preset::NoChecks)
///   .check(TouchTargetSizeCheck)
///   .threshold(Severity::Warning)
///   .build();
/// assert_eq!(runner.checks().len(), 1);
/// ```
#[must_use = "Builder does nothing until .build() is called"]
pub struct AuditRunnerBuilder {
  checks: Vec<Arc<dyn Check>>,
  root: Option<ElementId>,
  suppress: Option<Matcher>,
  listeners: Vec<Arc<dyn ResultListener>>,
  threshold: Severity,
  locale: Option<Locale>,
  catalog: Arc<dyn Catalog>,
}

impl Default for AuditRunnerBuilder {
  fn default() -> Self {
    Self {
      checks: Preset::Latest.checks(),
      root: None,
      suppress: None,
      listeners: Vec::new(),
      threshold: Severity::Error,
      locale: None,
      catalog: Arc::new(BuiltinCatalog),
    }
  }
}

impl fmt::Debug for AuditRunnerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuditRunnerBuilder")
      .field("checks", &self.checks)
      .field("root", &self.root)
      .field("threshold", &self.threshold)
      .finish_non_exhaustive()
  }
}

impl AuditRunnerBuilder {
  /// Replace the check list with a preset.
  pub fn preset(mut self, preset: Preset) -> Self {
    self.checks = preset.checks();
    self
  }

  /// Append a check.
  pub fn check(mut self, check: impl Check + 'static) -> Self {
    self.checks.push(Arc::new(check));
    self
  }

  /// Append an already shared check.
  pub fn shared_check(mut self, check: Arc<dyn Check>) -> Self {
    self.checks.push(check);
    self
  }

  /// Only evaluate the subtree of `root`. Checks still see the whole
  /// hierarchy for context.
  pub const fn root(mut self, root: ElementId) -> Self {
    self.root = Some(root);
    self
  }

  /// Suppress matching results. Replaces any earlier matcher.
  pub fn suppress(mut self, matcher: Matcher) -> Self {
    self.suppress = Some(matcher);
    self
  }

  pub fn listener(mut self, listener: impl ResultListener + 'static) -> Self {
    self.listeners.push(Arc::new(listener));
    self
  }

  /// Register a listener the caller keeps a handle to (e.g. a
  /// [`RecordingListener`]).
  pub fn shared_listener(mut self, listener: Arc<dyn ResultListener>) -> Self {
    self.listeners.push(listener);
    self
  }

  /// Lowest severity that fails a run. Default: `Error`.
  ///
  /// `NotRun` and `Suppressed` never qualify, so using either disables
  /// failures.
  pub const fn threshold(mut self, threshold: Severity) -> Self {
    self.threshold = threshold;
    self
  }

  /// Locale for rendered messages. Default: the hierarchy's device locale.
  pub fn locale(mut self, locale: Locale) -> Self {
    self.locale = Some(locale);
    self
  }

  pub fn catalog(mut self, catalog: impl Catalog + 'static) -> Self {
    self.catalog = Arc::new(catalog);
    self
  }

  pub fn build(self) -> AuditRunner {
    AuditRunner {
      checks: self.checks,
      root: self.root,
      suppress: self.suppress,
      listeners: self.listeners,
      threshold: self.threshold,
      locale: self.locale,
      catalog: self.catalog,
    }
  }
}

/// Run the latest preset and return every result, without suppression or
/// a failure threshold.
pub fn run_checks(
  h: &Hierarchy,
  root: Option<ElementId>,
  params: Option<&Parameters>,
) -> Vec<CheckResult> {
  let builder = AuditRunner::builder();
  let builder = match root {
    Some(root) => builder.root(root),
    None => builder,
  };
  builder.build().evaluate(h, params)
}
