/*!
Suppression matchers.

A [`Matcher`] is a predicate over a result (and the hierarchy it came
from). The runner replaces every matched result with its `Suppressed` copy,
so suppressed findings stay visible in reports but never fail a run.

```
use allcheck::audit::Matcher;
use allcheck::Severity;

// Ignore touch-target findings on the toolbar, and every info result.
let matcher = Matcher::by_check("touch_target_size")
  .and(Matcher::by_resource_name("com.example:id/toolbar"))
  .or(Matcher::by_severity(Severity::Info));
```
*/

use crate::hierarchy::Hierarchy;
use crate::types::{CheckResult, Element, Severity};
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&CheckResult, &Hierarchy) -> bool + Send + Sync;

/// Cloneable, thread-safe result predicate.
#[derive(Clone)]
pub struct Matcher(Arc<Predicate>);

impl fmt::Debug for Matcher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Matcher(..)")
  }
}

impl Matcher {
  pub fn new(predicate: impl Fn(&CheckResult, &Hierarchy) -> bool + Send + Sync + 'static) -> Self {
    Self(Arc::new(predicate))
  }

  pub fn matches(&self, result: &CheckResult, h: &Hierarchy) -> bool {
    (self.0)(result, h)
  }

  /// Matches every result.
  pub fn always() -> Self {
    Self::new(|_, _| true)
  }

  /// Matches nothing.
  pub fn never() -> Self {
    Self::new(|_, _| false)
  }

  pub fn by_check(check_id: impl Into<String>) -> Self {
    let check_id = check_id.into();
    Self::new(move |r, _| r.check_id() == check_id)
  }

  pub fn by_checks<S: Into<String>>(check_ids: impl IntoIterator<Item = S>) -> Self {
    let check_ids: Vec<String> = check_ids.into_iter().map(Into::into).collect();
    Self::new(move |r, _| check_ids.iter().any(|id| id == r.check_id()))
  }

  pub fn by_severity(severity: Severity) -> Self {
    Self::new(move |r, _| r.severity() == severity)
  }

  /// Results of `check_id` with the given reason code.
  pub fn by_reason(check_id: impl Into<String>, reason: u32) -> Self {
    let check_id = check_id.into();
    Self::new(move |r, _| r.check_id() == check_id && r.reason() == reason)
  }

  /// Results whose subject element satisfies `predicate`. Results without
  /// a subject never match.
  pub fn by_element(predicate: impl Fn(&Element) -> bool + Send + Sync + 'static) -> Self {
    Self::new(move |r, h| r.element().and_then(|id| h.element(id)).is_some_and(&predicate))
  }

  /// Subject is an instance of `type_name`.
  pub fn by_class_name(type_name: impl Into<String>) -> Self {
    let type_name = type_name.into();
    Self::by_element(move |e| e.is_instance_of(&type_name))
  }

  pub fn by_resource_name(resource_name: impl Into<String>) -> Self {
    let resource_name = resource_name.into();
    Self::by_element(move |e| e.resource_name.as_deref() == Some(resource_name.as_str()))
  }

  /// Matches when any of `matchers` does. An empty list matches nothing.
  pub fn any(matchers: impl IntoIterator<Item = Matcher>) -> Self {
    let matchers: Vec<Matcher> = matchers.into_iter().collect();
    Self::new(move |r, h| matchers.iter().any(|m| m.matches(r, h)))
  }

  #[must_use]
  pub fn and(self, other: Matcher) -> Self {
    Self::new(move |r, h| self.matches(r, h) && other.matches(r, h))
  }

  #[must_use]
  pub fn or(self, other: Matcher) -> Self {
    Self::new(move |r, h| self.matches(r, h) || other.matches(r, h))
  }
}

impl std::ops::Not for Matcher {
  type Output = Self;

  fn not(self) -> Self {
    Self::new(move |r, h| !self.matches(r, h))
  }
}
