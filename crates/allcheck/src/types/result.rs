/*!
Check results.

A result is a pure `(check, severity, element, reason, metadata)` tuple.
Human-readable text is rendered later by the originating check through a
[`Catalog`](crate::messages::Catalog), so detection never touches strings.
*/

use super::{ElementId, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

/// Outcome class of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Severity {
  /// The check declined to evaluate the element. Documents coverage.
  NotRun,
  Info,
  Warning,
  Error,
  /// Reclassified by a suppression matcher. Never fails a run.
  Suppressed,
}

impl Severity {
  /// Rank for threshold comparisons. `None` for reporting-only severities.
  pub const fn rank(self) -> Option<u8> {
    match self {
      Self::Info => Some(1),
      Self::Warning => Some(2),
      Self::Error => Some(3),
      Self::NotRun | Self::Suppressed => None,
    }
  }

  /// Is this severity at or above `threshold`?
  ///
  /// Always false when either side is `NotRun` or `Suppressed`.
  pub const fn is_at_least(self, threshold: Severity) -> bool {
    match (self.rank(), threshold.rank()) {
      (Some(a), Some(b)) => a >= b,
      _ => false,
    }
  }

  /// Is this one of the classified severities (info, warning, error)?
  pub const fn is_classified(self) -> bool {
    self.rank().is_some()
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::NotRun => "NOT_RUN",
      Self::Info => "INFO",
      Self::Warning => "WARNING",
      Self::Error => "ERROR",
      Self::Suppressed => "SUPPRESSED",
    };
    f.write_str(s)
  }
}

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum MetadataValue {
  String(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  Rect(Rect),
  StringList(Vec<String>),
}

impl From<&str> for MetadataValue {
  fn from(s: &str) -> Self {
    Self::String(s.to_owned())
  }
}

impl From<String> for MetadataValue {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<i64> for MetadataValue {
  fn from(n: i64) -> Self {
    Self::Int(n)
  }
}

impl From<f64> for MetadataValue {
  fn from(n: f64) -> Self {
    Self::Float(n)
  }
}

impl From<bool> for MetadataValue {
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

impl From<Rect> for MetadataValue {
  fn from(r: Rect) -> Self {
    Self::Rect(r)
  }
}

impl From<Vec<String>> for MetadataValue {
  fn from(v: Vec<String>) -> Self {
    Self::StringList(v)
  }
}

/// Key/value bag used to parameterize result messages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add or replace an entry.
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
    self.0.insert(key.into(), value.into());
    self
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, key: &str) -> Option<&MetadataValue> {
    self.0.get(key)
  }

  pub fn get_str(&self, key: &str) -> Option<&str> {
    match self.0.get(key)? {
      MetadataValue::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn get_int(&self, key: &str) -> Option<i64> {
    match self.0.get(key)? {
      MetadataValue::Int(n) => Some(*n),
      _ => None,
    }
  }

  pub fn get_float(&self, key: &str) -> Option<f64> {
    match self.0.get(key)? {
      MetadataValue::Float(n) => Some(*n),
      MetadataValue::Int(n) => {
        #[allow(clippy::cast_precision_loss)]
        let n = *n as f64;
        Some(n)
      }
      _ => None,
    }
  }

  pub fn get_bool(&self, key: &str) -> Option<bool> {
    match self.0.get(key)? {
      MetadataValue::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn get_rect(&self, key: &str) -> Option<Rect> {
    match self.0.get(key)? {
      MetadataValue::Rect(r) => Some(*r),
      _ => None,
    }
  }

  pub fn get_string_list(&self, key: &str) -> Option<&[String]> {
    match self.0.get(key)? {
      MetadataValue::StringList(v) => Some(v),
      _ => None,
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }
}

/// One finding produced by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckResult {
  check_id: String,
  severity: Severity,
  element: Option<ElementId>,
  reason: u32,
  #[serde(default, skip_serializing_if = "Metadata::is_empty")]
  metadata: Metadata,
}

impl CheckResult {
  pub fn new(
    check_id: impl Into<String>,
    severity: Severity,
    element: Option<ElementId>,
    reason: u32,
  ) -> Self {
    Self {
      check_id: check_id.into(),
      severity,
      element,
      reason,
      metadata: Metadata::new(),
    }
  }

  #[must_use]
  pub fn with_metadata(mut self, metadata: Metadata) -> Self {
    self.metadata = metadata;
    self
  }

  /// Id of the check that produced this result.
  pub fn check_id(&self) -> &str {
    &self.check_id
  }

  pub const fn severity(&self) -> Severity {
    self.severity
  }

  /// Subject element, if the result is about one.
  pub const fn element(&self) -> Option<ElementId> {
    self.element
  }

  /// Reason code, scoped to the originating check.
  pub const fn reason(&self) -> u32 {
    self.reason
  }

  pub const fn metadata(&self) -> &Metadata {
    &self.metadata
  }

  /// Copy of this result with severity replaced by `Suppressed`.
  #[must_use]
  pub fn suppressed(&self) -> Self {
    Self {
      severity: Severity::Suppressed,
      ..self.clone()
    }
  }
}
