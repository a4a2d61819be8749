/*!
Fix suggestions.

A [`FixSuggestionProducer`] turns one result of its check into candidate
attribute edits on the offending element. The [`FixSuggestionEngine`] asks
every producer registered for the result's check, in registration order,
and ranks what comes back by descending priority. Equal priorities keep
production order.

## Module Structure

- `mod.rs` - `FixSuggestion`, `FixSuggestionKind`, producer trait, engine
- `producers.rs` - bundled producers for the bundled checks
*/

mod producers;

pub use producers::{
  SpeakableTextSuggestions, TouchTargetSuggestions, UnexposedTextSuggestions,
};

use crate::checks::Parameters;
use crate::hierarchy::Hierarchy;
use crate::types::{CheckResult, ElementId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

/// Element attribute a suggestion edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Attribute {
  ContentDescription,
  ImportantForAccessibility,
  LabeledBy,
  MinWidth,
  MinHeight,
}

/// One proposed edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FixSuggestionKind {
  SetAttribute {
    element: ElementId,
    attribute: Attribute,
    value: String,
  },
  RemoveAttribute {
    element: ElementId,
    attribute: Attribute,
  },
  /// Edits applied together.
  Composite { parts: Vec<FixSuggestionKind> },
}

impl FixSuggestionKind {
  /// Every plain edit, with composites flattened.
  pub fn edits(&self) -> Vec<&FixSuggestionKind> {
    match self {
      Self::Composite { parts } => parts.iter().flat_map(Self::edits).collect(),
      Self::SetAttribute { .. } | Self::RemoveAttribute { .. } => vec![self],
    }
  }
}

/// A ranked edit. Higher priorities are better candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixSuggestion {
  pub kind: FixSuggestionKind,
  pub priority: i32,
}

impl FixSuggestion {
  pub const fn new(kind: FixSuggestionKind, priority: i32) -> Self {
    Self { kind, priority }
  }

  pub fn set(element: ElementId, attribute: Attribute, value: impl Into<String>, priority: i32) -> Self {
    Self::new(
      FixSuggestionKind::SetAttribute {
        element,
        attribute,
        value: value.into(),
      },
      priority,
    )
  }

  pub const fn remove(element: ElementId, attribute: Attribute, priority: i32) -> Self {
    Self::new(FixSuggestionKind::RemoveAttribute { element, attribute }, priority)
  }
}

/// Source of suggestions for one check's results.
pub trait FixSuggestionProducer: Send + Sync {
  /// Id of the check whose results this producer understands.
  fn check_id(&self) -> &'static str;

  fn produce(
    &self,
    result: &CheckResult,
    h: &Hierarchy,
    params: Option<&Parameters>,
  ) -> Vec<FixSuggestion>;
}

impl std::fmt::Debug for dyn FixSuggestionProducer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("FixSuggestionProducer").field(&self.check_id()).finish()
  }
}

/// Ordered producer registry.
#[derive(Debug, Default, Clone)]
pub struct FixSuggestionEngine {
  producers: Vec<Arc<dyn FixSuggestionProducer>>,
}

impl FixSuggestionEngine {
  /// An engine with no producers.
  pub fn new() -> Self {
    Self::default()
  }

  /// The bundled producers.
  pub fn with_defaults() -> Self {
    Self::new()
      .with_producer(SpeakableTextSuggestions)
      .with_producer(TouchTargetSuggestions)
      .with_producer(UnexposedTextSuggestions)
  }

  #[must_use]
  pub fn with_producer(mut self, producer: impl FixSuggestionProducer + 'static) -> Self {
    self.producers.push(Arc::new(producer));
    self
  }

  pub fn producers(&self) -> &[Arc<dyn FixSuggestionProducer>] {
    &self.producers
  }

  /// Suggestions for one result, best first.
  pub fn suggest(
    &self,
    result: &CheckResult,
    h: &Hierarchy,
    params: Option<&Parameters>,
  ) -> Vec<FixSuggestion> {
    let mut suggestions: Vec<FixSuggestion> = self
      .producers
      .iter()
      .filter(|p| p.check_id() == result.check_id())
      .flat_map(|p| p.produce(result, h, params))
      .collect();
    // Stable: equal priorities keep production order
    suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
    suggestions
  }
}
