//! Accessibility actions.
//!
//! Actions an assistive technology can perform on an element, as reported
//! by the snapshot. Platform action ids are mapped by the capture adapter.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Platform-agnostic accessibility action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
  /// Primary activation (click, press).
  Click,

  /// Secondary activation (long press).
  LongClick,

  /// Give input focus.
  Focus,

  /// Move screen-reader focus to the element.
  AccessibilityFocus,

  /// Select the element (lists, tabs).
  Select,

  /// Scroll content forward.
  ScrollForward,

  /// Scroll content backward.
  ScrollBackward,

  /// Expand a collapsed element.
  Expand,

  /// Collapse an expanded element.
  Collapse,

  /// Dismiss (notifications, sheets).
  Dismiss,

  /// Replace editable text.
  SetText,

  /// Application-defined action, identified by its platform id.
  Custom(u32),
}

impl Action {
  /// Does performing this action activate the element like a tap would?
  pub const fn is_activation(&self) -> bool {
    matches!(self, Self::Click | Self::LongClick)
  }
}

/// An action exposed by an element, with its optional custom label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ElementAction {
  pub action: Action,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

impl ElementAction {
  pub const fn new(action: Action) -> Self {
    Self {
      action,
      label: None,
    }
  }

  pub fn labeled(action: Action, label: impl Into<String>) -> Self {
    Self {
      action,
      label: Some(label.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn activation_actions() {
    assert!(Action::Click.is_activation());
    assert!(Action::LongClick.is_activation());
    assert!(!Action::ScrollForward.is_activation());
    assert!(!Action::Custom(42).is_activation());
  }

  #[test]
  fn actions_serialize_snake_case() {
    let json = serde_json::to_string(&Action::AccessibilityFocus).unwrap_or_default();
    assert_eq!(json, r#""accessibility_focus""#);
  }
}
