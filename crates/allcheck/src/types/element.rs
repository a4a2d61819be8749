/*! Element type representing one node of a captured UI hierarchy. */

use super::{ElementId, Rect, WindowId};
use crate::a11y::{ElementAction, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A node of the captured tree.
///
/// Elements are flat: children and parent are ids into the owning
/// [`Hierarchy`](crate::Hierarchy) arena. Values are only reachable through a
/// shared reference to the hierarchy, so they never change after the build.
///
/// Tri-state flags are `Option<bool>`: `None` means the capture could not
/// determine the value. Heuristics only act on `Some(true)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Element {
  pub id: ElementId,
  /// Window this element belongs to
  pub window_id: WindowId,
  /// `None` for the root element of a window
  pub parent_id: Option<ElementId>,
  pub children: Vec<ElementId>,

  // === Type identity ===
  /// Concrete class name (e.g. "com.example.FancyButton")
  pub class_name: Option<String>,
  /// Class name reported to accessibility services, if different
  pub accessibility_class_name: Option<String>,
  /// Ancestor type names, nearest first. Used for instance-of checks.
  pub type_ancestry: Vec<String>,
  /// Resource name / test id (e.g. "com.example:id/submit")
  pub resource_name: Option<String>,

  // === Geometry ===
  pub bounds: Rect,
  /// Bounds of each character of `text`, in order. Empty when not captured.
  pub text_character_locations: Vec<Rect>,

  // === Accessibility participation ===
  pub visible: Option<bool>,
  pub important_for_accessibility: bool,

  // === States ===
  pub clickable: Option<bool>,
  pub long_clickable: Option<bool>,
  pub focusable: Option<bool>,
  pub checkable: Option<bool>,
  pub checked: Option<bool>,
  pub scrollable: Option<bool>,
  pub editable: Option<bool>,
  pub enabled: Option<bool>,

  // === Text properties ===
  pub text: Option<String>,
  pub content_description: Option<String>,
  pub hint_text: Option<String>,
  /// Element whose content labels this one
  pub labeled_by: Option<ElementId>,

  // === Actions ===
  pub actions: Vec<ElementAction>,
}

impl Element {
  /// Is this element a window root?
  pub const fn is_root(&self) -> bool {
    self.parent_id.is_none()
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  pub fn is_visible(&self) -> bool {
    self.visible == Some(true)
  }

  pub fn is_clickable(&self) -> bool {
    self.clickable == Some(true)
  }

  pub fn is_long_clickable(&self) -> bool {
    self.long_clickable == Some(true)
  }

  pub fn is_focusable(&self) -> bool {
    self.focusable == Some(true)
  }

  pub fn is_editable(&self) -> bool {
    self.editable == Some(true)
  }

  pub fn is_scrollable(&self) -> bool {
    self.scrollable == Some(true)
  }

  /// Check whether the element is an instance of `type_name`: its class
  /// name, accessibility class name, or any ancestor type matches.
  pub fn is_instance_of(&self, type_name: &str) -> bool {
    self.type_names().any(|name| name == type_name)
  }

  /// Is the element an instance of any of the given types?
  pub fn is_instance_of_any(&self, type_names: &[&str]) -> bool {
    type_names.iter().any(|t| self.is_instance_of(t))
  }

  /// All type names, nearest first: class name, then ancestors, then the
  /// accessibility class name.
  pub fn type_names(&self) -> impl Iterator<Item = &str> {
    self
      .class_name
      .as_deref()
      .into_iter()
      .chain(self.type_ancestry.iter().map(String::as_str))
      .chain(self.accessibility_class_name.as_deref())
  }

  /// Semantic role derived from the type names.
  pub fn role(&self) -> Role {
    Role::from_type_names(self.type_names())
  }
}
