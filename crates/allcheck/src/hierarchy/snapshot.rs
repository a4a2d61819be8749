/*!
Wire mirror of a captured hierarchy.

This is what a capture adapter (or a JSON file) hands over. Elements are
flat lists per window and refer to each other by [`SourceId`]; references
may point forward. [`HierarchyBuilder`](super::HierarchyBuilder) validates
and re-numbers everything.

```
use allcheck::{ElementSnapshot, HierarchySnapshot, Rect, WindowSnapshot};

let hierarchy = HierarchySnapshot::default()
  .window(
    WindowSnapshot::new(1, Rect::new(0, 0, 1080, 1920))
      .active(true)
      .element(ElementSnapshot::new(1).child(2))
      .element(ElementSnapshot::new(2).text("Hello")),
  )
  .build()
  .unwrap();
assert_eq!(hierarchy.elements().len(), 2);
```
*/

use crate::a11y::ElementAction;
use crate::types::{DeviceState, HierarchyResult, Rect, SourceId, WindowKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Hierarchy, HierarchyBuilder};

/// A full capture: device state plus windows in z-order (bottom first).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HierarchySnapshot {
  #[serde(default)]
  pub device: DeviceState,
  pub windows: Vec<WindowSnapshot>,
}

impl HierarchySnapshot {
  pub fn new(device: DeviceState) -> Self {
    Self {
      device,
      windows: Vec::new(),
    }
  }

  /// Parse a snapshot from JSON.
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  #[must_use]
  pub fn window(mut self, window: WindowSnapshot) -> Self {
    self.windows.push(window);
    self
  }

  /// Validate and build the immutable hierarchy.
  pub fn build(self) -> HierarchyResult<Hierarchy> {
    HierarchyBuilder::new(self).build()
  }
}

/// One captured window and its elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowSnapshot {
  #[serde(default)]
  pub kind: WindowKind,
  #[serde(default)]
  pub layer: Option<i32>,
  pub bounds: Rect,
  #[serde(default)]
  pub active: bool,
  /// Source id of the root element. Must be one of `elements`.
  pub root: SourceId,
  pub elements: Vec<ElementSnapshot>,
}

impl WindowSnapshot {
  pub fn new(root: i64, bounds: Rect) -> Self {
    Self {
      kind: WindowKind::Application,
      layer: None,
      bounds,
      active: false,
      root: SourceId(root),
      elements: Vec::new(),
    }
  }

  #[must_use]
  pub const fn kind(mut self, kind: WindowKind) -> Self {
    self.kind = kind;
    self
  }

  #[must_use]
  pub const fn layer(mut self, layer: i32) -> Self {
    self.layer = Some(layer);
    self
  }

  #[must_use]
  pub const fn active(mut self, active: bool) -> Self {
    self.active = active;
    self
  }

  #[must_use]
  pub fn element(mut self, element: ElementSnapshot) -> Self {
    self.elements.push(element);
    self
  }

  #[must_use]
  pub fn elements(mut self, elements: impl IntoIterator<Item = ElementSnapshot>) -> Self {
    self.elements.extend(elements);
    self
  }
}

/// One captured element. Mirrors [`Element`](crate::Element) with source ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ElementSnapshot {
  pub id: SourceId,
  pub children: Vec<SourceId>,
  pub labeled_by: Option<SourceId>,

  pub class_name: Option<String>,
  pub accessibility_class_name: Option<String>,
  pub type_ancestry: Vec<String>,
  pub resource_name: Option<String>,

  pub bounds: Rect,
  pub text_character_locations: Vec<Rect>,

  pub visible: Option<bool>,
  #[serde(default = "important_by_default")]
  pub important_for_accessibility: bool,

  pub clickable: Option<bool>,
  pub long_clickable: Option<bool>,
  pub focusable: Option<bool>,
  pub checkable: Option<bool>,
  pub checked: Option<bool>,
  pub scrollable: Option<bool>,
  pub editable: Option<bool>,
  pub enabled: Option<bool>,

  pub text: Option<String>,
  pub content_description: Option<String>,
  pub hint_text: Option<String>,

  pub actions: Vec<ElementAction>,
}

const fn important_by_default() -> bool {
  true
}

impl ElementSnapshot {
  /// A visible, important element with nothing else set.
  pub fn new(id: i64) -> Self {
    Self {
      id: SourceId(id),
      visible: Some(true),
      important_for_accessibility: true,
      ..Self::default()
    }
  }

  /// Set the class name and its ancestor types (nearest first).
  #[must_use]
  pub fn class_name(mut self, name: &str, ancestry: &[&str]) -> Self {
    self.class_name = Some(name.to_owned());
    self.type_ancestry = ancestry.iter().map(|&s| s.to_owned()).collect();
    self
  }

  #[must_use]
  pub fn accessibility_class_name(mut self, name: &str) -> Self {
    self.accessibility_class_name = Some(name.to_owned());
    self
  }

  #[must_use]
  pub fn resource_name(mut self, name: &str) -> Self {
    self.resource_name = Some(name.to_owned());
    self
  }

  #[must_use]
  pub const fn bounds(mut self, bounds: Rect) -> Self {
    self.bounds = bounds;
    self
  }

  #[must_use]
  pub fn glyphs(mut self, glyphs: Vec<Rect>) -> Self {
    self.text_character_locations = glyphs;
    self
  }

  #[must_use]
  pub const fn visible(mut self, visible: bool) -> Self {
    self.visible = Some(visible);
    self
  }

  #[must_use]
  pub const fn important(mut self, important: bool) -> Self {
    self.important_for_accessibility = important;
    self
  }

  #[must_use]
  pub const fn clickable(mut self, clickable: bool) -> Self {
    self.clickable = Some(clickable);
    self
  }

  #[must_use]
  pub const fn long_clickable(mut self, long_clickable: bool) -> Self {
    self.long_clickable = Some(long_clickable);
    self
  }

  #[must_use]
  pub const fn focusable(mut self, focusable: bool) -> Self {
    self.focusable = Some(focusable);
    self
  }

  #[must_use]
  pub const fn checkable(mut self, checkable: bool) -> Self {
    self.checkable = Some(checkable);
    self
  }

  #[must_use]
  pub const fn checked(mut self, checked: bool) -> Self {
    self.checked = Some(checked);
    self
  }

  #[must_use]
  pub const fn scrollable(mut self, scrollable: bool) -> Self {
    self.scrollable = Some(scrollable);
    self
  }

  #[must_use]
  pub const fn editable(mut self, editable: bool) -> Self {
    self.editable = Some(editable);
    self
  }

  #[must_use]
  pub const fn enabled(mut self, enabled: bool) -> Self {
    self.enabled = Some(enabled);
    self
  }

  #[must_use]
  pub fn text(mut self, text: &str) -> Self {
    self.text = Some(text.to_owned());
    self
  }

  #[must_use]
  pub fn content_description(mut self, description: &str) -> Self {
    self.content_description = Some(description.to_owned());
    self
  }

  #[must_use]
  pub fn hint(mut self, hint: &str) -> Self {
    self.hint_text = Some(hint.to_owned());
    self
  }

  #[must_use]
  pub const fn labeled_by(mut self, id: i64) -> Self {
    self.labeled_by = Some(SourceId(id));
    self
  }

  #[must_use]
  pub fn child(mut self, id: i64) -> Self {
    self.children.push(SourceId(id));
    self
  }

  #[must_use]
  pub fn children(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
    self.children.extend(ids.into_iter().map(SourceId));
    self
  }

  #[must_use]
  pub fn action(mut self, action: ElementAction) -> Self {
    self.actions.push(action);
    self
  }
}
