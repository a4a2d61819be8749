/*!
Screen-reader focus heuristics.

These answer "would a screen reader stop on this element?". The rules
follow how Android's TalkBack linearizes a window: actionable elements are
focus stops, and plain text is a focus stop only when nothing above it
already reads it out.
*/

use super::class_names;
use super::text::non_blank;
use crate::hierarchy::Hierarchy;
use crate::types::Element;

/// Container types whose direct children are focus stops in their own right.
const SCROLL_ITEM_CONTAINERS: &[&str] = &[
  class_names::ADAPTER_VIEW,
  class_names::SCROLL_VIEW,
  class_names::HORIZONTAL_SCROLL_VIEW,
  class_names::TW_ADAPTER_VIEW,
];

/// Would the screen reader move focus to this element?
pub fn should_focus(h: &Hierarchy, e: &Element) -> bool {
  if !e.is_visible() {
    return false;
  }

  if is_accessibility_focusable(h, e) {
    // Unlabeled actionable controls must stay reachable
    if !has_any_important_descendant(h, e) {
      return true;
    }
    return is_speaking(e) || has_non_actionable_speaking_descendants(h, e);
  }

  has_text(e) && e.important_for_accessibility && !has_focusable_ancestor(h, e)
}

/// Can the element take accessibility focus on its own?
pub fn is_accessibility_focusable(h: &Hierarchy, e: &Element) -> bool {
  e.is_visible()
    && e.important_for_accessibility
    && (is_actionable(e) || (is_top_level_scroll_item(h, e) && is_speaking(e)))
}

/// Clickable, focusable or long-clickable.
pub fn is_actionable(e: &Element) -> bool {
  e.is_clickable() || e.is_focusable() || e.is_long_clickable()
}

/// Is the element a direct child of a scrolling or adapter-style container?
///
/// Single-selection containers (spinners) are excluded: their items are not
/// navigated individually.
pub fn is_top_level_scroll_item(h: &Hierarchy, e: &Element) -> bool {
  let Some(parent) = h.parent(e) else {
    return false;
  };
  if parent.is_instance_of(class_names::SPINNER) {
    return false;
  }
  parent.is_scrollable() || parent.is_instance_of_any(SCROLL_ITEM_CONTAINERS)
}

/// Has non-blank text, content description or hint.
pub fn has_text(e: &Element) -> bool {
  non_blank(e.text.as_deref()).is_some()
    || non_blank(e.content_description.as_deref()).is_some()
    || non_blank(e.hint_text.as_deref()).is_some()
}

/// Does the element have anything of its own to announce?
pub fn is_speaking(e: &Element) -> bool {
  has_text(e) || (e.checkable == Some(true) && e.checked.is_some())
}

pub fn has_any_important_descendant(h: &Hierarchy, e: &Element) -> bool {
  h.descendants(e)
    .iter()
    .any(|d| d.important_for_accessibility)
}

/// Is there a visible child, not focusable on its own, that speaks (or whose
/// own such descendants speak)? Those children are read as part of `e`.
pub fn has_non_actionable_speaking_descendants(h: &Hierarchy, e: &Element) -> bool {
  h.children(e).any(|child| {
    child.is_visible()
      && !is_accessibility_focusable(h, child)
      && (is_speaking(child) || has_non_actionable_speaking_descendants(h, child))
  })
}

pub fn has_focusable_ancestor(h: &Hierarchy, e: &Element) -> bool {
  h.ancestors(e).any(|a| is_accessibility_focusable(h, a))
}
