/*!
Speakable text: what a screen reader announces when it focuses an element.

Built depth first. A non-blank content description wins over everything
else, including children. Otherwise the element's text (or hint), its
checked state and an empty-list marker are followed by the speakable text
of each visible child that is not a focus stop of its own. Parts are joined
with ", ".
*/

use super::class_names;
use super::focus::is_accessibility_focusable;
use super::text::non_blank;
use crate::hierarchy::Hierarchy;
use crate::messages::{keys, render, BuiltinCatalog, Catalog};
use crate::types::{Element, Locale};

const SEPARATOR: &str = ", ";

/// Speakable text with markers from the built-in English catalog.
pub fn speakable_text(h: &Hierarchy, e: &Element, locale: &Locale) -> String {
  speakable_text_with(h, e, &BuiltinCatalog, locale)
}

/// Speakable text with markers looked up in `catalog`.
///
/// An important element labeled by another element announces the label's
/// subtree instead of its own.
pub fn speakable_text_with(
  h: &Hierarchy,
  e: &Element,
  catalog: &dyn Catalog,
  locale: &Locale,
) -> String {
  let source = if e.important_for_accessibility {
    h.labeled_by(e).unwrap_or(e)
  } else {
    e
  };
  subtree_text(h, source, catalog, locale)
}

fn subtree_text(h: &Hierarchy, e: &Element, catalog: &dyn Catalog, locale: &Locale) -> String {
  if let Some(description) = non_blank(e.content_description.as_deref()) {
    return description.to_owned();
  }

  let mut parts: Vec<String> = Vec::new();

  if let Some(own) = non_blank(e.text.as_deref()).or_else(|| non_blank(e.hint_text.as_deref())) {
    parts.push(own.to_owned());
  }

  if e.checkable == Some(true) {
    if let Some(checked) = e.checked {
      let key = if checked { keys::CHECKED } else { keys::NOT_CHECKED };
      parts.push(render(catalog, locale, key, &[]));
    }
  }

  if e.is_leaf() && e.is_instance_of(class_names::ABS_LIST_VIEW) {
    parts.push(render(catalog, locale, keys::LIST_EMPTY, &[]));
  }

  for child in h.children(e) {
    if child.is_visible() && !is_accessibility_focusable(h, child) {
      let text = subtree_text(h, child, catalog, locale);
      if !text.is_empty() {
        parts.push(text);
      }
    }
  }

  parts.join(SEPARATOR)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hierarchy::{ElementSnapshot as El, HierarchySnapshot, WindowSnapshot};
  use crate::messages::MapCatalog;
  use crate::types::{ElementId, Rect};

  fn build(elements: Vec<El>) -> Hierarchy {
    HierarchySnapshot::default()
      .window(
        WindowSnapshot::new(1, Rect::new(0, 0, 1080, 1920))
          .active(true)
          .elements(elements),
      )
      .build()
      .expect("valid hierarchy")
  }

  fn speak(h: &Hierarchy, id: u32) -> String {
    let e = h.element(ElementId(id)).expect("element exists");
    speakable_text(h, e, &Locale::default())
  }

  #[test]
  fn content_description_wins_over_everything() {
    let h = build(vec![
      El::new(1).children([2]),
      El::new(2)
        .content_description("Close")
        .text("X")
        .hint("hint")
        .checkable(true)
        .checked(true)
        .child(3),
      El::new(3).text("child"),
    ]);
    assert_eq!(speak(&h, 1), "Close");
  }

  #[test]
  fn text_then_hint() {
    let h = build(vec![
      El::new(1).children([2, 3]),
      El::new(2).text("Name").hint("Your name"),
      El::new(3).text("  ").hint("Your email"),
    ]);
    assert_eq!(speak(&h, 1), "Name");
    assert_eq!(speak(&h, 2), "Your email", "blank text is absent");
  }

  #[test]
  fn checked_marker_requires_known_state() {
    let h = build(vec![
      El::new(1).children([2, 3, 4]),
      El::new(2).text("Wi-Fi").checkable(true).checked(true),
      El::new(3).text("Bluetooth").checkable(true).checked(false),
      El::new(4).text("NFC").checkable(true),
    ]);
    assert_eq!(speak(&h, 1), "Wi-Fi, Checked");
    assert_eq!(speak(&h, 2), "Bluetooth, Not checked");
    assert_eq!(speak(&h, 3), "NFC");
  }

  #[test]
  fn empty_list_marker() {
    let h = build(vec![
      El::new(1).child(2),
      El::new(2).class_name(class_names::LIST_VIEW, &[class_names::ABS_LIST_VIEW]),
    ]);
    assert_eq!(speak(&h, 1), "List showing 0 items");
  }

  #[test]
  fn children_are_read_unless_focusable_or_hidden() {
    // 1 -> [2 "Title" -> [3 "Sub", 4 hidden "Secret", 5 clickable "Edit"]]
    let h = build(vec![
      El::new(1).child(2),
      El::new(2).text("Title").children([3, 4, 5]),
      El::new(3).text("Sub"),
      El::new(4).text("Secret").visible(false),
      El::new(5).text("Edit").clickable(true),
    ]);
    assert_eq!(speak(&h, 1), "Title, Sub");
  }

  #[test]
  fn labeled_by_redirects_important_elements() {
    // 1 -> [2 label "Email" -> [3 "(required)"], 4 field labeled by 2]
    let h = build(vec![
      El::new(1).children([2, 4]),
      El::new(2).text("Email").child(3),
      El::new(3).text("(required)"),
      El::new(4).editable(true).labeled_by(2),
    ]);
    assert_eq!(speak(&h, 3), "Email, (required)");
  }

  #[test]
  fn labeled_by_ignored_for_unimportant_elements() {
    let h = build(vec![
      El::new(1).children([2, 3]),
      El::new(2).text("Label"),
      El::new(3).text("Own").labeled_by(2).important(false),
    ]);
    assert_eq!(speak(&h, 2), "Own");
  }

  #[test]
  fn markers_are_localized() {
    let h = build(vec![El::new(1).child(2), El::new(2).checkable(true).checked(true)]);
    let catalog = MapCatalog::new().with("fr", keys::CHECKED, "Coché");
    let e = h.element(ElementId(1)).expect("element exists");
    assert_eq!(speakable_text_with(&h, e, &catalog, &Locale::new("fr-FR")), "Coché");
  }
}

#[cfg(test)]
mod proptests {
  use super::*;
  use crate::hierarchy::{ElementSnapshot as El, HierarchySnapshot, WindowSnapshot};
  use crate::types::{ElementId, Rect};
  use proptest::prelude::*;

  proptest! {
    /// A non-blank content description is announced exactly
    #[test]
    fn content_description_precedence(
      description in "[A-Za-z][A-Za-z ]{0,12}",
      text in prop::option::of("[a-z ]{0,8}"),
      hint in prop::option::of("[a-z ]{0,8}"),
      child_text in prop::option::of("[a-z]{1,8}"),
      checked in prop::option::of(any::<bool>()),
    ) {
      let mut target = El::new(2).content_description(&description).checkable(true).child(3);
      target.text = text;
      target.hint_text = hint;
      target.checked = checked;
      let mut child = El::new(3);
      child.text = child_text;

      let h = HierarchySnapshot::default()
        .window(
          WindowSnapshot::new(1, Rect::new(0, 0, 100, 100))
            .active(true)
            .elements([El::new(1).child(2), target, child]),
        )
        .build()
        .expect("valid hierarchy");
      let e = h.element(ElementId(1)).expect("element exists");
      prop_assert_eq!(speakable_text(&h, e, &Locale::default()), description);
    }
  }
}
