/*!
Localized message lookup.

Checks never build strings while detecting. They hand back reason codes and
metadata; titles and messages are looked up here at render time, keyed by
`(locale, key)`. The built-in catalog carries English text and is the
fallback for every locale. Hosts with real translations implement
[`Catalog`] or load a [`MapCatalog`].
*/

use crate::types::Locale;
use std::collections::HashMap;

/// Localized string lookup.
pub trait Catalog: Send + Sync {
  /// Template for `key` in `locale`, if this catalog has one.
  fn lookup(&self, locale: &Locale, key: &str) -> Option<String>;
}

/// Look up `key` and substitute `{name}` placeholders.
///
/// Missing keys render as the key itself so a gap in a translation never
/// hides a finding.
pub fn render(catalog: &dyn Catalog, locale: &Locale, key: &str, args: &[(&str, String)]) -> String {
  let template = catalog.lookup(locale, key).unwrap_or_else(|| {
    log::warn!("No message for key '{key}' in locale {locale}");
    key.to_owned()
  });
  substitute(&template, args)
}

/// Single pass over the template. Inserted values are never rescanned, and
/// unknown placeholders are kept as written.
fn substitute(template: &str, args: &[(&str, String)]) -> String {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;
  while let Some(open) = rest.find('{') {
    let (before, tail) = rest.split_at(open);
    out.push_str(before);
    let placeholder = tail.get(1..).and_then(|inner| {
      let close = inner.find('}')?;
      let name = inner.get(..close)?;
      let (_, value) = args.iter().find(|(n, _)| *n == name)?;
      Some((value, close + 2))
    });
    match placeholder {
      Some((value, consumed)) => {
        out.push_str(value);
        rest = tail.get(consumed..).unwrap_or_default();
      }
      None => {
        out.push('{');
        rest = tail.get(1..).unwrap_or_default();
      }
    }
  }
  out.push_str(rest);
  out
}

/// Keys shared by the focus/speakable heuristics.
pub mod keys {
  pub const CHECKED: &str = "speakable.checked";
  pub const NOT_CHECKED: &str = "speakable.not_checked";
  pub const LIST_EMPTY: &str = "speakable.list_empty";
  pub const FAILURE_HEADER: &str = "audit.failure_header";
}

const ENGLISH: &[(&str, &str)] = &[
  (keys::CHECKED, "Checked"),
  (keys::NOT_CHECKED, "Not checked"),
  (keys::LIST_EMPTY, "List showing 0 items"),
  (keys::FAILURE_HEADER, "There were {count} accessibility results:"),
  // Speakable text present
  ("speakable_text_present.title", "Item label"),
  (
    "speakable_text_present.missing",
    "This item may not have a label readable by screen readers.",
  ),
  (
    "speakable_text_present.not_important",
    "This item is not important for accessibility.",
  ),
  ("speakable_text_present.not_visible", "This item is not visible."),
  (
    "speakable_text_present.editable",
    "This item is editable; its label is evaluated by editable-text checks.",
  ),
  // Duplicate speakable text
  ("duplicate_speakable_text.title", "Duplicate item descriptions"),
  (
    "duplicate_speakable_text.clickable",
    "This clickable item's speakable text \"{text}\" is identical to that of {count} other item(s).",
  ),
  (
    "duplicate_speakable_text.duplicate",
    "This item's speakable text \"{text}\" is identical to that of {count} other item(s).",
  ),
  // Touch target size
  ("touch_target_size.title", "Touch target"),
  (
    "touch_target_size.too_small",
    "This item's size is {width}dp x {height}dp. Consider making this touch target {required}dp wide and {required}dp high or larger.",
  ),
  (
    "touch_target_size.clipped",
    "This item's touch target is clipped by its parent, so its size may be misreported.",
  ),
  // Unexposed text
  ("unexposed_text.title", "Unexposed text"),
  (
    "unexposed_text.no_ocr",
    "No text recognition results were provided, so on-screen text could not be evaluated.",
  ),
  (
    "unexposed_text.unexposed",
    "The text \"{text}\" is visible on screen but may not be exposed to screen readers.",
  ),
  (
    "unexposed_text.summary",
    "{count} pieces of visible text in this item may not be exposed to screen readers: {texts}.",
  ),
  (
    "unexposed_text.drawing_surface",
    "This item draws text directly (\"{texts}\"), which screen readers cannot read.",
  ),
  (
    "unexposed_text.image_only",
    "Text \"{text}\" was recognized inside an image; image text is not evaluated.",
  ),
];

/// English catalog. Answers every locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl Catalog for BuiltinCatalog {
  fn lookup(&self, _locale: &Locale, key: &str) -> Option<String> {
    ENGLISH
      .iter()
      .find(|(k, _)| *k == key)
      .map(|(_, v)| (*v).to_owned())
  }
}

/// In-memory catalog keyed by language subtag, falling back to
/// [`BuiltinCatalog`].
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
  entries: HashMap<(String, String), String>,
}

impl MapCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a template for a language (e.g. "fr") and key.
  #[must_use]
  pub fn with(mut self, language: &str, key: &str, template: &str) -> Self {
    self.entries.insert(
      (language.to_ascii_lowercase(), key.to_owned()),
      template.to_owned(),
    );
    self
  }
}

impl Catalog for MapCatalog {
  fn lookup(&self, locale: &Locale, key: &str) -> Option<String> {
    self
      .entries
      .get(&(locale.language(), key.to_owned()))
      .cloned()
      .or_else(|| BuiltinCatalog.lookup(locale, key))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_renders_placeholders() {
    let text = render(
      &BuiltinCatalog,
      &Locale::default(),
      "duplicate_speakable_text.duplicate",
      &[("text", "OK".into()), ("count", "2".into())],
    );
    assert_eq!(
      text,
      "This item's speakable text \"OK\" is identical to that of 2 other item(s)."
    );
  }

  #[test]
  fn values_are_inserted_verbatim() {
    let text = render(
      &BuiltinCatalog,
      &Locale::default(),
      "duplicate_speakable_text.duplicate",
      &[("text", "Save {count} items".into()), ("count", "1".into())],
    );
    assert_eq!(
      text,
      "This item's speakable text \"Save {count} items\" is identical to that of 1 other item(s)."
    );
  }

  #[test]
  fn unknown_placeholders_are_kept() {
    assert_eq!(
      substitute("{a} {b} {", &[("a", "x".into())]),
      "x {b} {"
    );
  }

  #[test]
  fn missing_key_renders_as_key() {
    let text = render(&BuiltinCatalog, &Locale::default(), "no.such.key", &[]);
    assert_eq!(text, "no.such.key");
  }

  #[test]
  fn map_catalog_overrides_by_language() {
    let catalog = MapCatalog::new().with("fr", keys::CHECKED, "Coché");
    assert_eq!(
      catalog.lookup(&Locale::new("fr-FR"), keys::CHECKED).as_deref(),
      Some("Coché")
    );
    assert_eq!(
      catalog.lookup(&Locale::new("en-US"), keys::CHECKED).as_deref(),
      Some("Checked"),
      "other languages fall back"
    );
    assert_eq!(
      catalog.lookup(&Locale::new("fr-FR"), keys::NOT_CHECKED).as_deref(),
      Some("Not checked"),
      "missing keys fall back"
    );
  }
}
