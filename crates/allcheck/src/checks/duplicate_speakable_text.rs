/*!
Focus stops that announce the same text are hard to tell apart.

Grouping always spans the whole active window, so an element inside the
sub-root still conflicts with an identical one outside it. Only elements
inside the sub-root are reported.
*/

use super::{render_for, unsupported_reason, Category, Check, Parameters};
use crate::a11y::{should_focus, speakable_text};
use crate::hierarchy::Hierarchy;
use crate::messages::Catalog;
use crate::types::{CheckResult, Element, ElementId, Locale, Metadata, Severity};
use std::collections::HashMap;

/// Groups focus stops by speakable text. For each group of two or more,
/// the first clickable member gets a warning and every other member an
/// info. Results follow the order in which groups first appear, then
/// pre-order within a group.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateSpeakableTextCheck;

impl DuplicateSpeakableTextCheck {
  pub const ID: &'static str = "duplicate_speakable_text";

  pub const CLICKABLE_DUPLICATE: u32 = 1;
  pub const DUPLICATE: u32 = 2;

  pub const KEY_SPEAKABLE_TEXT: &'static str = "speakable_text";
  pub const KEY_CONFLICTING_COUNT: &'static str = "conflicting_count";
}

impl Check for DuplicateSpeakableTextCheck {
  fn id(&self) -> &'static str {
    Self::ID
  }

  fn category(&self) -> Category {
    Category::ContentLabeling
  }

  fn help_topic(&self) -> Option<&'static str> {
    Some("duplicate-descriptions")
  }

  fn run(
    &self,
    h: &Hierarchy,
    root: Option<ElementId>,
    _params: Option<&Parameters>,
  ) -> Vec<CheckResult> {
    let locale = &h.device_state().locale;

    // Groups in first-seen order
    let mut groups: Vec<(String, Vec<&Element>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for e in h.active_window_elements() {
      if !should_focus(h, e) {
        continue;
      }
      let text = speakable_text(h, e, locale).trim().to_owned();
      if text.is_empty() {
        continue;
      }
      match index.get(&text).and_then(|&i| groups.get_mut(i)) {
        Some((_, members)) => members.push(e),
        None => {
          index.insert(text.clone(), groups.len());
          groups.push((text, vec![e]));
        }
      }
    }

    let in_scope = |e: &Element| root.is_none_or(|r| h.is_in_subtree(e.id, r));

    let mut results = Vec::new();
    for (text, members) in groups.iter().filter(|(_, m)| m.len() > 1) {
      let warned = members.iter().position(|e| e.is_clickable());
      let conflicting = i64::try_from(members.len() - 1).unwrap_or(i64::MAX);
      for (i, &e) in members.iter().enumerate() {
        if !in_scope(e) {
          continue;
        }
        let (severity, reason) = if Some(i) == warned {
          (Severity::Warning, Self::CLICKABLE_DUPLICATE)
        } else {
          (Severity::Info, Self::DUPLICATE)
        };
        let metadata = Metadata::new()
          .with(Self::KEY_SPEAKABLE_TEXT, text.as_str())
          .with(Self::KEY_CONFLICTING_COUNT, conflicting);
        results.push(CheckResult::new(Self::ID, severity, Some(e.id), reason).with_metadata(metadata));
      }
    }

    if !results.is_empty() {
      log::debug!("{}: {} duplicate focus stops", Self::ID, results.len());
    }
    results
  }

  fn message(&self, catalog: &dyn Catalog, locale: &Locale, result: &CheckResult) -> String {
    let key = match result.reason() {
      Self::CLICKABLE_DUPLICATE => "clickable",
      Self::DUPLICATE => "duplicate",
      other => unsupported_reason(Self::ID, other),
    };
    let metadata = result.metadata();
    let text = metadata.get_str(Self::KEY_SPEAKABLE_TEXT).unwrap_or_default();
    let count = metadata.get_int(Self::KEY_CONFLICTING_COUNT).unwrap_or_default();
    render_for(
      self,
      catalog,
      locale,
      key,
      &[("text", text.to_owned()), ("count", count.to_string())],
    )
  }
}
