/*!
Elements a screen reader focuses must have something to say.
*/

use super::{render_for, unsupported_reason, Category, Check, Parameters};
use crate::a11y::{is_accessibility_focusable, speakable_text};
use crate::hierarchy::Hierarchy;
use crate::messages::Catalog;
use crate::types::{CheckResult, ElementId, Locale, Severity};

/// Reports important, visible leaves and focus stops with empty speakable
/// text. Results follow pre-order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakableTextPresentCheck;

impl SpeakableTextPresentCheck {
  pub const ID: &'static str = "speakable_text_present";

  pub const NOT_IMPORTANT: u32 = 1;
  pub const NOT_VISIBLE: u32 = 2;
  pub const EDITABLE: u32 = 3;
  pub const MISSING_SPEAKABLE_TEXT: u32 = 4;
}

impl Check for SpeakableTextPresentCheck {
  fn id(&self) -> &'static str {
    Self::ID
  }

  fn category(&self) -> Category {
    Category::ContentLabeling
  }

  fn help_topic(&self) -> Option<&'static str> {
    Some("content-labels")
  }

  fn run(
    &self,
    h: &Hierarchy,
    root: Option<ElementId>,
    _params: Option<&Parameters>,
  ) -> Vec<CheckResult> {
    let locale = &h.device_state().locale;
    let mut results = Vec::new();

    for e in h.elements_to_evaluate(root) {
      let not_run = |reason| CheckResult::new(Self::ID, Severity::NotRun, Some(e.id), reason);

      if !e.important_for_accessibility {
        results.push(not_run(Self::NOT_IMPORTANT));
        continue;
      }
      if !e.is_visible() {
        results.push(not_run(Self::NOT_VISIBLE));
        continue;
      }
      if !e.is_leaf() && !is_accessibility_focusable(h, e) {
        continue;
      }
      // Editable text is covered by editable-label checks
      if e.is_editable() {
        results.push(not_run(Self::EDITABLE));
        continue;
      }
      if speakable_text(h, e, locale).trim().is_empty() {
        results.push(CheckResult::new(
          Self::ID,
          Severity::Error,
          Some(e.id),
          Self::MISSING_SPEAKABLE_TEXT,
        ));
      }
    }

    results
  }

  fn message(&self, catalog: &dyn Catalog, locale: &Locale, result: &CheckResult) -> String {
    let key = match result.reason() {
      Self::NOT_IMPORTANT => "not_important",
      Self::NOT_VISIBLE => "not_visible",
      Self::EDITABLE => "editable",
      Self::MISSING_SPEAKABLE_TEXT => "missing",
      other => unsupported_reason(Self::ID, other),
    };
    render_for(self, catalog, locale, key, &[])
  }
}
