/*!
Rule checks.

A [`Check`] consumes a hierarchy (plus an optional sub-root and
[`Parameters`]) and returns results in its own documented order. Checks
never render text while detecting: results carry a reason code and
metadata, and [`Check::message`] turns them into prose later.

Checks are registered in explicit, ordered [`Preset`] lists.

## Module Structure

- `mod.rs` - `Check` trait, `Category`, `Preset`
- `parameters.rs` - per-run inputs (`Parameters`, `Screenshot`)
- `ocr.rs` - recognized-text input
- one file per check
*/

mod duplicate_speakable_text;
mod ocr;
mod parameters;
mod speakable_text_present;
mod touch_target_size;
mod unexposed_text;

pub use duplicate_speakable_text::DuplicateSpeakableTextCheck;
pub use ocr::{OcrParagraph, OcrResult, OcrWord};
pub use parameters::{
  Parameters, Screenshot, DEFAULT_OCR_CONFIDENCE_THRESHOLD, DEFAULT_TOUCH_TARGET_SIZE_DP,
};
pub use speakable_text_present::SpeakableTextPresentCheck;
pub use touch_target_size::TouchTargetSizeCheck;
pub use unexposed_text::UnexposedTextCheck;

use crate::hierarchy::Hierarchy;
use crate::messages::{render, Catalog};
use crate::types::{CheckResult, ElementId, Locale};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

/// Broad grouping of checks, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
  /// Labels and descriptions a screen reader announces.
  ContentLabeling,
  /// Size and spacing of interactive elements.
  TouchTargetSize,
  /// Color and contrast.
  LowContrast,
  /// Implementation details that break assistive technology.
  Implementation,
}

/// One accessibility rule.
pub trait Check: Send + Sync {
  /// Stable identifier. Results carry it and message keys start with it.
  fn id(&self) -> &'static str;

  fn category(&self) -> Category;

  /// Reference into external help documentation.
  fn help_topic(&self) -> Option<&'static str> {
    None
  }

  /// Evaluate `h`, restricted to the subtree of `root` when given.
  fn run(
    &self,
    h: &Hierarchy,
    root: Option<ElementId>,
    params: Option<&Parameters>,
  ) -> Vec<CheckResult>;

  /// Short localized title.
  fn title(&self, catalog: &dyn Catalog, locale: &Locale) -> String {
    render(catalog, locale, &format!("{}.title", self.id()), &[])
  }

  /// Localized message for one of this check's results.
  ///
  /// # Panics
  ///
  /// On a reason code this check never produces.
  fn message(&self, catalog: &dyn Catalog, locale: &Locale, result: &CheckResult) -> String;
}

impl std::fmt::Debug for dyn Check {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Check").field(&self.id()).finish()
  }
}

/// Render a check's message for `key` (relative to the check id).
pub(crate) fn render_for(
  check: &dyn Check,
  catalog: &dyn Catalog,
  locale: &Locale,
  key: &str,
  args: &[(&str, String)],
) -> String {
  render(catalog, locale, &format!("{}.{key}", check.id()), args)
}

#[allow(clippy::panic)] // Asking for a message the check never produces is a bug in the caller
pub(crate) fn unsupported_reason(check: &str, reason: u32) -> ! {
  panic!("Check '{check}' has no message for reason code {reason}")
}

/// Ordered check lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Preset {
  /// Every bundled check.
  #[default]
  Latest,
  /// Nothing. For hosts that register checks one by one.
  NoChecks,
}

impl Preset {
  /// Checks of this preset, in run order.
  pub fn checks(self) -> Vec<Arc<dyn Check>> {
    match self {
      Self::Latest => vec![
        Arc::new(SpeakableTextPresentCheck),
        Arc::new(DuplicateSpeakableTextCheck),
        Arc::new(TouchTargetSizeCheck),
        Arc::new(UnexposedTextCheck),
      ],
      Self::NoChecks => Vec::new(),
    }
  }

  /// Look up a preset by its serialized name ("latest", "no_checks").
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "latest" => Some(Self::Latest),
      "no_checks" => Some(Self::NoChecks),
      _ => None,
    }
  }
}

/// A bundled check by id.
pub fn by_id(id: &str) -> Option<Arc<dyn Check>> {
  Preset::Latest.checks().into_iter().find(|c| c.id() == id)
}
