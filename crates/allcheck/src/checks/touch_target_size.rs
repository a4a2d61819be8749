/*!
Clickable elements must be large enough to hit reliably.
*/

use super::{render_for, unsupported_reason, Category, Check, Parameters};
use crate::hierarchy::Hierarchy;
use crate::messages::Catalog;
use crate::types::{CheckResult, Element, ElementId, Locale, Metadata, Severity};

/// Flags visible clickable or long-clickable elements smaller than the
/// minimum size (48dp unless [`Parameters`] overrides it) in either
/// dimension. Results follow pre-order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTargetSizeCheck;

impl TouchTargetSizeCheck {
  pub const ID: &'static str = "touch_target_size";

  pub const TOO_SMALL: u32 = 1;
  /// The parent cuts the element off, so its reported bounds are not what
  /// the user can touch.
  pub const CLIPPED: u32 = 2;

  pub const KEY_WIDTH: &'static str = "width";
  pub const KEY_HEIGHT: &'static str = "height";
  pub const KEY_REQUIRED: &'static str = "required";
}

#[allow(clippy::cast_possible_truncation)] // dp sizes fit easily
fn round_dp(dp: f32) -> i64 {
  dp.round() as i64
}

fn is_clipped(h: &Hierarchy, e: &Element) -> bool {
  h.parent(e)
    .is_some_and(|parent| !parent.bounds.is_empty() && !parent.bounds.contains(&e.bounds))
}

impl Check for TouchTargetSizeCheck {
  fn id(&self) -> &'static str {
    Self::ID
  }

  fn category(&self) -> Category {
    Category::TouchTargetSize
  }

  fn help_topic(&self) -> Option<&'static str> {
    Some("touch-target-size")
  }

  fn run(
    &self,
    h: &Hierarchy,
    root: Option<ElementId>,
    params: Option<&Parameters>,
  ) -> Vec<CheckResult> {
    let display = &h.device_state().display;
    let required = Parameters::touch_target_size_dp(params);
    let required_dp = f64::from(required);

    let mut results = Vec::new();
    for e in h.elements_to_evaluate(root) {
      if !e.is_visible() || !(e.is_clickable() || e.is_long_clickable()) {
        continue;
      }

      let width = display.px_to_dp(e.bounds.width());
      let height = display.px_to_dp(e.bounds.height());
      if f64::from(width) >= required_dp && f64::from(height) >= required_dp {
        continue;
      }

      let (severity, reason) = if is_clipped(h, e) {
        (Severity::NotRun, Self::CLIPPED)
      } else {
        (Severity::Error, Self::TOO_SMALL)
      };
      let metadata = Metadata::new()
        .with(Self::KEY_WIDTH, round_dp(width))
        .with(Self::KEY_HEIGHT, round_dp(height))
        .with(Self::KEY_REQUIRED, i64::from(required));
      results.push(CheckResult::new(Self::ID, severity, Some(e.id), reason).with_metadata(metadata));
    }
    results
  }

  fn message(&self, catalog: &dyn Catalog, locale: &Locale, result: &CheckResult) -> String {
    match result.reason() {
      Self::TOO_SMALL => {
        let m = result.metadata();
        let value = |key| m.get_int(key).unwrap_or_default().to_string();
        render_for(
          self,
          catalog,
          locale,
          "too_small",
          &[
            ("width", value(Self::KEY_WIDTH)),
            ("height", value(Self::KEY_HEIGHT)),
            ("required", value(Self::KEY_REQUIRED)),
          ],
        )
      }
      Self::CLIPPED => render_for(self, catalog, locale, "clipped", &[]),
      other => unsupported_reason(Self::ID, other),
    }
  }
}
