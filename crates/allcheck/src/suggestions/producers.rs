/*! Producers for the bundled checks. */

use super::{Attribute, FixSuggestion, FixSuggestionKind, FixSuggestionProducer};
use crate::a11y::is_actionable;
use crate::checks::{
  Parameters, SpeakableTextPresentCheck, TouchTargetSizeCheck, UnexposedTextCheck,
};
use crate::hierarchy::Hierarchy;
use crate::types::{CheckResult, Element};

const LABEL_PRIORITY: i32 = 100;
const EXPOSE_TEXT_PRIORITY: i32 = 80;
const DRAWING_SURFACE_PRIORITY: i32 = 60;
const TOUCH_TARGET_PRIORITY: i32 = 50;
const DROP_LABELED_BY_PRIORITY: i32 = 20;
const DECORATIVE_PRIORITY: i32 = 10;

fn subject<'h>(result: &CheckResult, h: &'h Hierarchy) -> Option<&'h Element> {
  result.element().and_then(|id| h.element(id))
}

/// Label unlabeled elements.
///
/// Proposes a content description from recognized text centred inside the
/// element, dropping a silent `labeled_by` link, and marking plain images as
/// decorative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakableTextSuggestions;

impl SpeakableTextSuggestions {
  fn recognized_text(e: &Element, params: Option<&Parameters>) -> Option<String> {
    let ocr = params.and_then(Parameters::ocr_result)?;
    let threshold = Parameters::confidence_threshold(params);
    let text = ocr
      .paragraphs
      .iter()
      .filter(|p| p.confidence.is_none_or(|c| c >= threshold))
      .filter(|p| e.bounds.contains_point(p.bounds.center()))
      .map(|p| p.text.trim())
      .filter(|t| !t.is_empty())
      .collect::<Vec<_>>()
      .join(" ");
    (!text.is_empty()).then_some(text)
  }
}

impl FixSuggestionProducer for SpeakableTextSuggestions {
  fn check_id(&self) -> &'static str {
    SpeakableTextPresentCheck::ID
  }

  fn produce(
    &self,
    result: &CheckResult,
    h: &Hierarchy,
    params: Option<&Parameters>,
  ) -> Vec<FixSuggestion> {
    if result.reason() != SpeakableTextPresentCheck::MISSING_SPEAKABLE_TEXT {
      return Vec::new();
    }
    let Some(e) = subject(result, h) else {
      return Vec::new();
    };

    let mut suggestions = Vec::new();
    if let Some(text) = Self::recognized_text(e, params) {
      suggestions.push(FixSuggestion::set(
        e.id,
        Attribute::ContentDescription,
        text,
        LABEL_PRIORITY,
      ));
    }
    if e.labeled_by.is_some() {
      suggestions.push(FixSuggestion::remove(
        e.id,
        Attribute::LabeledBy,
        DROP_LABELED_BY_PRIORITY,
      ));
    }
    if e.role().is_image() && !is_actionable(e) {
      suggestions.push(FixSuggestion::set(
        e.id,
        Attribute::ImportantForAccessibility,
        "no",
        DECORATIVE_PRIORITY,
      ));
    }
    suggestions
  }
}

/// Grow small touch targets to the required size.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTargetSuggestions;

impl FixSuggestionProducer for TouchTargetSuggestions {
  fn check_id(&self) -> &'static str {
    TouchTargetSizeCheck::ID
  }

  fn produce(
    &self,
    result: &CheckResult,
    _h: &Hierarchy,
    _params: Option<&Parameters>,
  ) -> Vec<FixSuggestion> {
    let (Some(element), TouchTargetSizeCheck::TOO_SMALL) = (result.element(), result.reason()) else {
      return Vec::new();
    };
    let metadata = result.metadata();
    let (Some(width), Some(height), Some(required)) = (
      metadata.get_int(TouchTargetSizeCheck::KEY_WIDTH),
      metadata.get_int(TouchTargetSizeCheck::KEY_HEIGHT),
      metadata.get_int(TouchTargetSizeCheck::KEY_REQUIRED),
    ) else {
      return Vec::new();
    };

    let value = format!("{required}dp");
    let mut parts = Vec::new();
    if width < required {
      parts.push(FixSuggestionKind::SetAttribute {
        element,
        attribute: Attribute::MinWidth,
        value: value.clone(),
      });
    }
    if height < required {
      parts.push(FixSuggestionKind::SetAttribute {
        element,
        attribute: Attribute::MinHeight,
        value,
      });
    }

    let kind = if parts.len() > 1 {
      FixSuggestionKind::Composite { parts }
    } else if let Some(single) = parts.pop() {
      single
    } else {
      return Vec::new();
    };
    vec![FixSuggestion::new(kind, TOUCH_TARGET_PRIORITY)]
  }
}

/// Expose recognized text through the element's content description.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnexposedTextSuggestions;

impl FixSuggestionProducer for UnexposedTextSuggestions {
  fn check_id(&self) -> &'static str {
    UnexposedTextCheck::ID
  }

  fn produce(
    &self,
    result: &CheckResult,
    _h: &Hierarchy,
    _params: Option<&Parameters>,
  ) -> Vec<FixSuggestion> {
    let Some(element) = result.element() else {
      return Vec::new();
    };
    let metadata = result.metadata();
    let (text, priority) = match result.reason() {
      UnexposedTextCheck::UNEXPOSED_TEXT => (
        metadata.get_str(UnexposedTextCheck::KEY_OCR_TEXT).map(str::to_owned),
        EXPOSE_TEXT_PRIORITY,
      ),
      UnexposedTextCheck::UNEXPOSED_TEXT_SUMMARY => (
        metadata
          .get_string_list(UnexposedTextCheck::KEY_OCR_TEXTS)
          .map(|texts| texts.join(" ")),
        EXPOSE_TEXT_PRIORITY,
      ),
      UnexposedTextCheck::DRAWING_SURFACE => (
        metadata
          .get_string_list(UnexposedTextCheck::KEY_OCR_TEXTS)
          .map(|texts| texts.join(" ")),
        DRAWING_SURFACE_PRIORITY,
      ),
      _ => (None, 0),
    };
    text
      .filter(|t| !t.trim().is_empty())
      .map(|t| FixSuggestion::set(element, Attribute::ContentDescription, t, priority))
      .into_iter()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::checks::{OcrParagraph, OcrResult};
  use crate::hierarchy::{ElementSnapshot as El, HierarchySnapshot, WindowSnapshot};
  use crate::suggestions::FixSuggestionEngine;
  use crate::types::{ElementId, Metadata, Rect, Severity};
  use crate::a11y::class_names;

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

  fn missing_label(id: u32) -> CheckResult {
    CheckResult::new(
      SpeakableTextPresentCheck::ID,
      Severity::Error,
      Some(ElementId(id)),
      SpeakableTextPresentCheck::MISSING_SPEAKABLE_TEXT,
    )
  }

  mod speakable_text {
    use super::*;

    #[test]
    fn content_description_from_overlapping_ocr() {
      let h = build(vec![
        El::new(1).child(2),
        El::new(2).clickable(true).bounds(Rect::new(100, 100, 300, 200)),
      ]);
      let params = Parameters::new().with_ocr_result(OcrResult::new(vec![
        OcrParagraph::new(" Send ", Rect::new(120, 120, 200, 180)),
        OcrParagraph::new("Elsewhere", Rect::new(500, 500, 600, 600)),
        OcrParagraph::new("Blurry", Rect::new(210, 120, 290, 180)).confidence(0.1),
      ]));
      let out = SpeakableTextSuggestions.produce(&missing_label(1), &h, Some(&params));
      assert_eq!(
        out,
        vec![FixSuggestion::set(ElementId(1), Attribute::ContentDescription, "Send", LABEL_PRIORITY)]
      );
    }

    #[test]
    fn decorative_image_alternative() {
      let h = build(vec![
        El::new(1).child(2),
        El::new(2).class_name(class_names::IMAGE_VIEW, &[class_names::VIEW]),
      ]);
      let out = SpeakableTextSuggestions.produce(&missing_label(1), &h, None);
      assert_eq!(
        out,
        vec![FixSuggestion::set(
          ElementId(1),
          Attribute::ImportantForAccessibility,
          "no",
          DECORATIVE_PRIORITY
        )]
      );
    }

    #[test]
    fn silent_label_link_can_be_dropped() {
      let h = build(vec![
        El::new(1).children([2, 3]),
        El::new(2),
        El::new(3).labeled_by(2),
      ]);
      let out = SpeakableTextSuggestions.produce(&missing_label(2), &h, None);
      assert_eq!(
        out,
        vec![FixSuggestion::remove(ElementId(2), Attribute::LabeledBy, DROP_LABELED_BY_PRIORITY)]
      );
    }

    #[test]
    fn other_reasons_have_no_suggestions() {
      let h = build(vec![El::new(1)]);
      let result = CheckResult::new(
        SpeakableTextPresentCheck::ID,
        Severity::NotRun,
        Some(ElementId(0)),
        SpeakableTextPresentCheck::NOT_VISIBLE,
      );
      assert!(SpeakableTextSuggestions.produce(&result, &h, None).is_empty());
    }
  }

  mod touch_target {
    use super::*;

    fn too_small(width: i64, height: i64) -> CheckResult {
      CheckResult::new(
        TouchTargetSizeCheck::ID,
        Severity::Error,
        Some(ElementId(1)),
        TouchTargetSizeCheck::TOO_SMALL,
      )
      .with_metadata(
        Metadata::new()
          .with("width", width)
          .with("height", height)
          .with("required", 48_i64),
      )
    }

    #[test]
    fn single_dimension() {
      let h = build(vec![El::new(1)]);
      let out = TouchTargetSuggestions.produce(&too_small(40, 48), &h, None);
      assert_eq!(
        out,
        vec![FixSuggestion::set(ElementId(1), Attribute::MinWidth, "48dp", TOUCH_TARGET_PRIORITY)]
      );
    }

    #[test]
    fn both_dimensions_are_one_composite() {
      let h = build(vec![El::new(1)]);
      let out = TouchTargetSuggestions.produce(&too_small(20, 30), &h, None);
      let [suggestion] = out.as_slice() else {
        panic!("expected one suggestion, got {out:?}");
      };
      let attributes: Vec<_> = suggestion
        .kind
        .edits()
        .into_iter()
        .filter_map(|k| match k {
          FixSuggestionKind::SetAttribute { attribute, .. } => Some(*attribute),
          FixSuggestionKind::RemoveAttribute { .. } | FixSuggestionKind::Composite { .. } => None,
        })
        .collect();
      assert_eq!(attributes, vec![Attribute::MinWidth, Attribute::MinHeight]);
    }
  }

  mod unexposed_text {
    use super::*;

    #[test]
    fn summary_joins_texts() {
      let h = build(vec![El::new(1)]);
      let result = CheckResult::new(
        UnexposedTextCheck::ID,
        Severity::Warning,
        Some(ElementId(0)),
        UnexposedTextCheck::UNEXPOSED_TEXT_SUMMARY,
      )
      .with_metadata(
        Metadata::new()
          .with("ocr_texts", vec!["Total".to_owned(), "$12".to_owned(), "Pay".to_owned()])
          .with("count", 3_i64),
      );
      let out = FixSuggestionEngine::with_defaults().suggest(&result, &h, None);
      assert_eq!(
        out,
        vec![FixSuggestion::set(
          ElementId(0),
          Attribute::ContentDescription,
          "Total $12 Pay",
          EXPOSE_TEXT_PRIORITY
        )]
      );
    }

    #[test]
    fn not_run_results_have_no_suggestions() {
      let h = build(vec![El::new(1)]);
      let result = CheckResult::new(
        UnexposedTextCheck::ID,
        Severity::NotRun,
        None,
        UnexposedTextCheck::NO_OCR_RESULTS,
      );
      assert!(UnexposedTextSuggestions.produce(&result, &h, None).is_empty());
    }
  }

  #[test]
  fn engine_ranks_label_before_alternatives() {
    let h = build(vec![
      El::new(1).children([2, 3]),
      El::new(2).text("Label"),
      El::new(3)
        .class_name(class_names::IMAGE_VIEW, &[class_names::VIEW])
        .bounds(Rect::new(0, 0, 100, 100))
        .labeled_by(2),
    ]);
    let params = Parameters::new().with_ocr_result(OcrResult::new(vec![OcrParagraph::new(
      "Logo",
      Rect::new(10, 10, 90, 90),
    )]));
    let out = FixSuggestionEngine::with_defaults().suggest(&missing_label(2), &h, Some(&params));
    let priorities: Vec<_> = out.iter().map(|s| s.priority).collect();
    assert_eq!(
      priorities,
      vec![LABEL_PRIORITY, DROP_LABELED_BY_PRIORITY, DECORATIVE_PRIORITY]
    );
  }
}
