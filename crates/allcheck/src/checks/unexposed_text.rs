/*!
Text that is visible on screen but missing from every element's speakable
text.

Recognized text is matched to elements by bounding-box overlap and then
compared with what a screen reader would announce for the matched element.
OCR is noisy, so the comparison tolerates case, punctuation and a single
character error, and uses per-glyph boxes when the capture has them.

Pipeline:

1. Keep paragraphs whose centre lies in the active window, outside any
   system or input-method window, and inside the sub-root's bounds. Drop
   words below the confidence threshold.
2. Flatten paragraphs into words, remembering each word's byte span in the
   paragraph text.
3. Match every word twice: against visible, important focus stops, and
   against every visible element. Best match is the highest IOU; ties go
   to the earlier element.
4. Merge runs of adjacent words from one paragraph with identical matches
   that sit on the same line into phrases. A dropped word ends the run.
5. Compare each phrase with the speakable text of its primary match (the
   focus-stop match, else the any-element match).
6. Report unexposed phrases per element.
*/

use super::{render_for, unsupported_reason, Category, Check, OcrParagraph, Parameters};
use crate::a11y::text::{char_len, edit_distance, normalize};
use crate::a11y::{should_focus, speakable_text};
use crate::hierarchy::Hierarchy;
use crate::messages::Catalog;
use crate::types::{CheckResult, Element, ElementId, Locale, Metadata, Rect, Severity};
use std::ops::Range;

/// Flags recognized text that no element exposes.
///
/// Without an OCR result the check emits a single `NotRun`
/// ([`Self::NO_OCR_RESULTS`]). Otherwise results are grouped per element,
/// ordered by each element's first unexposed phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnexposedTextCheck;

impl UnexposedTextCheck {
  pub const ID: &'static str = "unexposed_text";

  pub const NO_OCR_RESULTS: u32 = 1;
  pub const UNEXPOSED_TEXT: u32 = 2;
  pub const UNEXPOSED_TEXT_SUMMARY: u32 = 3;
  pub const DRAWING_SURFACE: u32 = 4;
  pub const IMAGE_ONLY: u32 = 5;

  pub const KEY_OCR_TEXT: &'static str = "ocr_text";
  pub const KEY_OCR_TEXTS: &'static str = "ocr_texts";
  pub const KEY_BOUNDS: &'static str = "bounds";
  pub const KEY_COUNT: &'static str = "count";

  /// More unexposed phrases than this on one element collapse into a summary.
  pub const MAX_INDIVIDUAL_RESULTS: usize = 2;
  /// Phrase vs. speakable text, on normalized forms.
  pub const MAX_EDIT_DISTANCE: usize = 1;
  /// Phrase vs. glyph-reconciled text, on normalized forms.
  pub const MAX_GLYPH_EDIT_DISTANCE: usize = 2;
}

/// A recognized word, located in its paragraph.
#[derive(Debug, Clone)]
struct Word<'a> {
  paragraph: usize,
  /// Position among the paragraph's non-blank words, dropped ones included
  position: usize,
  source: &'a str,
  text: &'a str,
  bounds: Rect,
  span: Option<Range<usize>>,
  focusable_match: Option<ElementId>,
  any_match: Option<ElementId>,
}

impl Word<'_> {
  fn same_matches(&self, other: &Self) -> bool {
    self.focusable_match == other.focusable_match && self.any_match == other.any_match
  }

  /// Does `next` continue this word's line? Its vertical centre must fall
  /// inside this word's vertical span.
  fn shares_line_with(&self, next: &Self) -> bool {
    let y = next.bounds.center().y;
    y >= self.bounds.top() && y < self.bounds.bottom()
  }
}

/// Consecutive words merged back into one piece of text.
#[derive(Debug, Clone)]
struct Phrase<'a> {
  words: Vec<Word<'a>>,
}

impl Phrase<'_> {
  fn bounds(&self) -> Rect {
    self
      .words
      .iter()
      .fold(Rect::default(), |acc, w| acc.union(&w.bounds))
  }

  /// The paragraph slice from the first word to the last, or the words
  /// joined by spaces when a word could not be located in the paragraph.
  fn text(&self) -> String {
    let located = self.words.iter().all(|w| w.span.is_some());
    let first = self.words.first();
    let last = self.words.last();
    if let (true, Some(first), Some(last)) = (located, first, last) {
      let slice = first
        .span
        .as_ref()
        .zip(last.span.as_ref())
        .and_then(|(f, l)| first.source.get(f.start..l.end));
      if let Some(slice) = slice {
        return slice.to_owned();
      }
    }
    self
      .words
      .iter()
      .map(|w| w.text)
      .collect::<Vec<_>>()
      .join(" ")
  }

  fn primary(&self) -> Option<ElementId> {
    self
      .words
      .first()
      .and_then(|w| w.focusable_match.or(w.any_match))
  }
}

/// Paragraphs that fall inside the evaluated region.
fn in_scope(h: &Hierarchy, root: Option<ElementId>, paragraph: &OcrParagraph) -> bool {
  let center = paragraph.bounds.center();
  let active = h.active_window();
  if !active.bounds.contains_point(center) {
    return false;
  }
  let covered_by_overlay = h
    .windows()
    .iter()
    .any(|w| w.id != active.id && w.kind.is_system_overlay() && w.bounds.contains_point(center));
  if covered_by_overlay {
    return false;
  }
  match root {
    Some(root) => h
      .element(root)
      .is_some_and(|e| e.bounds.contains_point(center)),
    None => true,
  }
}

/// Split a paragraph into words above the confidence threshold.
fn words_of(index: usize, paragraph: &OcrParagraph, threshold: f32) -> Vec<Word<'_>> {
  let below = |confidence: Option<f32>| confidence.is_some_and(|c| c < threshold);

  if paragraph.words.is_empty() {
    if below(paragraph.confidence) || paragraph.text.trim().is_empty() {
      return Vec::new();
    }
    return vec![Word {
      paragraph: index,
      position: 0,
      source: &paragraph.text,
      text: &paragraph.text,
      bounds: paragraph.bounds,
      span: Some(0..paragraph.text.len()),
      focusable_match: None,
      any_match: None,
    }];
  }

  let mut cursor = 0;
  let mut words = Vec::new();
  let non_blank = paragraph.words.iter().filter(|w| !w.text.trim().is_empty());
  for (position, word) in non_blank.enumerate() {
    let span = paragraph
      .text
      .get(cursor..)
      .and_then(|rest| rest.find(word.text.as_str()))
      .map(|offset| cursor + offset..cursor + offset + word.text.len());
    if let Some(span) = &span {
      cursor = span.end;
    }
    if below(word.confidence.or(paragraph.confidence)) {
      continue;
    }
    words.push(Word {
      paragraph: index,
      position,
      source: &paragraph.text,
      text: &word.text,
      bounds: word.bounds,
      span,
      focusable_match: None,
      any_match: None,
    });
  }
  words
}

/// Highest-IOU element. Earlier elements win ties.
fn best_match<'e>(bounds: &Rect, candidates: &[&'e Element]) -> Option<&'e Element> {
  let mut best: Option<(&Element, f64)> = None;
  for &candidate in candidates {
    let score = candidate.bounds.iou(bounds);
    if score > 0.0 && best.is_none_or(|(_, s)| score > s) {
      best = Some((candidate, score));
    }
  }
  best.map(|(e, _)| e)
}

fn merge_phrases(words: Vec<Word<'_>>) -> Vec<Phrase<'_>> {
  let mut phrases: Vec<Phrase<'_>> = Vec::new();
  for word in words {
    let continues = phrases
      .last()
      .and_then(|p| p.words.last())
      .is_some_and(|prev| {
        prev.paragraph == word.paragraph
          && prev.position + 1 == word.position
          && prev.same_matches(&word)
          && prev.shares_line_with(&word)
      });
    match phrases.last_mut() {
      Some(phrase) if continues => phrase.words.push(word),
      Some(_) | None => phrases.push(Phrase { words: vec![word] }),
    }
  }
  phrases
}

/// The element's text restricted to glyphs overlapping `bounds`, when it
/// is close enough to what OCR read.
fn reconcile_with_glyphs(e: &Element, phrase: &str, bounds: &Rect) -> Option<String> {
  let text = e.text.as_deref()?;
  if e.text_character_locations.is_empty() {
    return None;
  }
  let reconciled: String = text
    .chars()
    .zip(&e.text_character_locations)
    .filter(|(_, glyph)| glyph.intersects(bounds))
    .map(|(c, _)| c)
    .collect();
  if reconciled.trim().is_empty() {
    return None;
  }
  let distance = edit_distance(&normalize(&reconciled), &normalize(phrase));
  (distance <= UnexposedTextCheck::MAX_GLYPH_EDIT_DISTANCE).then_some(reconciled)
}

/// Is `ocr` covered by `speakable`, allowing for recognition noise?
fn text_matches(ocr: &str, speakable: &str) -> bool {
  if speakable.contains(ocr) {
    return true;
  }
  let ocr = normalize(ocr);
  let speakable = normalize(speakable);
  // Nothing alphanumeric left to expose
  if ocr.is_empty() || speakable.contains(&ocr) {
    return true;
  }
  char_len(&ocr).abs_diff(char_len(&speakable)) <= 1
    && edit_distance(&ocr, &speakable) <= UnexposedTextCheck::MAX_EDIT_DISTANCE
}

fn is_exposed(h: &Hierarchy, e: &Element, phrase: &Phrase<'_>, locale: &Locale) -> bool {
  let text = phrase.text();
  let text = reconcile_with_glyphs(e, &text, &phrase.bounds()).unwrap_or(text);
  text_matches(&text, &speakable_text(h, e, locale))
}

impl UnexposedTextCheck {
  fn report(element: &Element, phrases: &[(String, Rect)]) -> Vec<CheckResult> {
    let id = Some(element.id);
    let texts = || phrases.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>();
    let count = i64::try_from(phrases.len()).unwrap_or(i64::MAX);
    let role = element.role();

    if role.is_image() {
      return phrases
        .iter()
        .map(|(text, bounds)| {
          CheckResult::new(Self::ID, Severity::NotRun, id, Self::IMAGE_ONLY).with_metadata(
            Metadata::new()
              .with(Self::KEY_OCR_TEXT, text.as_str())
              .with(Self::KEY_BOUNDS, *bounds),
          )
        })
        .collect();
    }

    if role.is_drawing_surface() {
      let metadata = Metadata::new()
        .with(Self::KEY_OCR_TEXTS, texts())
        .with(Self::KEY_COUNT, count);
      return vec![
        CheckResult::new(Self::ID, Severity::Warning, id, Self::DRAWING_SURFACE).with_metadata(metadata),
      ];
    }

    if phrases.len() > Self::MAX_INDIVIDUAL_RESULTS {
      let metadata = Metadata::new()
        .with(Self::KEY_OCR_TEXTS, texts())
        .with(Self::KEY_COUNT, count);
      return vec![
        CheckResult::new(Self::ID, Severity::Warning, id, Self::UNEXPOSED_TEXT_SUMMARY)
          .with_metadata(metadata),
      ];
    }

    phrases
      .iter()
      .map(|(text, bounds)| {
        CheckResult::new(Self::ID, Severity::Warning, id, Self::UNEXPOSED_TEXT).with_metadata(
          Metadata::new()
            .with(Self::KEY_OCR_TEXT, text.as_str())
            .with(Self::KEY_BOUNDS, *bounds),
        )
      })
      .collect()
  }
}

impl Check for UnexposedTextCheck {
  fn id(&self) -> &'static str {
    Self::ID
  }

  fn category(&self) -> Category {
    Category::Implementation
  }

  fn run(
    &self,
    h: &Hierarchy,
    root: Option<ElementId>,
    params: Option<&Parameters>,
  ) -> Vec<CheckResult> {
    let Some(ocr) = params.and_then(Parameters::ocr_result) else {
      return vec![CheckResult::new(Self::ID, Severity::NotRun, None, Self::NO_OCR_RESULTS)];
    };
    let threshold = Parameters::confidence_threshold(params);
    let locale = &h.device_state().locale;

    let visible: Vec<&Element> = h
      .active_window_elements()
      .iter()
      .filter(|e| e.is_visible())
      .collect();
    let focus_stops: Vec<&Element> = visible
      .iter()
      .copied()
      .filter(|e| e.important_for_accessibility && should_focus(h, e))
      .collect();

    let mut words: Vec<Word<'_>> = ocr
      .paragraphs
      .iter()
      .enumerate()
      .filter(|(_, p)| in_scope(h, root, p))
      .flat_map(|(i, p)| words_of(i, p, threshold))
      .collect();
    for word in &mut words {
      word.focusable_match = best_match(&word.bounds, &focus_stops).map(|e| e.id);
      word.any_match = best_match(&word.bounds, &visible).map(|e| e.id);
    }

    // Unexposed phrases per element, in order of each element's first phrase
    let mut unexposed: Vec<(&Element, Vec<(String, Rect)>)> = Vec::new();
    for phrase in merge_phrases(words) {
      let Some(element) = phrase.primary().and_then(|id| h.element(id)) else {
        log::debug!("{}: no element under \"{}\"", Self::ID, phrase.text());
        continue;
      };
      if is_exposed(h, element, &phrase, locale) {
        continue;
      }
      let entry = (phrase.text(), phrase.bounds());
      match unexposed.iter_mut().find(|(e, _)| e.id == element.id) {
        Some((_, phrases)) => phrases.push(entry),
        None => unexposed.push((element, vec![entry])),
      }
    }

    unexposed
      .iter()
      .flat_map(|(element, phrases)| Self::report(element, phrases))
      .collect()
  }

  fn message(&self, catalog: &dyn Catalog, locale: &Locale, result: &CheckResult) -> String {
    let m = result.metadata();
    let text = || m.get_str(Self::KEY_OCR_TEXT).unwrap_or_default().to_owned();
    let texts = || {
      m.get_string_list(Self::KEY_OCR_TEXTS)
        .unwrap_or_default()
        .join("\", \"")
    };
    match result.reason() {
      Self::NO_OCR_RESULTS => render_for(self, catalog, locale, "no_ocr", &[]),
      Self::UNEXPOSED_TEXT => render_for(self, catalog, locale, "unexposed", &[("text", text())]),
      Self::UNEXPOSED_TEXT_SUMMARY => render_for(
        self,
        catalog,
        locale,
        "summary",
        &[
          ("count", m.get_int(Self::KEY_COUNT).unwrap_or_default().to_string()),
          ("texts", format!("\"{}\"", texts())),
        ],
      ),
      Self::DRAWING_SURFACE => {
        render_for(self, catalog, locale, "drawing_surface", &[("texts", texts())])
      }
      Self::IMAGE_ONLY => render_for(self, catalog, locale, "image_only", &[("text", text())]),
      other => unsupported_reason(Self::ID, other),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::a11y::class_names;
  use crate::checks::{OcrResult, OcrWord};
  use crate::hierarchy::{ElementSnapshot as El, HierarchySnapshot, WindowSnapshot};
  use crate::messages::BuiltinCatalog;
  use crate::types::WindowKind;

  const SCREEN: Rect = Rect::new(0, 0, 1080, 1920);
  const BUTTON: Rect = Rect::new(100, 100, 400, 200);

  fn screen() -> El {
    El::new(1).bounds(SCREEN)
  }

  fn build(elements: Vec<El>) -> Hierarchy {
    HierarchySnapshot::default()
      .window(WindowSnapshot::new(1, SCREEN).active(true).elements(elements))
      .build()
      .expect("valid hierarchy")
  }

  fn submit_button() -> Hierarchy {
    build(vec![
      screen().child(2),
      El::new(2)
        .class_name(class_names::BUTTON, &[class_names::TEXT_VIEW, class_names::VIEW])
        .clickable(true)
        .text("Submit")
        .bounds(BUTTON),
    ])
  }

  fn run_with(h: &Hierarchy, paragraphs: Vec<OcrParagraph>) -> Vec<CheckResult> {
    let params = Parameters::new().with_ocr_result(OcrResult::new(paragraphs));
    UnexposedTextCheck.run(h, None, Some(&params))
  }

  fn ocr_texts(results: &[CheckResult]) -> Vec<&str> {
    results
      .iter()
      .filter_map(|r| r.metadata().get_str(UnexposedTextCheck::KEY_OCR_TEXT))
      .collect()
  }

  mod matching {
    use super::*;

    #[test]
    fn without_ocr_the_check_does_not_run() {
      let results = UnexposedTextCheck.run(&submit_button(), None, None);
      assert_eq!(results.len(), 1);
      assert_eq!(results[0].severity(), Severity::NotRun);
      assert_eq!(results[0].reason(), UnexposedTextCheck::NO_OCR_RESULTS);
      assert_eq!(results[0].element(), None);
    }

    #[test]
    fn exact_text_is_exposed() {
      let results = run_with(&submit_button(), vec![OcrParagraph::new("Submit", BUTTON)]);
      assert!(results.is_empty());
    }

    #[test]
    fn one_character_error_is_tolerated() {
      let results = run_with(&submit_button(), vec![OcrParagraph::new("Sybmit", BUTTON)]);
      assert!(results.is_empty(), "edit distance 1");
      let results = run_with(&submit_button(), vec![OcrParagraph::new("Submi", BUTTON)]);
      assert!(results.is_empty());
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
      let results = run_with(&submit_button(), vec![OcrParagraph::new("SUBMIT.", BUTTON)]);
      assert!(results.is_empty());
    }

    #[test]
    fn different_text_is_unexposed() {
      let results = run_with(&submit_button(), vec![OcrParagraph::new("Cancel", BUTTON)]);
      assert_eq!(results.len(), 1);
      let r = &results[0];
      assert_eq!(r.severity(), Severity::Warning);
      assert_eq!(r.reason(), UnexposedTextCheck::UNEXPOSED_TEXT);
      assert_eq!(r.element(), Some(ElementId(1)));
      assert_eq!(r.metadata().get_str("ocr_text"), Some("Cancel"));
      assert_eq!(r.metadata().get_rect("bounds"), Some(BUTTON));
    }

    #[test]
    fn best_overlap_wins() {
      // Two buttons; OCR box overlaps the second one more
      let h = build(vec![
        screen().children([2, 3]),
        El::new(2).clickable(true).text("Left").bounds(Rect::new(0, 0, 100, 50)),
        El::new(3).clickable(true).text("Right").bounds(Rect::new(100, 0, 200, 50)),
      ]);
      let results = run_with(&h, vec![OcrParagraph::new("Right", Rect::new(90, 0, 200, 50))]);
      assert!(results.is_empty());
      let results = run_with(&h, vec![OcrParagraph::new("Left", Rect::new(90, 0, 200, 50))]);
      assert_eq!(results.len(), 1);
      assert_eq!(results[0].element(), Some(ElementId(2)));
    }

    #[test]
    fn glyph_boxes_reconcile_partial_text() {
      let text = "Price 100 Tax 5";
      let glyphs: Vec<Rect> = (0..15).map(|i| Rect::from_size(i * 10, 0, 10, 20)).collect();
      let label = |with_glyphs: bool| {
        let e = El::new(2).text(text).bounds(Rect::new(0, 0, 150, 20));
        if with_glyphs {
          e.glyphs(glyphs.clone())
        } else {
          e
        }
      };
      let ocr = || vec![OcrParagraph::new("Tax 6", Rect::new(100, 0, 150, 20))];

      let h = build(vec![screen().child(2), label(true)]);
      assert!(run_with(&h, ocr()).is_empty(), "glyphs read \"Tax 5\"");

      let h = build(vec![screen().child(2), label(false)]);
      assert_eq!(ocr_texts(&run_with(&h, ocr())), vec!["Tax 6"]);
    }

    #[test]
    fn text_not_over_any_element_is_skipped() {
      let h = build(vec![El::new(1).bounds(Rect::new(0, 0, 10, 10))]);
      assert!(run_with(&h, vec![OcrParagraph::new("Floating", Rect::new(500, 500, 600, 550))]).is_empty());
    }
  }

  mod filtering {
    use super::*;

    #[test]
    fn low_confidence_words_are_dropped() {
      let results = run_with(
        &submit_button(),
        vec![OcrParagraph::new("Cancel", BUTTON).confidence(0.2)],
      );
      assert!(results.is_empty());

      let params = Parameters::new()
        .with_ocr_result(OcrResult::new(vec![OcrParagraph::new("Cancel", BUTTON).confidence(0.2)]))
        .with_ocr_confidence_threshold(0.1);
      assert_eq!(UnexposedTextCheck.run(&submit_button(), None, Some(&params)).len(), 1);
    }

    #[test]
    fn dropped_word_splits_its_neighbours() {
      let h = build(vec![
        screen().child(2),
        El::new(2).clickable(true).text("Submit order").bounds(BUTTON),
      ]);
      let paragraph = OcrParagraph::new("Submit xq#zz order", BUTTON)
        .word(OcrWord::new("Submit", Rect::new(100, 100, 200, 200)).confidence(0.9))
        .word(OcrWord::new("xq#zz", Rect::new(210, 100, 290, 200)).confidence(0.1))
        .word(OcrWord::new("order", Rect::new(300, 100, 400, 200)).confidence(0.9));
      let params = Parameters::new()
        .with_ocr_result(OcrResult::new(vec![paragraph]))
        .with_ocr_confidence_threshold(0.5);
      assert!(UnexposedTextCheck.run(&h, None, Some(&params)).is_empty());

      let other = build(vec![
        screen().child(2),
        El::new(2).clickable(true).text("Pay").bounds(BUTTON),
      ]);
      let results = UnexposedTextCheck.run(&other, None, Some(&params));
      assert_eq!(ocr_texts(&results), vec!["Submit", "order"]);
    }

    #[test]
    fn text_under_system_windows_is_dropped() {
      let h = HierarchySnapshot::default()
        .window(
          WindowSnapshot::new(1, SCREEN)
            .active(true)
            .elements([screen().child(2), El::new(2).text("Body").bounds(SCREEN)]),
        )
        .window(
          WindowSnapshot::new(10, Rect::new(0, 0, 1080, 80))
            .kind(WindowKind::System)
            .element(El::new(10).bounds(Rect::new(0, 0, 1080, 80))),
        )
        .build()
        .expect("valid hierarchy");
      let results = run_with(
        &h,
        vec![
          OcrParagraph::new("12:30", Rect::new(10, 10, 100, 60)),
          OcrParagraph::new("Footer", Rect::new(10, 1800, 200, 1850)),
        ],
      );
      assert_eq!(ocr_texts(&results), vec!["Footer"]);
    }

    #[test]
    fn text_outside_active_window_or_sub_root_is_dropped() {
      let h = build(vec![
        screen().children([2, 3]),
        El::new(2).text("A").bounds(Rect::new(0, 0, 500, 500)),
        El::new(3).text("B").bounds(Rect::new(0, 600, 500, 1100)),
      ]);
      let paragraphs = vec![
        OcrParagraph::new("Outside", Rect::new(2000, 2000, 2100, 2100)),
        OcrParagraph::new("Top", Rect::new(10, 10, 200, 60)),
        OcrParagraph::new("Bottom", Rect::new(10, 700, 200, 760)),
      ];
      let params = Parameters::new().with_ocr_result(OcrResult::new(paragraphs));
      let results = UnexposedTextCheck.run(&h, Some(ElementId(2)), Some(&params));
      assert_eq!(ocr_texts(&results), vec!["Bottom"]);
    }
  }

  mod phrases {
    use super::*;

    #[test]
    fn words_on_one_line_merge_into_a_phrase() {
      let h = build(vec![
        screen().child(2),
        El::new(2).content_description("Greeting").bounds(Rect::new(0, 0, 400, 50)),
      ]);
      let paragraph = OcrParagraph::from_words([
        ("Hello", Rect::new(0, 0, 150, 50)),
        ("world!", Rect::new(160, 5, 400, 50)),
      ]);
      assert_eq!(ocr_texts(&run_with(&h, vec![paragraph])), vec!["Hello world!"]);
    }

    #[test]
    fn words_on_different_lines_stay_separate() {
      let h = build(vec![
        screen().child(2),
        El::new(2).content_description("Greeting").bounds(Rect::new(0, 0, 400, 120)),
      ]);
      let paragraph = OcrParagraph::from_words([
        ("Hello", Rect::new(0, 0, 200, 50)),
        ("world", Rect::new(0, 60, 200, 110)),
      ]);
      assert_eq!(ocr_texts(&run_with(&h, vec![paragraph])), vec!["Hello", "world"]);
    }

    #[test]
    fn phrase_text_keeps_paragraph_spacing() {
      let h = build(vec![
        screen().child(2),
        El::new(2).content_description("Other").bounds(Rect::new(0, 0, 400, 50)),
      ]);
      let paragraph = OcrParagraph::new("Buy  now", Rect::new(0, 0, 400, 50))
        .word(OcrWord::new("Buy", Rect::new(0, 0, 150, 50)))
        .word(OcrWord::new("now", Rect::new(200, 0, 400, 50)));
      assert_eq!(ocr_texts(&run_with(&h, vec![paragraph])), vec!["Buy  now"]);
    }

    #[test]
    fn matched_words_split_phrases() {
      // "Submit" is exposed by the button; "Order" lands on the label
      let h = build(vec![
        screen().children([2, 3]),
        El::new(2).clickable(true).text("Submit").bounds(Rect::new(0, 0, 200, 50)),
        El::new(3).content_description("Icon").bounds(Rect::new(200, 0, 400, 50)),
      ]);
      let paragraph = OcrParagraph::from_words([
        ("Submit", Rect::new(0, 0, 200, 50)),
        ("Order", Rect::new(200, 0, 400, 50)),
      ]);
      let results = run_with(&h, vec![paragraph]);
      assert_eq!(ocr_texts(&results), vec!["Order"]);
      assert_eq!(results[0].element(), Some(ElementId(2)));
    }
  }

  mod reporting {
    use super::*;

    fn three_lines() -> Vec<OcrParagraph> {
      vec![
        OcrParagraph::new("One", Rect::new(0, 0, 300, 40)),
        OcrParagraph::new("Two", Rect::new(0, 50, 300, 90)),
        OcrParagraph::new("Three", Rect::new(0, 100, 300, 140)),
      ]
    }

    #[test]
    fn many_phrases_collapse_into_a_summary() {
      let h = build(vec![
        screen().child(2),
        El::new(2).content_description("Card").bounds(Rect::new(0, 0, 300, 150)),
      ]);
      let results = run_with(&h, three_lines());
      assert_eq!(results.len(), 1);
      let r = &results[0];
      assert_eq!(r.reason(), UnexposedTextCheck::UNEXPOSED_TEXT_SUMMARY);
      assert_eq!(r.metadata().get_int("count"), Some(3));
      assert_eq!(
        r.metadata().get_string_list("ocr_texts"),
        Some(&["One".to_owned(), "Two".to_owned(), "Three".to_owned()][..])
      );
    }

    #[test]
    fn two_phrases_are_reported_individually() {
      let h = build(vec![
        screen().child(2),
        El::new(2).content_description("Card").bounds(Rect::new(0, 0, 300, 150)),
      ]);
      let mut paragraphs = three_lines();
      paragraphs.truncate(2);
      let results = run_with(&h, paragraphs);
      assert_eq!(ocr_texts(&results), vec!["One", "Two"]);
    }

    #[test]
    fn drawing_surface_gets_one_warning() {
      let h = build(vec![
        screen().child(2),
        El::new(2)
          .class_name("com.example.GameView", &[class_names::SURFACE_VIEW, class_names::VIEW])
          .bounds(Rect::new(0, 0, 300, 150)),
      ]);
      let results = run_with(&h, three_lines());
      assert_eq!(results.len(), 1);
      assert_eq!(results[0].reason(), UnexposedTextCheck::DRAWING_SURFACE);
      assert_eq!(results[0].severity(), Severity::Warning);
      assert_eq!(results[0].metadata().get_int("count"), Some(3));
    }

    #[test]
    fn text_in_images_is_not_run() {
      let h = build(vec![
        screen().child(2),
        El::new(2)
          .class_name(class_names::IMAGE_VIEW, &[class_names::VIEW])
          .content_description("Banner")
          .bounds(Rect::new(0, 0, 300, 150)),
      ]);
      let results = run_with(&h, vec![OcrParagraph::new("SALE", Rect::new(0, 0, 300, 150))]);
      assert_eq!(results.len(), 1);
      assert_eq!(results[0].severity(), Severity::NotRun);
      assert_eq!(results[0].reason(), UnexposedTextCheck::IMAGE_ONLY);
    }

    #[test]
    fn results_are_grouped_by_element_in_first_phrase_order() {
      let h = build(vec![
        screen().children([2, 3]),
        El::new(2).content_description("A").bounds(Rect::new(0, 0, 300, 100)),
        El::new(3).content_description("B").bounds(Rect::new(0, 200, 300, 300)),
      ]);
      let results = run_with(
        &h,
        vec![
          OcrParagraph::new("second", Rect::new(0, 200, 300, 240)),
          OcrParagraph::new("first", Rect::new(0, 0, 300, 40)),
          OcrParagraph::new("again", Rect::new(0, 250, 300, 290)),
        ],
      );
      assert_eq!(ocr_texts(&results), vec!["second", "again", "first"]);
    }

    #[test]
    fn messages_render() {
      let check = UnexposedTextCheck;
      let result = CheckResult::new(check.id(), Severity::Warning, None, UnexposedTextCheck::UNEXPOSED_TEXT_SUMMARY)
        .with_metadata(
          Metadata::new()
            .with("count", 3_i64)
            .with("ocr_texts", vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]),
        );
      let message = check.message(&BuiltinCatalog, &Locale::default(), &result);
      assert!(message.starts_with("3 pieces"));
      assert!(message.contains("\"a\", \"b\", \"c\""));
    }
  }
}
