/*!
Text recognized in a screen capture.

Produced by an external OCR pass and handed to checks through
[`Parameters`](super::Parameters). Coordinates are screen pixels, like
element bounds.
*/

use crate::types::Rect;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// All text recognized in one capture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrResult {
  pub paragraphs: Vec<OcrParagraph>,
}

impl OcrResult {
  pub const fn new(paragraphs: Vec<OcrParagraph>) -> Self {
    Self { paragraphs }
  }

  /// Parse from JSON.
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  pub fn is_empty(&self) -> bool {
    self.paragraphs.is_empty()
  }
}

/// A block of recognized text, usually one visual line or label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrParagraph {
  pub text: String,
  pub bounds: Rect,
  /// Recognizer confidence in `0.0..=1.0`, when reported
  #[serde(default)]
  pub confidence: Option<f32>,
  /// Words in reading order. A paragraph without words is treated as one.
  #[serde(default)]
  pub words: Vec<OcrWord>,
}

impl OcrParagraph {
  pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
    Self {
      text: text.into(),
      bounds,
      confidence: None,
      words: Vec::new(),
    }
  }

  #[must_use]
  pub const fn confidence(mut self, confidence: f32) -> Self {
    self.confidence = Some(confidence);
    self
  }

  #[must_use]
  pub fn word(mut self, word: OcrWord) -> Self {
    self.words.push(word);
    self
  }

  /// Paragraph whose words are given as `(text, bounds)` pairs. The
  /// paragraph text is the words joined by spaces and its bounds their
  /// union.
  pub fn from_words<'a>(words: impl IntoIterator<Item = (&'a str, Rect)>) -> Self {
    let words: Vec<OcrWord> = words
      .into_iter()
      .map(|(text, bounds)| OcrWord::new(text, bounds))
      .collect();
    let text = words
      .iter()
      .map(|w| w.text.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    let bounds = words
      .iter()
      .fold(Rect::default(), |acc, w| acc.union(&w.bounds));
    Self {
      text,
      bounds,
      confidence: None,
      words,
    }
  }
}

/// One recognized word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrWord {
  pub text: String,
  pub bounds: Rect,
  #[serde(default)]
  pub confidence: Option<f32>,
}

impl OcrWord {
  pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
    Self {
      text: text.into(),
      bounds,
      confidence: None,
    }
  }

  #[must_use]
  pub const fn confidence(mut self, confidence: f32) -> Self {
    self.confidence = Some(confidence);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_words_joins_and_unions() {
    let p = OcrParagraph::from_words([
      ("Sign", Rect::new(10, 10, 40, 30)),
      ("in", Rect::new(45, 12, 60, 30)),
    ]);
    assert_eq!(p.text, "Sign in");
    assert_eq!(p.bounds, Rect::new(10, 10, 60, 30));
    assert_eq!(p.words.len(), 2);
  }

  #[test]
  fn parses_json_with_optional_fields() {
    let json = r#"{"paragraphs": [
      {"text": "Hello", "bounds": {"left": 0, "top": 0, "right": 50, "bottom": 20}},
      {"text": "World", "bounds": {"left": 0, "top": 30, "right": 50, "bottom": 50},
       "confidence": 0.9,
       "words": [{"text": "World", "bounds": {"left": 0, "top": 30, "right": 50, "bottom": 50}}]}
    ]}"#;
    let ocr = OcrResult::from_json(json).unwrap_or_default();
    assert_eq!(ocr.paragraphs.len(), 2);
    assert_eq!(ocr.paragraphs[0].confidence, None);
    assert!(ocr.paragraphs[0].words.is_empty());
    assert_eq!(ocr.paragraphs[1].confidence, Some(0.9));
  }
}
