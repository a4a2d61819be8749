/*! Optional per-run inputs for checks. */

use super::OcrResult;
use std::sync::Arc;

/// Touch targets smaller than this in either dimension fail.
pub const DEFAULT_TOUCH_TARGET_SIZE_DP: u32 = 48;

/// OCR words below this confidence are ignored.
pub const DEFAULT_OCR_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// A captured screen image, ARGB pixels in row-major order.
///
/// Shared between parameter clones. Checks read it; nothing writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
  width: u32,
  height: u32,
  pixels: Vec<u32>,
}

impl Screenshot {
  /// `None` when `pixels` does not hold exactly `width * height` values.
  pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
    let expected = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
    (pixels.len() == expected).then_some(Self {
      width,
      height,
      pixels,
    })
  }

  pub const fn width(&self) -> u32 {
    self.width
  }

  pub const fn height(&self) -> u32 {
    self.height
  }

  /// ARGB value at `(x, y)`, if inside the image.
  pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let index = usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()?;
    self.pixels.get(index).copied()
  }
}

/// Bag of optional inputs. Cloned once per run by the runner so checks
/// never see each other's changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
  screenshot: Option<Arc<Screenshot>>,
  ocr_result: Option<OcrResult>,
  save_images: bool,
  custom_touch_target_size_dp: Option<u32>,
  ocr_confidence_threshold: Option<f32>,
}

impl Parameters {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_screenshot(mut self, screenshot: Screenshot) -> Self {
    self.screenshot = Some(Arc::new(screenshot));
    self
  }

  #[must_use]
  pub fn with_ocr_result(mut self, ocr: OcrResult) -> Self {
    self.ocr_result = Some(ocr);
    self
  }

  /// Ask checks that produce images (crops, overlays) to keep them.
  #[must_use]
  pub const fn with_save_images(mut self, save: bool) -> Self {
    self.save_images = save;
    self
  }

  #[must_use]
  pub const fn with_custom_touch_target_size_dp(mut self, size: u32) -> Self {
    self.custom_touch_target_size_dp = Some(size);
    self
  }

  #[must_use]
  pub const fn with_ocr_confidence_threshold(mut self, threshold: f32) -> Self {
    self.ocr_confidence_threshold = Some(threshold);
    self
  }

  pub fn screenshot(&self) -> Option<&Screenshot> {
    self.screenshot.as_deref()
  }

  pub const fn ocr_result(&self) -> Option<&OcrResult> {
    self.ocr_result.as_ref()
  }

  pub const fn save_images(&self) -> bool {
    self.save_images
  }

  pub const fn custom_touch_target_size_dp(&self) -> Option<u32> {
    self.custom_touch_target_size_dp
  }

  pub const fn ocr_confidence_threshold(&self) -> Option<f32> {
    self.ocr_confidence_threshold
  }

  /// Effective minimum touch target size.
  pub fn touch_target_size_dp(params: Option<&Self>) -> u32 {
    params
      .and_then(Self::custom_touch_target_size_dp)
      .unwrap_or(DEFAULT_TOUCH_TARGET_SIZE_DP)
  }

  /// Effective OCR confidence threshold.
  pub fn confidence_threshold(params: Option<&Self>) -> f32 {
    params
      .and_then(Self::ocr_confidence_threshold)
      .unwrap_or(DEFAULT_OCR_CONFIDENCE_THRESHOLD)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn screenshot_pixel_bounds() {
    let shot = Screenshot::new(2, 2, vec![1, 2, 3, 4]).expect("valid size");
    assert_eq!(shot.pixel(1, 0), Some(2));
    assert_eq!(shot.pixel(0, 1), Some(3));
    assert_eq!(shot.pixel(2, 0), None);
    assert!(Screenshot::new(2, 2, vec![1, 2, 3]).is_none());
  }

  #[test]
  fn clones_share_the_screenshot() {
    let params = Parameters::new().with_screenshot(Screenshot::new(1, 1, vec![0]).expect("valid"));
    let copy = params.clone();
    let a = params.screenshot.as_ref().expect("set");
    let b = copy.screenshot.as_ref().expect("set");
    assert!(Arc::ptr_eq(a, b));
  }

  #[test]
  fn effective_values_fall_back_to_defaults() {
    assert_eq!(Parameters::touch_target_size_dp(None), 48);
    assert_eq!(Parameters::confidence_threshold(None), 0.5);
    let params = Parameters::new()
      .with_custom_touch_target_size_dp(32)
      .with_ocr_confidence_threshold(0.8);
    assert_eq!(Parameters::touch_target_size_dp(Some(&params)), 32);
    assert_eq!(Parameters::confidence_threshold(Some(&params)), 0.8);
  }
}
