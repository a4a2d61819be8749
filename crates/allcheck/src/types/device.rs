/*! Device state captured alongside a hierarchy. */

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// BCP-47 style locale tag, e.g. `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Locale(String);

impl Locale {
  pub fn new(tag: impl Into<String>) -> Self {
    Self(tag.into().replace('_', "-"))
  }

  pub fn tag(&self) -> &str {
    &self.0
  }

  /// Primary language subtag, lowercased (e.g. "en" for "en-US").
  pub fn language(&self) -> String {
    self
      .0
      .split('-')
      .next()
      .unwrap_or_default()
      .to_ascii_lowercase()
  }
}

impl Default for Locale {
  fn default() -> Self {
    Self::new("en-US")
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Display size and density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayMetrics {
  pub width_pixels: u32,
  pub height_pixels: u32,
  /// Pixels per density-independent pixel (1.0 at 160dpi)
  pub density: f32,
  pub density_dpi: u32,
}

impl DisplayMetrics {
  /// Convert a pixel length to density-independent pixels.
  #[allow(clippy::cast_precision_loss)] // UI lengths are far below 2^24
  pub fn px_to_dp(&self, px: i64) -> f32 {
    if self.density <= 0.0 {
      return px as f32;
    }
    px as f32 / self.density
  }
}

impl Default for DisplayMetrics {
  fn default() -> Self {
    Self {
      width_pixels: 1080,
      height_pixels: 1920,
      density: 2.625,
      density_dpi: 420,
    }
  }
}

/// Physical form of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormFactor {
  Handset,
  Tablet,
  Wearable,
  Television,
  #[default]
  Unknown,
}

/// Device-level state at capture time. One per hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct DeviceState {
  pub locale: Locale,
  /// Platform API level
  pub sdk_version: u32,
  pub font_scale: f32,
  pub display: DisplayMetrics,
  pub form_factor: FormFactor,
}

impl Default for DeviceState {
  fn default() -> Self {
    Self {
      locale: Locale::default(),
      sdk_version: 0,
      font_scale: 1.0,
      display: DisplayMetrics::default(),
      form_factor: FormFactor::default(),
    }
  }
}
