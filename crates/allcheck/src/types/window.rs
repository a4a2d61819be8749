/*! Window type representing one captured window. */

use super::{ElementId, Rect, WindowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What kind of surface a window is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WindowKind {
  /// Regular application window.
  Application,
  /// System UI (status bar, navigation bar, notifications).
  System,
  /// On-screen keyboard or other input method.
  InputMethod,
  #[default]
  Unknown,
}

impl WindowKind {
  /// Windows whose content is drawn over the app but not owned by it.
  pub const fn is_system_overlay(&self) -> bool {
    matches!(self, Self::System | Self::InputMethod)
  }
}

/// A captured window. Owns one element tree rooted at `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Window {
  pub id: WindowId,
  pub kind: WindowKind,
  /// Z-layer as reported by the platform. Higher draws on top.
  pub layer: Option<i32>,
  pub bounds: Rect,
  /// Whether this is the window the user is interacting with
  pub active: bool,
  pub root: ElementId,
}
