/*!
Semantic UI roles.

Roles describe what an element *is*. They are derived from the element's
class name and its ancestor type names (nearest first), so a custom
`com.example.FancyButton` extending `android.widget.Button` is a
[`Role::Button`].
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Well-known platform type names.
pub mod class_names {
  pub const VIEW: &str = "android.view.View";
  pub const VIEW_GROUP: &str = "android.view.ViewGroup";
  pub const SURFACE_VIEW: &str = "android.view.SurfaceView";
  pub const TEXTURE_VIEW: &str = "android.view.TextureView";

  pub const TEXT_VIEW: &str = "android.widget.TextView";
  pub const EDIT_TEXT: &str = "android.widget.EditText";
  pub const BUTTON: &str = "android.widget.Button";
  pub const COMPOUND_BUTTON: &str = "android.widget.CompoundButton";
  pub const CHECK_BOX: &str = "android.widget.CheckBox";
  pub const SWITCH: &str = "android.widget.Switch";
  pub const RADIO_BUTTON: &str = "android.widget.RadioButton";
  pub const TOGGLE_BUTTON: &str = "android.widget.ToggleButton";
  pub const IMAGE_VIEW: &str = "android.widget.ImageView";
  pub const IMAGE_BUTTON: &str = "android.widget.ImageButton";
  pub const SEEK_BAR: &str = "android.widget.SeekBar";
  pub const PROGRESS_BAR: &str = "android.widget.ProgressBar";

  pub const ADAPTER_VIEW: &str = "android.widget.AdapterView";
  pub const ABS_LIST_VIEW: &str = "android.widget.AbsListView";
  pub const LIST_VIEW: &str = "android.widget.ListView";
  pub const GRID_VIEW: &str = "android.widget.GridView";
  pub const SPINNER: &str = "android.widget.Spinner";
  pub const SCROLL_VIEW: &str = "android.widget.ScrollView";
  pub const HORIZONTAL_SCROLL_VIEW: &str = "android.widget.HorizontalScrollView";
  pub const RECYCLER_VIEW: &str = "androidx.recyclerview.widget.RecyclerView";
  pub const WEB_VIEW: &str = "android.webkit.WebView";

  /// Samsung TouchWiz adapter view. Behaves like `AdapterView` but does not
  /// extend it.
  pub const TW_ADAPTER_VIEW: &str = "com.sec.android.touchwiz.widget.TwAdapterView";
}

/// Semantic UI role (cross-toolkit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
  // === Structural / Containers ===
  Group,
  ScrollArea,
  List,
  WebView,

  // === Interactive ===
  Button,
  ImageButton,
  TextField,
  Checkbox,
  Switch,
  RadioButton,
  Slider,
  Spinner,

  // === Static content ===
  StaticText,
  Image,
  ProgressBar,

  /// Raw drawing surface (`SurfaceView`, `TextureView`). Content is
  /// painted directly and never exposes text.
  DrawingSurface,

  // === Generic / Fallback ===
  /// Plain view with no more specific known type.
  GenericElement,

  /// No known type name in the element's ancestry.
  #[default]
  Unknown,
}

impl Role {
  /// Map a single platform type name to a role, if it is a known type.
  pub fn from_class_name(name: &str) -> Option<Self> {
    use class_names as cn;
    let role = match name {
      cn::EDIT_TEXT => Self::TextField,
      cn::CHECK_BOX | cn::COMPOUND_BUTTON => Self::Checkbox,
      cn::SWITCH | cn::TOGGLE_BUTTON => Self::Switch,
      cn::RADIO_BUTTON => Self::RadioButton,
      cn::IMAGE_BUTTON => Self::ImageButton,
      cn::IMAGE_VIEW => Self::Image,
      cn::BUTTON => Self::Button,
      cn::TEXT_VIEW => Self::StaticText,
      cn::SEEK_BAR => Self::Slider,
      cn::PROGRESS_BAR => Self::ProgressBar,
      cn::SPINNER => Self::Spinner,
      cn::LIST_VIEW
      | cn::GRID_VIEW
      | cn::ABS_LIST_VIEW
      | cn::ADAPTER_VIEW
      | cn::RECYCLER_VIEW
      | cn::TW_ADAPTER_VIEW => Self::List,
      cn::SCROLL_VIEW | cn::HORIZONTAL_SCROLL_VIEW => Self::ScrollArea,
      cn::WEB_VIEW => Self::WebView,
      cn::SURFACE_VIEW | cn::TEXTURE_VIEW => Self::DrawingSurface,
      cn::VIEW_GROUP => Self::Group,
      cn::VIEW => Self::GenericElement,
      _ => return None,
    };
    Some(role)
  }

  /// Resolve a role from type names ordered nearest first.
  /// The first known name wins.
  pub fn from_type_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
    names
      .into_iter()
      .find_map(Self::from_class_name)
      .unwrap_or_default()
  }

  /// Is the element primarily an image?
  pub const fn is_image(&self) -> bool {
    matches!(self, Self::Image | Self::ImageButton)
  }

  /// Can the element paint text that is invisible to the accessibility layer?
  pub const fn is_drawing_surface(&self) -> bool {
    matches!(self, Self::DrawingSurface)
  }
}
