/*! Core value types: ids, geometry, the element model, results, errors. */

#![allow(missing_docs)]

mod device;
mod element;
mod error;
mod geometry;
mod ids;
mod result;
mod window;

pub use device::{DeviceState, DisplayMetrics, FormFactor, Locale};
pub use element::Element;
pub use error::{ConfigError, ConfigResult, HierarchyError, HierarchyResult};
pub use geometry::{Point, Rect};
pub use ids::{ElementId, SourceId, WindowId};
pub use result::{CheckResult, Metadata, MetadataValue, Severity};
pub use window::{Window, WindowKind};
