/*! Branded ID types for type-safe entity references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Window identifier. Index of the window in capture order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Display, From, Into,
)]
#[ts(export)]
pub struct WindowId(pub u32);

/// Element identifier.
///
/// Assigned by the hierarchy builder in pre-order (windows in capture order),
/// starting at 0. Ids are dense, so an id doubles as an arena index and id
/// order is traversal order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Display, From, Into,
)]
#[ts(export)]
pub struct ElementId(pub u32);

impl ElementId {
  pub(crate) const fn index(self) -> usize {
    self.0 as usize
  }
}

impl WindowId {
  pub(crate) const fn index(self) -> usize {
    self.0 as usize
  }
}

/// Identifier an element carried in the source snapshot, before the builder
/// re-numbers it. Only meaningful inside one snapshot.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display, From, Into,
)]
#[ts(export)]
pub struct SourceId(pub i64);
