/*!
Immutable hierarchy arena.

All windows and elements of one snapshot live in flat vectors owned by the
[`Hierarchy`]. Relationships (parent, children, labeled-by, owning window)
are ids into those vectors, so the structure has no cycles of ownership and
is `Send + Sync` for free.

Ids are assigned in pre-order, which makes every subtree a contiguous id
range. `subtree_end` records where each range stops.

## Module Structure

- `mod.rs` - `Hierarchy` and its queries
- `snapshot.rs` - serde wire mirror with source ids
- `builder.rs` - two-pass `HierarchyBuilder`
*/

mod builder;
mod snapshot;

pub use builder::HierarchyBuilder;
pub use snapshot::{ElementSnapshot, HierarchySnapshot, WindowSnapshot};

use crate::types::{DeviceState, Element, ElementId, HierarchyResult, Window, WindowId};
use serde::Serialize;

/// One captured UI snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy {
  windows: Vec<Window>,
  elements: Vec<Element>,
  device: DeviceState,
  active_window: WindowId,
  #[serde(skip)]
  subtree_end: Vec<u32>,
}

impl Hierarchy {
  /// Build from a snapshot. Shorthand for [`HierarchySnapshot::build`].
  pub fn from_snapshot(snapshot: HierarchySnapshot) -> HierarchyResult<Self> {
    HierarchyBuilder::new(snapshot).build()
  }

  /// Assemble from validated parts. Elements must be in pre-order id order.
  pub(crate) fn from_parts(
    windows: Vec<Window>,
    elements: Vec<Element>,
    device: DeviceState,
    active_window: WindowId,
  ) -> Self {
    // A subtree ends where its last child's subtree ends
    let mut subtree_end = vec![0_u32; elements.len()];
    for element in elements.iter().rev() {
      let own_end = element.id.0 + 1;
      let end = element
        .children
        .last()
        .and_then(|last| subtree_end.get(last.index()).copied())
        .unwrap_or(own_end)
        .max(own_end);
      if let Some(slot) = subtree_end.get_mut(element.id.index()) {
        *slot = end;
      }
    }

    Self {
      windows,
      elements,
      device,
      active_window,
      subtree_end,
    }
  }

  // === Lookup ===

  /// O(1) lookup by id.
  pub fn element(&self, id: ElementId) -> Option<&Element> {
    self.elements.get(id.index())
  }

  /// All elements in pre-order (windows in capture order).
  pub fn elements(&self) -> &[Element] {
    &self.elements
  }

  /// All windows in capture (z) order.
  pub fn windows(&self) -> &[Window] {
    &self.windows
  }

  pub fn window(&self, id: WindowId) -> Option<&Window> {
    self.windows.get(id.index())
  }

  /// The window the user is interacting with.
  #[allow(clippy::indexing_slicing)] // The builder only produces a valid active window id
  pub fn active_window(&self) -> &Window {
    &self.windows[self.active_window.index()]
  }

  pub const fn device_state(&self) -> &DeviceState {
    &self.device
  }

  // === Relationships ===

  pub fn parent(&self, element: &Element) -> Option<&Element> {
    element.parent_id.and_then(|id| self.element(id))
  }

  pub fn children<'a>(&'a self, element: &'a Element) -> impl Iterator<Item = &'a Element> + 'a {
    element.children.iter().filter_map(|&id| self.element(id))
  }

  /// Ancestors from the parent up to the window root.
  pub fn ancestors<'a>(&'a self, element: &Element) -> impl Iterator<Item = &'a Element> + 'a {
    std::iter::successors(self.parent(element), move |e| self.parent(e))
  }

  /// The element and all its descendants, in pre-order.
  pub fn subtree(&self, element: &Element) -> &[Element] {
    let start = element.id.index();
    let end = self.subtree_end_of(element.id);
    self.elements.get(start..end).unwrap_or_default()
  }

  /// Descendants in pre-order, excluding the element itself.
  pub fn descendants(&self, element: &Element) -> &[Element] {
    self.subtree(element).get(1..).unwrap_or_default()
  }

  /// Is `id` the root of, or inside, the subtree rooted at `root`?
  pub fn is_in_subtree(&self, id: ElementId, root: ElementId) -> bool {
    id.index() >= root.index() && id.index() < self.subtree_end_of(root)
  }

  pub fn labeled_by(&self, element: &Element) -> Option<&Element> {
    element.labeled_by.and_then(|id| self.element(id))
  }

  pub fn window_of(&self, element: &Element) -> Option<&Window> {
    self.window(element.window_id)
  }

  /// Root element of a window.
  pub fn root_of(&self, window: &Window) -> Option<&Element> {
    self.element(window.root)
  }

  // === Evaluation scope ===

  /// Elements a check should evaluate: the subtree of `root` when given,
  /// otherwise the active window's whole tree.
  pub fn elements_to_evaluate(&self, root: Option<ElementId>) -> &[Element] {
    let root_id = root.unwrap_or(self.active_window().root);
    match self.element(root_id) {
      Some(root) => self.subtree(root),
      None => {
        log::warn!("Evaluation root {root_id} is not in this hierarchy");
        &[]
      }
    }
  }

  /// All elements of the active window, regardless of any sub-root.
  pub fn active_window_elements(&self) -> &[Element] {
    self.elements_to_evaluate(None)
  }

  fn subtree_end_of(&self, id: ElementId) -> usize {
    self
      .subtree_end
      .get(id.index())
      .map_or(id.index(), |&end| end as usize)
  }
}
