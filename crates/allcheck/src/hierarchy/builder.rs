/*!
Two-pass hierarchy construction.

1. Index every source element by its [`SourceId`] (duplicates fail).
2. Walk each window's tree in pre-order from its root, assigning dense
   [`ElementId`]s and resolving child references.
3. Reject elements nothing reached.
4. Resolve `labeled_by` references, which may point anywhere.

Invariants of the result: every element has exactly one parent except
window roots, there are no cycles, and every id resolves.
*/

use std::collections::HashMap;

use super::snapshot::{ElementSnapshot, HierarchySnapshot};
use super::Hierarchy;
use crate::types::{
  DeviceState, Element, ElementId, HierarchyError, HierarchyResult, Rect, SourceId, Window, WindowId,
  WindowKind,
};

/// Mutable staging area that turns a [`HierarchySnapshot`] into a
/// [`Hierarchy`].
#[derive(Debug)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct HierarchyBuilder {
  device: DeviceState,
  windows: Vec<WindowHeader>,
  /// Source elements in capture order. Taken out as they are converted.
  slots: Vec<Option<Slot>>,
  index: HashMap<SourceId, usize>,
  /// First structural error seen while staging, reported by `build`.
  error: Option<HierarchyError>,
}

#[derive(Debug)]
struct WindowHeader {
  kind: WindowKind,
  layer: Option<i32>,
  bounds: Rect,
  active: bool,
  root: SourceId,
}

#[derive(Debug)]
struct Slot {
  window: usize,
  snapshot: ElementSnapshot,
}

/// A pre-order visit: which slot, under which parent, in which window.
struct Visit {
  slot: usize,
  parent: Option<ElementId>,
  window: usize,
}

impl HierarchyBuilder {
  /// Stage a snapshot (pass 1: index by source id).
  pub fn new(snapshot: HierarchySnapshot) -> Self {
    let mut builder = Self {
      device: snapshot.device,
      windows: Vec::with_capacity(snapshot.windows.len()),
      slots: Vec::new(),
      index: HashMap::new(),
      error: None,
    };

    for (window_index, window) in snapshot.windows.into_iter().enumerate() {
      builder.windows.push(WindowHeader {
        kind: window.kind,
        layer: window.layer,
        bounds: window.bounds,
        active: window.active,
        root: window.root,
      });
      for element in window.elements {
        builder.stage(window_index, element);
      }
    }

    builder
  }

  fn stage(&mut self, window: usize, snapshot: ElementSnapshot) {
    let source_id = snapshot.id;
    if self.index.insert(source_id, self.slots.len()).is_some() {
      self.error.get_or_insert(HierarchyError::DuplicateId(source_id));
    }
    self.slots.push(Some(Slot { window, snapshot }));
  }

  /// Resolve all references and produce the immutable hierarchy.
  pub fn build(mut self) -> HierarchyResult<Hierarchy> {
    if let Some(err) = self.error.take() {
      return Err(err);
    }
    let active_window = self.active_window()?;

    // Pass 2: pre-order id assignment, window by window
    let mut assigned: HashMap<SourceId, ElementId> = HashMap::with_capacity(self.slots.len());
    let mut visits: Vec<Visit> = Vec::with_capacity(self.slots.len());
    for window_index in 0..self.windows.len() {
      self.assign_window(window_index, &mut assigned, &mut visits)?;
    }

    // Pass 3: everything must hang off some root
    if let Some(orphan) = self
      .slots
      .iter()
      .flatten()
      .map(|slot| slot.snapshot.id)
      .find(|id| !assigned.contains_key(id))
    {
      return Err(HierarchyError::Orphan(orphan));
    }

    // Pass 4: materialize elements in id order, resolving labels
    let mut elements = Vec::with_capacity(visits.len());
    for (position, visit) in visits.iter().enumerate() {
      let Some(Slot { snapshot, .. }) = self.slots.get_mut(visit.slot).and_then(Option::take) else {
        continue;
      };
      let id = ElementId(u32::try_from(position).map_err(|_| HierarchyError::TooManyElements)?);
      elements.push(Self::materialize(
        id,
        visit,
        snapshot,
        &assigned,
      )?);
    }

    let windows = self
      .windows
      .iter()
      .enumerate()
      .map(|(index, header)| {
        let window_id = WindowId(u32::try_from(index).map_err(|_| HierarchyError::TooManyElements)?);
        let root = assigned
          .get(&header.root)
          .copied()
          .ok_or(HierarchyError::DanglingRoot {
            window: index,
            root: header.root,
          })?;
        Ok(Window {
          id: window_id,
          kind: header.kind,
          layer: header.layer,
          bounds: header.bounds,
          active: header.active,
          root,
        })
      })
      .collect::<HierarchyResult<Vec<_>>>()?;

    log::debug!(
      "Built hierarchy: {} windows, {} elements, active window {active_window}",
      windows.len(),
      elements.len()
    );

    Ok(Hierarchy::from_parts(
      windows,
      elements,
      self.device,
      active_window,
    ))
  }

  fn active_window(&self) -> HierarchyResult<WindowId> {
    if self.windows.is_empty() {
      return Err(HierarchyError::Empty);
    }
    let mut active = self
      .windows
      .iter()
      .enumerate()
      .filter(|(_, w)| w.active)
      .map(|(i, _)| i);
    let first = active.next();
    let rest = active.count();
    match (first, rest) {
      (None, _) => Err(HierarchyError::NoActiveWindow),
      (Some(index), 0) => Ok(WindowId(
        u32::try_from(index).map_err(|_| HierarchyError::TooManyElements)?,
      )),
      (Some(_), rest) => Err(HierarchyError::MultipleActiveWindows(rest + 1)),
    }
  }

  fn assign_window(
    &self,
    window_index: usize,
    assigned: &mut HashMap<SourceId, ElementId>,
    visits: &mut Vec<Visit>,
  ) -> HierarchyResult<()> {
    let Some(header) = self.windows.get(window_index) else {
      return Ok(());
    };
    let root_slot = self
      .slot_in_window(header.root, window_index)
      .ok_or(HierarchyError::DanglingRoot {
        window: window_index,
        root: header.root,
      })?;

    // Iterative DFS; children pushed in reverse so they pop in order
    let mut stack = vec![(root_slot, None)];
    while let Some((slot_index, parent)) = stack.pop() {
      let Some(Some(slot)) = self.slots.get(slot_index) else {
        continue;
      };
      let source_id = slot.snapshot.id;
      if assigned.contains_key(&source_id) {
        return Err(HierarchyError::MultipleParents(source_id));
      }
      let id = ElementId(u32::try_from(visits.len()).map_err(|_| HierarchyError::TooManyElements)?);
      assigned.insert(source_id, id);
      visits.push(Visit {
        slot: slot_index,
        parent,
        window: window_index,
      });

      for &child in slot.snapshot.children.iter().rev() {
        let child_slot =
          self
            .slot_in_window(child, window_index)
            .ok_or(HierarchyError::DanglingChild {
              parent: source_id,
              child,
            })?;
        stack.push((child_slot, Some(id)));
      }
    }
    Ok(())
  }

  /// Slot index of `id`, if it was captured as part of `window`.
  fn slot_in_window(&self, id: SourceId, window: usize) -> Option<usize> {
    let &slot_index = self.index.get(&id)?;
    match self.slots.get(slot_index) {
      Some(Some(slot)) if slot.window == window => Some(slot_index),
      _ => None,
    }
  }

  fn materialize(
    id: ElementId,
    visit: &Visit,
    snapshot: ElementSnapshot,
    assigned: &HashMap<SourceId, ElementId>,
  ) -> HierarchyResult<Element> {
    let labeled_by = match snapshot.labeled_by {
      Some(label) => Some(assigned.get(&label).copied().ok_or(
        HierarchyError::DanglingLabel {
          label_for: snapshot.id,
          labeled_by: label,
        },
      )?),
      None => None,
    };
    // Every child was assigned during the walk that reached this element
    let children = snapshot
      .children
      .iter()
      .filter_map(|child| assigned.get(child).copied())
      .collect();
    let window_id = WindowId(u32::try_from(visit.window).map_err(|_| HierarchyError::TooManyElements)?);

    Ok(Element {
      id,
      window_id,
      parent_id: visit.parent,
      children,
      class_name: snapshot.class_name,
      accessibility_class_name: snapshot.accessibility_class_name,
      type_ancestry: snapshot.type_ancestry,
      resource_name: snapshot.resource_name,
      bounds: snapshot.bounds,
      text_character_locations: snapshot.text_character_locations,
      visible: snapshot.visible,
      important_for_accessibility: snapshot.important_for_accessibility,
      clickable: snapshot.clickable,
      long_clickable: snapshot.long_clickable,
      focusable: snapshot.focusable,
      checkable: snapshot.checkable,
      checked: snapshot.checked,
      scrollable: snapshot.scrollable,
      editable: snapshot.editable,
      enabled: snapshot.enabled,
      text: snapshot.text,
      content_description: snapshot.content_description,
      hint_text: snapshot.hint_text,
      labeled_by,
      actions: snapshot.actions,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hierarchy::{ElementSnapshot as El, WindowSnapshot};

  fn window(root: i64) -> WindowSnapshot {
    WindowSnapshot::new(root, Rect::new(0, 0, 1000, 2000)).active(true)
  }

  fn build(windows: Vec<WindowSnapshot>) -> HierarchyResult<Hierarchy> {
    HierarchySnapshot {
      device: DeviceState::default(),
      windows,
    }
    .build()
  }

  mod id_assignment {
    use super::*;

    #[test]
    fn ids_are_pre_order_across_windows() {
      // Children listed before their parents in the source
      let h = build(vec![
        WindowSnapshot::new(100, Rect::new(0, 0, 10, 10)).elements([
          El::new(100).children([101]),
          El::new(101),
        ]),
        window(1).elements([
          El::new(3).text("c"),
          El::new(2).text("b").child(4),
          El::new(4).text("b1"),
          El::new(1).children([2, 3]),
        ]),
      ])
      .expect("valid hierarchy");

      let texts: Vec<_> = h.elements().iter().map(|e| e.text.as_deref()).collect();
      assert_eq!(
        texts,
        vec![None, None, None, Some("b"), Some("b1"), Some("c")],
        "window 0 first, then pre-order of window 1"
      );
      assert_eq!(h.windows()[1].root, ElementId(2));
      assert_eq!(h.active_window().id, WindowId(1));
    }

    #[test]
    fn parent_child_links_are_bidirectional() {
      let h = build(vec![window(1).elements([
        El::new(1).children([2, 3]),
        El::new(2),
        El::new(3),
      ])])
      .expect("valid hierarchy");

      let root = h.element(ElementId(0)).expect("root");
      assert_eq!(root.children, vec![ElementId(1), ElementId(2)]);
      for child in h.children(root) {
        assert_eq!(child.parent_id, Some(root.id));
      }
      assert!(root.is_root());
    }

    #[test]
    fn forward_label_reference_resolves() {
      let h = build(vec![window(1).elements([
        El::new(1).children([2, 3]),
        El::new(2).labeled_by(3),
        El::new(3).text("Name"),
      ])])
      .expect("valid hierarchy");

      let field = h.element(ElementId(1)).expect("field");
      assert_eq!(field.labeled_by, Some(ElementId(2)));
    }
  }

  mod structural_errors {
    use super::*;

    #[test]
    fn empty_snapshot() {
      assert_eq!(build(vec![]), Err(HierarchyError::Empty));
    }

    #[test]
    fn duplicate_ids() {
      let result = build(vec![window(1).elements([El::new(1).child(2), El::new(2), El::new(2)])]);
      assert_eq!(result, Err(HierarchyError::DuplicateId(SourceId(2))));
    }

    #[test]
    fn dangling_child() {
      let result = build(vec![window(1).elements([El::new(1).child(9)])]);
      assert_eq!(
        result,
        Err(HierarchyError::DanglingChild {
          parent: SourceId(1),
          child: SourceId(9),
        })
      );
    }

    #[test]
    fn child_from_another_window_is_dangling() {
      let result = build(vec![
        window(1).elements([El::new(1).child(2)]),
        WindowSnapshot::new(2, Rect::default()).element(El::new(2)),
      ]);
      assert!(matches!(result, Err(HierarchyError::DanglingChild { .. })));
    }

    #[test]
    fn dangling_root() {
      let result = build(vec![window(7).elements([El::new(1)])]);
      assert_eq!(
        result,
        Err(HierarchyError::DanglingRoot {
          window: 0,
          root: SourceId(7),
        })
      );
    }

    #[test]
    fn dangling_label() {
      let result = build(vec![window(1).elements([El::new(1).labeled_by(5)])]);
      assert_eq!(
        result,
        Err(HierarchyError::DanglingLabel {
          label_for: SourceId(1),
          labeled_by: SourceId(5),
        })
      );
    }

    #[test]
    fn two_parents() {
      let result = build(vec![window(1).elements([
        El::new(1).children([2, 3]),
        El::new(2).child(4),
        El::new(3).child(4),
        El::new(4),
      ])]);
      assert_eq!(result, Err(HierarchyError::MultipleParents(SourceId(4))));
    }

    #[test]
    fn cycle_through_root() {
      let result = build(vec![window(1).elements([El::new(1).child(2), El::new(2).child(1)])]);
      assert_eq!(result, Err(HierarchyError::MultipleParents(SourceId(1))));
    }

    #[test]
    fn orphan() {
      let result = build(vec![window(1).elements([El::new(1), El::new(2)])]);
      assert_eq!(result, Err(HierarchyError::Orphan(SourceId(2))));
    }

    #[test]
    fn no_active_window() {
      let result = build(vec![WindowSnapshot::new(1, Rect::default()).element(El::new(1))]);
      assert_eq!(result, Err(HierarchyError::NoActiveWindow));
    }

    #[test]
    fn two_active_windows() {
      let result = build(vec![
        window(1).element(El::new(1)),
        window(2).element(El::new(2)),
      ]);
      assert_eq!(result, Err(HierarchyError::MultipleActiveWindows(2)));
    }
  }
}
