/*!
Accessibility semantics derived from the raw element model.

- `action.rs` - accessibility actions exposed by elements
- `role.rs` - class-name ancestry to semantic role
- `focus.rs` - which elements a screen reader stops on
- `speakable.rs` - what it announces when it does
- `text.rs` - normalization and edit distance
*/

mod action;
mod focus;
mod role;
mod speakable;
pub mod text;

pub use action::{Action, ElementAction};
pub use focus::{
  has_any_important_descendant, has_focusable_ancestor, has_non_actionable_speaking_descendants,
  has_text, is_accessibility_focusable, is_actionable, is_speaking, is_top_level_scroll_item,
  should_focus,
};
pub use role::{class_names, Role};
pub use speakable::{speakable_text, speakable_text_with};
