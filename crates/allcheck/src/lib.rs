/*!
Allcheck - accessibility audits over captured UI hierarchies

```
use allcheck::audit::AuditRunner;
use allcheck::checks::Parameters;
use allcheck::{ElementSnapshot, HierarchySnapshot, Rect, Severity, WindowSnapshot};

// Build an immutable hierarchy from a capture
let hierarchy = HierarchySnapshot::default()
  .window(
    WindowSnapshot::new(1, Rect::new(0, 0, 1080, 1920))
      .active(true)
      .element(ElementSnapshot::new(1).child(2))
      .element(
        ElementSnapshot::new(2)
          .clickable(true)
          .text("Send")
          .bounds(Rect::new(0, 0, 200, 200)),
      ),
  )
  .build()?;

// Run the latest preset, failing on errors
let runner = AuditRunner::builder().threshold(Severity::Error).build();
match runner.run(&hierarchy, Some(&Parameters::new())) {
  Ok(results) => println!("{} results", results.len()),
  Err(failure) => println!("{failure}"),
}
# Ok::<(), allcheck::HierarchyError>(())
```
*/

pub mod a11y;
pub mod audit;
pub mod checks;
pub mod config;
pub mod hierarchy;
pub mod messages;
pub mod suggestions;

mod types;
pub use types::*;

pub use crate::audit::{run_checks, AuditFailure, AuditRunner, AuditRunnerBuilder};
pub use crate::hierarchy::{
  ElementSnapshot, Hierarchy, HierarchyBuilder, HierarchySnapshot, WindowSnapshot,
};
