/*! Error types for hierarchy construction and configuration. */

use super::SourceId;

/// Structural problems found while building a [`Hierarchy`](crate::Hierarchy).
///
/// Construction fails on the first problem found; no partial hierarchy is
/// ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
  #[error("Snapshot contains no windows")]
  Empty,

  #[error("Duplicate element id {0}")]
  DuplicateId(SourceId),

  #[error("Window {window} has root {root}, which is not one of its elements")]
  DanglingRoot { window: usize, root: SourceId },

  #[error("Element {parent} lists child {child}, which does not exist")]
  DanglingChild { parent: SourceId, child: SourceId },

  #[error("Element {label_for} is labeled by {labeled_by}, which does not exist")]
  DanglingLabel {
    label_for: SourceId,
    labeled_by: SourceId,
  },

  #[error("Element {0} is reachable through more than one parent (or a cycle)")]
  MultipleParents(SourceId),

  #[error("Element {0} is not reachable from its window root")]
  Orphan(SourceId),

  #[error("No active window")]
  NoActiveWindow,

  #[error("More than one active window ({0})")]
  MultipleActiveWindows(usize),

  #[error("Snapshot has more elements than ids can address")]
  TooManyElements,
}

/// Result type for hierarchy construction.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Problems loading a configuration or snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Unknown preset: {0}")]
  UnknownPreset(String),

  #[error("Unknown check: {0}")]
  UnknownCheck(String),

  #[error("Invalid failure threshold: {0}")]
  InvalidThreshold(String),

  #[error("Malformed JSON: {0}")]
  Json(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
