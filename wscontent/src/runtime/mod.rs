//! Runner and configuration for initializing a workspace root.

pub mod constants;
mod content;
mod options;

pub use content::{InitReport, ReadyMarker, WorkspaceContent};
pub use options::ContentOptions;
