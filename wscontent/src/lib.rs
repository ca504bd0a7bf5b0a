//! Workspace content initialization.
//!
//! Populates a workspace's file system from a declarative tree of content
//! sources (git checkouts, backups, snapshots, downloads) and reports which
//! kind of source produced the result.
//!
//! - [`initializer`]: the [`Initializer`] capability, sequential composition
//!   and construction of initializer trees from specifications
//! - [`locations`]: checkout locations of a specification, without running it
//! - [`runtime`]: the [`WorkspaceContent`] runner and its options

pub mod initializer;
pub mod locations;
pub mod runtime;
pub mod util;

pub use initializer::{
    BoxedInitializer, CompositeInitializer, EmptyInitializer, FnInitializer, InitContext,
    Initializer, LeafFactory, RunMetrics, UnsupportedLeaves, build_initializer, validate_spec,
};
pub use locations::checkout_locations;
pub use runtime::{ContentOptions, InitReport, ReadyMarker, WorkspaceContent};
pub use util::init_logging;
pub use wscontent_shared::{
    ContentError, ContentResult, IdMapping, InitSource, InitializerSpec, WorkspaceInitializer,
};
