//! Workspace content - shared types
//!
//! This crate contains the plain data exchanged between the scheduler that
//! describes a workspace's content, the orchestration core that runs it and
//! the leaf initializers that actually fetch files.

pub mod errors;
pub mod idmap;
pub mod source;
pub mod spec;

pub use errors::{ContentError, ContentResult};
pub use idmap::{IdMapping, map_id, validate_mappings};
pub use source::InitSource;
pub use spec::{
    CloneTargetMode, CompositeInitializerSpec, FileDownloadInitializer, FileInfo,
    FromBackupInitializer, GitAuthMethod, GitConfig, GitInitializer, InitializerSpec,
    PrebuildInitializer, SnapshotInitializer, WorkspaceInitializer,
};
