//! Construction of an initializer tree from a specification tree.
//!
//! Composite and empty nodes are handled here; every other leaf kind is
//! delegated to a [`LeafFactory`] supplied by the caller.

use super::{BoxedInitializer, CompositeInitializer, EmptyInitializer, Initializer};
use crate::locations::walk_spec;
use wscontent_shared::errors::{ContentError, ContentResult};
use wscontent_shared::{
    FileDownloadInitializer, FromBackupInitializer, GitInitializer, InitializerSpec,
    PrebuildInitializer, SnapshotInitializer, WorkspaceInitializer,
};

/// Creates executable initializers for leaf specification nodes.
///
/// Every method defaults to `ContentError::Unsupported`, so a factory only
/// implements the content sources it actually provides.
pub trait LeafFactory: Send + Sync {
    fn git(&self, _spec: &GitInitializer) -> ContentResult<BoxedInitializer> {
        Err(unsupported("git"))
    }

    fn snapshot(&self, _spec: &SnapshotInitializer) -> ContentResult<BoxedInitializer> {
        Err(unsupported("snapshot"))
    }

    fn prebuild(&self, _spec: &PrebuildInitializer) -> ContentResult<BoxedInitializer> {
        Err(unsupported("prebuild"))
    }

    fn download(&self, _spec: &FileDownloadInitializer) -> ContentResult<BoxedInitializer> {
        Err(unsupported("download"))
    }

    fn backup(&self, _spec: &FromBackupInitializer) -> ContentResult<BoxedInitializer> {
        Err(unsupported("backup"))
    }
}

/// Factory without any leaf kinds. Only empty and composite trees build.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLeaves;

impl LeafFactory for UnsupportedLeaves {}

fn unsupported(kind: &str) -> ContentError {
    ContentError::Unsupported(format!("no {} initializer available", kind))
}

/// Check that every node of the tree has a variant set.
pub fn validate_spec(spec: &WorkspaceInitializer) -> ContentResult<()> {
    walk_spec(spec, &mut |_: &InitializerSpec| Ok(()))
}

/// Wrap each node of `spec` into its initializer, preserving shape and order.
///
/// The whole tree is validated first, so a malformed node anywhere yields
/// `ContentError::MalformedSpec` before the factory is consulted.
pub fn build_initializer(
    spec: &WorkspaceInitializer,
    factory: &dyn LeafFactory,
) -> ContentResult<BoxedInitializer> {
    validate_spec(spec)?;
    build_node(spec, factory)
}

fn build_node(
    node: &WorkspaceInitializer,
    factory: &dyn LeafFactory,
) -> ContentResult<BoxedInitializer> {
    let spec = node
        .spec
        .as_ref()
        .ok_or_else(|| ContentError::MalformedSpec("initializer variant is not set".into()))?;

    let initializer: BoxedInitializer = match spec {
        InitializerSpec::Empty => Box::new(EmptyInitializer),
        InitializerSpec::Git(git) => factory.git(git)?,
        InitializerSpec::Snapshot(snapshot) => factory.snapshot(snapshot)?,
        InitializerSpec::Prebuild(prebuild) => factory.prebuild(prebuild)?,
        InitializerSpec::Download(download) => factory.download(download)?,
        InitializerSpec::Backup(backup) => factory.backup(backup)?,
        InitializerSpec::Composite(composite) => {
            let children = composite
                .initializer
                .iter()
                .map(|child| build_node(child, factory))
                .collect::<ContentResult<Vec<_>>>()?;
            Box::new(CompositeInitializer::new(children))
        }
    };

    tracing::trace!(kind = spec.kind(), initializer = %initializer.name(), "Built initializer");
    Ok(initializer)
}
