//! Checkout locations of a specification tree.
//!
//! Resolution only reads the tree: nothing is executed, no file system or
//! network access happens, and the same tree always yields the same list.
//! Callers use it to prepare mount points or IDE configuration before (or
//! without) running the initializers.

use std::path::PathBuf;
use wscontent_shared::errors::{ContentError, ContentResult};
use wscontent_shared::{InitializerSpec, WorkspaceInitializer};

/// Locations the tree writes content to, in execution order.
///
/// Composites contribute the concatenation of their children's locations,
/// so the result is the depth-first, left-to-right flattening of all leaves.
/// Leaves without a location (empty, snapshot) contribute nothing.
pub fn checkout_locations(spec: &WorkspaceInitializer) -> ContentResult<Vec<PathBuf>> {
    let mut locations = Vec::new();
    walk_spec(spec, &mut |leaf| {
        locations.extend(leaf_locations(leaf));
        Ok(())
    })?;
    Ok(locations)
}

fn leaf_locations(leaf: &InitializerSpec) -> Vec<PathBuf> {
    match leaf {
        InitializerSpec::Empty | InitializerSpec::Snapshot(_) => Vec::new(),
        InitializerSpec::Git(git) => vec![PathBuf::from(&git.checkout_location)],
        InitializerSpec::Prebuild(prebuild) => prebuild
            .git
            .iter()
            .map(|git| PathBuf::from(&git.checkout_location))
            .collect(),
        InitializerSpec::Download(download) => vec![PathBuf::from(&download.target_location)],
        InitializerSpec::Backup(backup) => vec![PathBuf::from(&backup.checkout_location)],
        // walk_spec descends into composites and never hands them out
        InitializerSpec::Composite(_) => Vec::new(),
    }
}

/// Visit every non-composite node depth-first, left to right.
///
/// Fails with `ContentError::MalformedSpec` on the first node without a
/// variant.
pub(crate) fn walk_spec<F>(node: &WorkspaceInitializer, visit: &mut F) -> ContentResult<()>
where
    F: FnMut(&InitializerSpec) -> ContentResult<()>,
{
    let spec = node
        .spec
        .as_ref()
        .ok_or_else(|| ContentError::MalformedSpec("initializer variant is not set".into()))?;

    match spec {
        InitializerSpec::Composite(composite) => {
            for child in &composite.initializer {
                walk_spec(child, visit)?;
            }
            Ok(())
        }
        leaf => visit(leaf),
    }
}
