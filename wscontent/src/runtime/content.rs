//! Workspace content runner.
//!
//! Drives one initialization request end to end: resolve where content will
//! land, build the initializer tree, run it, and record completion.

use crate::initializer::{InitContext, Initializer, LeafFactory, build_initializer};
use crate::locations::checkout_locations;
use crate::runtime::constants::{dirs, filenames};
use crate::runtime::options::ContentOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use wscontent_shared::errors::{ContentError, ContentResult};
use wscontent_shared::{InitSource, WorkspaceInitializer};

/// Outcome of a successful initialization.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub source: InitSource,
    /// Checkout locations, resolved under the workspace root.
    pub locations: Vec<PathBuf>,
    pub duration_ms: u128,
}

/// Content of the ready marker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyMarker {
    pub source: InitSource,
    pub completed_at: DateTime<Utc>,
}

/// Populates one workspace root from initializer specifications.
///
/// **Prepare Before Execute**: locations are resolved and the whole initializer
/// tree is built before anything touches the disk, so a malformed or
/// unsupported spec leaves the workspace untouched.
///
/// **No partial success**: a failed run writes no ready marker and returns
/// the failing initializer's error as is. The caller discards the workspace
/// and retries the whole tree.
pub struct WorkspaceContent {
    options: ContentOptions,
    factory: Arc<dyn LeafFactory>,
}

impl WorkspaceContent {
    pub fn new(options: ContentOptions, factory: Arc<dyn LeafFactory>) -> ContentResult<Self> {
        options.sanitize()?;
        Ok(Self { options, factory })
    }

    pub fn options(&self) -> &ContentOptions {
        &self.options
    }

    pub fn ready_marker_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(dirs::STATE_DIR).join(filenames::READY)
    }

    /// Checkout locations of `spec`, resolved under the workspace root.
    ///
    /// Absolute locations are taken relative to the root. `..` components are
    /// folded lexically; a location that climbs above the root is rejected.
    pub fn checkout_locations(&self, spec: &WorkspaceInitializer) -> ContentResult<Vec<PathBuf>> {
        checkout_locations(spec)?
            .iter()
            .map(|location| resolve_under_root(&self.options.workspace_root, location))
            .collect()
    }

    pub async fn initialize(
        &self,
        ctx: &InitContext,
        spec: &WorkspaceInitializer,
    ) -> ContentResult<InitReport> {
        let start = Instant::now();
        let root = &self.options.workspace_root;

        if let Some(marker) = Self::read_ready_marker(root)? {
            return Err(ContentError::AlreadyExists(format!(
                "workspace {} was already initialized {} at {}",
                root.display(),
                marker.source,
                marker.completed_at.to_rfc3339()
            )));
        }

        let locations = self.checkout_locations(spec)?;
        tracing::info!(
            workspace = %root.display(),
            kind = spec.kind(),
            locations = ?locations,
            "Initializing workspace content"
        );

        let initializer = build_initializer(spec, self.factory.as_ref())?;

        std::fs::create_dir_all(root).map_err(|e| {
            ContentError::Storage(format!(
                "Failed to create workspace root {}: {}",
                root.display(),
                e
            ))
        })?;

        let source = initializer
            .run(ctx, &self.options.id_mappings)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    workspace = %root.display(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Workspace initialization failed"
                )
            })?;

        // A run abandoned mid-way must never be recorded as complete.
        ctx.check_cancelled()?;

        if self.options.write_ready_marker {
            write_ready_marker(root, source)?;
        }

        let duration_ms = start.elapsed().as_millis();
        tracing::info!(
            workspace = %root.display(),
            source = %source,
            duration_ms,
            "Workspace content initialized"
        );

        Ok(InitReport {
            source,
            locations,
            duration_ms,
        })
    }

    /// Read the ready marker of a workspace, `None` when it has none.
    pub fn read_ready_marker(workspace_root: &Path) -> ContentResult<Option<ReadyMarker>> {
        let path = Self::ready_marker_path(workspace_root);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ContentError::Storage(format!(
                    "Failed to read ready marker {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let marker = serde_json::from_str(&raw).map_err(|e| {
            ContentError::InvalidState(format!(
                "Corrupt ready marker {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Some(marker))
    }
}

fn resolve_under_root(root: &Path, location: &Path) -> ContentResult<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in location.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                if resolved.as_path() == root || !resolved.pop() {
                    return Err(ContentError::InvalidArgument(format!(
                        "checkout location escapes the workspace: {}",
                        location.display()
                    )));
                }
            }
        }
    }
    Ok(resolved)
}

/// Write the marker through a temporary file so readers never see half of it.
fn write_ready_marker(root: &Path, source: InitSource) -> ContentResult<()> {
    let state_dir = root.join(dirs::STATE_DIR);
    std::fs::create_dir_all(&state_dir).map_err(|e| {
        ContentError::Storage(format!(
            "Failed to create state directory {}: {}",
            state_dir.display(),
            e
        ))
    })?;

    let marker = ReadyMarker {
        source,
        completed_at: Utc::now(),
    };
    let json = serde_json::to_string(&marker)
        .map_err(|e| ContentError::Internal(format!("Failed to encode ready marker: {}", e)))?;

    let path = state_dir.join(filenames::READY);
    let tmp_path = state_dir.join(format!("{}.tmp", filenames::READY));
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, &path).map_err(|e| {
        ContentError::Storage(format!(
            "Failed to install ready marker {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), source = %source, "Wrote ready marker");
    Ok(())
}
