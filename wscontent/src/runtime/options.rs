//! Configuration for workspace content initialization.

use crate::runtime::constants::defaults;
use crate::runtime::constants::dirs as const_dirs;
use crate::runtime::constants::envs as const_envs;
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wscontent_shared::errors::{ContentError, ContentResult};
use wscontent_shared::{IdMapping, validate_mappings};

/// Options for a [`WorkspaceContent`](crate::runtime::WorkspaceContent) runner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentOptions {
    /// Directory receiving the workspace content. Must be absolute.
    ///
    /// Default: `$WSCONTENT_WORKSPACE_ROOT`, else `~/workspace`
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to a daily rolling file in this directory instead of stderr.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Id rewrites handed to every initializer.
    #[serde(default)]
    pub id_mappings: Vec<IdMapping>,

    /// Record a ready marker in the workspace after a successful run.
    #[serde(default = "default_write_ready_marker")]
    pub write_ready_marker: bool,
}

fn default_workspace_root() -> PathBuf {
    std::env::var(const_envs::WSCONTENT_WORKSPACE_ROOT)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = home_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(const_dirs::WORKSPACE_DIR);
            path
        })
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_write_ready_marker() -> bool {
    true
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            log_level: default_log_level(),
            log_dir: None,
            id_mappings: Vec::new(),
            write_ready_marker: default_write_ready_marker(),
        }
    }
}

impl ContentOptions {
    pub fn with_workspace_root(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            ..Default::default()
        }
    }

    /// Read options from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ContentResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ContentError::Config(format!(
                "Failed to read options file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            ContentError::Config(format!(
                "Failed to parse options file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Check preconditions before any work is done.
    pub fn sanitize(&self) -> ContentResult<()> {
        if self.workspace_root.as_os_str().is_empty() || !self.workspace_root.is_absolute() {
            return Err(ContentError::Config(format!(
                "workspace_root must be an absolute path, got: {}",
                self.workspace_root.display()
            )));
        }

        validate_mappings(&self.id_mappings)
    }
}
