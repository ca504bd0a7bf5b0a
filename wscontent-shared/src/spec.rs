//! Declarative initializer specification tree.
//!
//! The scheduler describes a workspace's content as a tree of these nodes.
//! The tree is a read-only value: the core only walks it, either to compute
//! checkout locations or to wrap each node into an executable initializer.
//!
//! JSON form:
//!
//! ```json
//! {
//!   "spec": {
//!     "kind": "composite",
//!     "initializer": [
//!       { "spec": { "kind": "git", "remote_uri": "https://example.com/a.git", "checkout_location": "a" } },
//!       { "spec": { "kind": "backup", "checkout_location": "b" } }
//!     ]
//!   }
//! }
//! ```

use crate::errors::{ContentError, ContentResult};
use serde::{Deserialize, Serialize};

/// A node of the specification tree.
///
/// `spec` is `None` when the producer never set a variant; every consumer
/// treats that as a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInitializer {
    #[serde(default)]
    pub spec: Option<InitializerSpec>,
}

impl WorkspaceInitializer {
    pub fn new(spec: InitializerSpec) -> Self {
        Self { spec: Some(spec) }
    }

    pub fn empty() -> Self {
        Self::new(InitializerSpec::Empty)
    }

    pub fn git(git: GitInitializer) -> Self {
        Self::new(InitializerSpec::Git(git))
    }

    pub fn backup(backup: FromBackupInitializer) -> Self {
        Self::new(InitializerSpec::Backup(backup))
    }

    pub fn composite(children: Vec<WorkspaceInitializer>) -> Self {
        Self::new(InitializerSpec::Composite(CompositeInitializerSpec {
            initializer: children,
        }))
    }

    /// Parse a tree from its JSON form.
    ///
    /// Any decoding failure, including an unrecognized `kind` at any depth,
    /// is a `ContentError::MalformedSpec`.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ContentError::MalformedSpec(format!("invalid initializer spec: {}", e)))
    }

    /// Human-readable variant name, `"unset"` for a malformed node.
    pub fn kind(&self) -> &'static str {
        self.spec.as_ref().map(InitializerSpec::kind).unwrap_or("unset")
    }
}

/// The closed set of content sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitializerSpec {
    /// Leaves the workspace empty.
    Empty,
    Git(GitInitializer),
    /// Restores a whole-workspace snapshot.
    Snapshot(SnapshotInitializer),
    Prebuild(PrebuildInitializer),
    Download(FileDownloadInitializer),
    Backup(FromBackupInitializer),
    Composite(CompositeInitializerSpec),
}

impl InitializerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            InitializerSpec::Empty => "empty",
            InitializerSpec::Git(_) => "git",
            InitializerSpec::Snapshot(_) => "snapshot",
            InitializerSpec::Prebuild(_) => "prebuild",
            InitializerSpec::Download(_) => "download",
            InitializerSpec::Backup(_) => "backup",
            InitializerSpec::Composite(_) => "composite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInitializer {
    pub remote_uri: String,
    /// Where the repository is cloned to, relative to the workspace root.
    pub checkout_location: String,
    /// Branch, commit or ref, interpreted according to `target_mode`.
    #[serde(default)]
    pub clone_target: String,
    #[serde(default)]
    pub target_mode: CloneTargetMode,
    #[serde(default)]
    pub config: GitConfig,
}

impl GitInitializer {
    pub fn new(remote_uri: impl Into<String>, checkout_location: impl Into<String>) -> Self {
        Self {
            remote_uri: remote_uri.into(),
            checkout_location: checkout_location.into(),
            clone_target: String::new(),
            target_mode: CloneTargetMode::default(),
            config: GitConfig::default(),
        }
    }

    pub fn with_target(mut self, clone_target: impl Into<String>, mode: CloneTargetMode) -> Self {
        self.clone_target = clone_target.into();
        self.target_mode = mode;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneTargetMode {
    #[default]
    RemoteHead,
    RemoteCommit,
    RemoteBranch,
    LocalBranch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub authentication: GitAuthMethod,
    #[serde(default)]
    pub auth_user: Option<String>,
    #[serde(default)]
    pub auth_password: Option<String>,
    #[serde(default)]
    pub custom_config: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitAuthMethod {
    #[default]
    NoAuth,
    BasicAuth,
    BasicAuthOtp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInitializer {
    pub snapshot: String,
    #[serde(default)]
    pub from_volume_snapshot: bool,
}

/// Snapshot restore followed by bringing the git checkouts up to date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrebuildInitializer {
    #[serde(default)]
    pub prebuild: Option<SnapshotInitializer>,
    #[serde(default)]
    pub git: Vec<GitInitializer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDownloadInitializer {
    #[serde(default)]
    pub files: Vec<FileInfo>,
    pub target_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub url: String,
    /// Path relative to the download's target location.
    pub file_path: String,
    #[serde(default)]
    pub digest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromBackupInitializer {
    pub checkout_location: String,
    #[serde(default)]
    pub from_volume_snapshot: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeInitializerSpec {
    #[serde(default)]
    pub initializer: Vec<WorkspaceInitializer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_tree() {
        let json = r#"{
            "spec": {
                "kind": "composite",
                "initializer": [
                    { "spec": { "kind": "git", "remote_uri": "https://example.com/a.git", "checkout_location": "/foo" } },
                    { "spec": { "kind": "empty" } },
                    { "spec": { "kind": "composite", "initializer": [
                        { "spec": { "kind": "backup", "checkout_location": "/bar" } }
                    ] } }
                ]
            }
        }"#;

        let tree = WorkspaceInitializer::from_json(json).unwrap();
        let Some(InitializerSpec::Composite(composite)) = &tree.spec else {
            panic!("expected composite, got {}", tree.kind());
        };
        assert_eq!(composite.initializer.len(), 3);
        assert_eq!(composite.initializer[0].kind(), "git");
        assert_eq!(composite.initializer[1].kind(), "empty");
        assert_eq!(composite.initializer[2].kind(), "composite");
    }

    #[test]
    fn test_git_defaults() {
        let json = r#"{ "spec": { "kind": "git", "remote_uri": "r", "checkout_location": "c" } }"#;
        let tree = WorkspaceInitializer::from_json(json).unwrap();
        assert_eq!(tree, WorkspaceInitializer::git(GitInitializer::new("r", "c")));
    }

    #[test]
    fn test_missing_spec_is_unset() {
        let tree = WorkspaceInitializer::from_json("{}").unwrap();
        assert!(tree.spec.is_none());
        assert_eq!(tree.kind(), "unset");
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let err = WorkspaceInitializer::from_json(r#"{ "spec": { "kind": "ftp" } }"#).unwrap_err();
        assert!(matches!(err, ContentError::MalformedSpec(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_nested_unknown_kind_is_malformed() {
        let json = r#"{ "spec": { "kind": "composite", "initializer": [
            { "spec": { "kind": "empty" } },
            { "spec": { "kind": "composite", "initializer": [ { "spec": { "kind": "ftp" } } ] } }
        ] } }"#;

        let err = WorkspaceInitializer::from_json(json).unwrap_err();
        assert!(matches!(err, ContentError::MalformedSpec(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = WorkspaceInitializer::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ContentError::MalformedSpec(_)));
    }
}
