#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wscontent::{
    BoxedInitializer, ContentError, ContentResult, IdMapping, InitContext, InitSource,
    Initializer, LeafFactory,
};
use wscontent_shared::{FromBackupInitializer, GitInitializer, map_id};

/// Uid of files as they appear in fetched content.
pub const CONTENT_UID: u32 = 1000;

/// Counts its invocations and always succeeds.
pub struct RecordingInitializer {
    calls: AtomicUsize,
    source: InitSource,
}

impl RecordingInitializer {
    pub fn new() -> Arc<Self> {
        Self::with_source(InitSource::FromOther)
    }

    pub fn with_source(source: InitSource) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            source,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Initializer for RecordingInitializer {
    async fn run(&self, _ctx: &InitContext, _mappings: &[IdMapping]) -> ContentResult<InitSource> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.source)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Counts its invocations and always fails.
pub struct FailingInitializer {
    calls: AtomicUsize,
}

impl FailingInitializer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn error() -> ContentError {
        ContentError::Execution("error happened here".into())
    }
}

#[async_trait]
impl Initializer for FailingInitializer {
    async fn run(&self, _ctx: &InitContext, _mappings: &[IdMapping]) -> ContentResult<InitSource> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Self::error())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn boxed<T: Initializer + 'static>(init: &Arc<T>) -> BoxedInitializer {
    Box::new(Arc::clone(init))
}

/// Leaf factory whose initializers write marker files into the workspace.
///
/// Each leaf writes `<location>/OWNER` holding the host uid that
/// `CONTENT_UID` maps to. Git remotes named `fail` fail without writing,
/// remotes named `hang` wait for cancellation and remotes named `cancel`
/// write their content, then cancel the request and succeed.
pub struct FileWritingFactory {
    root: PathBuf,
    pub runs: Arc<Mutex<Vec<String>>>,
}

impl FileWritingFactory {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
    }
}

impl LeafFactory for FileWritingFactory {
    fn git(&self, spec: &GitInitializer) -> ContentResult<BoxedInitializer> {
        Ok(Box::new(WritingLeaf {
            label: spec.remote_uri.clone(),
            target: self.root.join(spec.checkout_location.trim_start_matches('/')),
            source: InitSource::FromVersionControl,
            runs: Arc::clone(&self.runs),
        }))
    }

    fn backup(&self, spec: &FromBackupInitializer) -> ContentResult<BoxedInitializer> {
        Ok(Box::new(WritingLeaf {
            label: "backup".into(),
            target: self.root.join(spec.checkout_location.trim_start_matches('/')),
            source: InitSource::FromBackup,
            runs: Arc::clone(&self.runs),
        }))
    }
}

struct WritingLeaf {
    label: String,
    target: PathBuf,
    source: InitSource,
    runs: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Initializer for WritingLeaf {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource> {
        self.runs.lock().unwrap().push(self.label.clone());

        match self.label.as_str() {
            "fail" => return Err(ContentError::Execution("remote not reachable".into())),
            "hang" => {
                ctx.cancelled().await;
                ctx.check_cancelled()?;
            }
            _ => {}
        }

        let owner = map_id(mappings, CONTENT_UID).unwrap_or(CONTENT_UID);
        tokio::fs::create_dir_all(&self.target).await?;
        tokio::fs::write(self.target.join("OWNER"), owner.to_string()).await?;

        if self.label == "cancel" {
            ctx.cancel();
        }
        Ok(self.source)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

pub fn read_owner(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path.join("OWNER"))
        .ok()
        .and_then(|raw| raw.parse().ok())
}
