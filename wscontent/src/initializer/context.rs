//! Cancellable execution context handed to every initializer.

use tokio_util::sync::CancellationToken;
use wscontent_shared::errors::{ContentError, ContentResult};

/// Execution context shared by all initializers of one run.
///
/// Cloning is cheap and every clone observes the same cancellation.
#[derive(Debug, Clone)]
pub struct InitContext {
    cancel: CancellationToken,
}

impl InitContext {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Context cancelled together with this one, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail with `ContentError::Cancelled` once the context is cancelled.
    pub fn check_cancelled(&self) -> ContentResult<()> {
        if self.is_cancelled() {
            return Err(ContentError::Cancelled(
                "initialization context was cancelled".into(),
            ));
        }
        Ok(())
    }

    /// Resolves when the context is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Default for InitContext {
    fn default() -> Self {
        Self::new()
    }
}
