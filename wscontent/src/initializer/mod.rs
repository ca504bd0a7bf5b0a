//! Initializer capability and its composition.
//!
//! Every content source, leaf or composite, implements [`Initializer`]. A
//! composite is itself an initializer, so trees of any depth run through the
//! same call.
//!
//! ## Architecture
//!
//! ```text
//! WorkspaceInitializer (spec tree) ──build_initializer──→ BoxedInitializer tree
//!
//! CompositeInitializer
//!   ├─ git        (LeafFactory)
//!   ├─ Composite
//!   │    ├─ backup (LeafFactory)
//!   │    └─ empty
//!   └─ download   (LeafFactory)
//!
//! Children run strictly in order; the first failure stops the composite.
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use wscontent::initializer::{CompositeInitializer, EmptyInitializer, InitContext};
//!
//! let composite = CompositeInitializer::new(vec![
//!     Box::new(EmptyInitializer),
//!     Box::new(EmptyInitializer),
//! ]);
//! let (source, metrics) = composite
//!     .run_with_metrics(&InitContext::new(), &[])
//!     .await?;
//! println!("{} in {}ms", source, metrics.total_duration_ms);
//! ```

mod builder;
mod composite;
mod context;
mod leaves;
mod metrics;

pub use builder::{LeafFactory, UnsupportedLeaves, build_initializer, validate_spec};
pub use composite::CompositeInitializer;
pub use context::InitContext;
pub use leaves::{EmptyInitializer, FnInitializer};
pub use metrics::{ChildMetrics, RunMetrics};

use async_trait::async_trait;
use std::sync::Arc;
use wscontent_shared::errors::ContentResult;
use wscontent_shared::{IdMapping, InitSource};

/// A unit of work that populates workspace content.
///
/// `run` receives the shared cancellation context and the id mappings to
/// apply to staged files, and reports which kind of source produced the
/// content. Implementations must have finished all their writes before
/// returning, and must fail promptly once `ctx` is cancelled.
#[async_trait]
pub trait Initializer: Send + Sync {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource>;

    /// Human-readable name for logging and metrics.
    fn name(&self) -> &str;
}

pub type BoxedInitializer = Box<dyn Initializer>;

#[async_trait]
impl<T: Initializer + ?Sized> Initializer for Box<T> {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource> {
        (**self).run(ctx, mappings).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Initializer + ?Sized> Initializer for Arc<T> {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource> {
        (**self).run(ctx, mappings).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
