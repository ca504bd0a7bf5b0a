//! Sequential composition of initializers.
//!
//! Runs an ordered list of children as a single initializer. Children run one
//! at a time, in list order, and the first failure stops the run.

use super::metrics::{ChildMetrics, RunMetrics};
use super::{BoxedInitializer, InitContext, Initializer};
use async_trait::async_trait;
use std::time::Instant;
use wscontent_shared::errors::{ContentError, ContentResult};
use wscontent_shared::{IdMapping, InitSource};

/// An ordered sequence of initializers run as one.
///
/// The reported source is the one of the last child executed, or
/// `InitSource::default()` when there are no children. For a composite
/// mixing kinds of sources (git and backup, say) that value says nothing
/// about the other children.
///
/// There is no rollback: when child `k` fails, files written by children
/// `0..k` stay on disk and the caller must discard the whole workspace.
pub struct CompositeInitializer {
    children: Vec<BoxedInitializer>,
}

impl CompositeInitializer {
    pub fn new(children: Vec<BoxedInitializer>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Run all children and report per-child timings.
    ///
    /// Both `ctx` and `mappings` are handed unchanged to every child. A
    /// child's error is returned as is. Cancellation is not checked here: a
    /// cancelled context surfaces as the in-flight child's failure.
    pub async fn run_with_metrics(
        &self,
        ctx: &InitContext,
        mappings: &[IdMapping],
    ) -> ContentResult<(InitSource, RunMetrics)> {
        let total_start = Instant::now();
        let mut source = InitSource::default();
        let mut children = Vec::with_capacity(self.children.len());

        for (index, child) in self.children.iter().enumerate() {
            let name = child.name();
            let child_start = Instant::now();
            tracing::debug!(index, initializer = %name, "Running child initializer");

            source = child
                .run(ctx, mappings)
                .await
                .inspect_err(|e| log_child_error(index, name, e))?;

            let duration_ms = child_start.elapsed().as_millis();
            tracing::debug!(
                index,
                initializer = %name,
                source = %source,
                duration_ms,
                "Child initializer finished"
            );

            children.push(ChildMetrics {
                index,
                name: name.to_string(),
                duration_ms,
                source,
            });
        }

        Ok((
            source,
            RunMetrics {
                total_duration_ms: total_start.elapsed().as_millis(),
                children,
            },
        ))
    }
}

#[async_trait]
impl Initializer for CompositeInitializer {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource> {
        let (source, _metrics) = self.run_with_metrics(ctx, mappings).await?;
        Ok(source)
    }

    fn name(&self) -> &str {
        "composite"
    }
}

impl FromIterator<BoxedInitializer> for CompositeInitializer {
    fn from_iter<I: IntoIterator<Item = BoxedInitializer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn log_child_error(index: usize, name: &str, err: &ContentError) {
    tracing::warn!(
        index,
        initializer = %name,
        error = %err,
        "Child initializer failed, skipping remaining children"
    );
}
