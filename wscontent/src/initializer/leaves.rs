//! Initializers implemented by the core itself.

use super::{InitContext, Initializer};
use async_trait::async_trait;
use futures::future::BoxFuture;
use wscontent_shared::errors::ContentResult;
use wscontent_shared::{IdMapping, InitSource};

/// Leaves the workspace as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInitializer;

#[async_trait]
impl Initializer for EmptyInitializer {
    async fn run(&self, ctx: &InitContext, _mappings: &[IdMapping]) -> ContentResult<InitSource> {
        ctx.check_cancelled()?;
        Ok(InitSource::FromOther)
    }

    fn name(&self) -> &str {
        "empty"
    }
}

type InitFn = dyn for<'a> Fn(&'a InitContext, &'a [IdMapping]) -> BoxFuture<'a, ContentResult<InitSource>>
    + Send
    + Sync;

/// Initializer backed by an async closure.
///
/// ```ignore
/// use futures::FutureExt;
///
/// let init = FnInitializer::new("touch", |_ctx, _mappings| {
///     async { Ok(InitSource::FromOther) }.boxed()
/// });
/// ```
pub struct FnInitializer {
    name: String,
    func: Box<InitFn>,
}

impl FnInitializer {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: for<'a> Fn(&'a InitContext, &'a [IdMapping]) -> BoxFuture<'a, ContentResult<InitSource>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl Initializer for FnInitializer {
    async fn run(&self, ctx: &InitContext, mappings: &[IdMapping]) -> ContentResult<InitSource> {
        (self.func)(ctx, mappings).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use wscontent_shared::errors::ContentError;

    #[tokio::test]
    async fn test_empty_reports_other() {
        let source = EmptyInitializer.run(&InitContext::new(), &[]).await.unwrap();
        assert_eq!(source, InitSource::FromOther);
    }

    #[tokio::test]
    async fn test_empty_fails_when_cancelled() {
        let ctx = InitContext::new();
        ctx.cancel();

        let err = EmptyInitializer.run(&ctx, &[]).await.unwrap_err();
        assert!(matches!(err, ContentError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_fn_initializer_sees_arguments() {
        let init = FnInitializer::new("count", |_ctx, mappings| {
            let count = mappings.len();
            async move {
                if count == 2 {
                    Ok(InitSource::FromBackup)
                } else {
                    Err(ContentError::Execution(format!("got {} mappings", count)))
                }
            }
            .boxed()
        });
        let mappings = [IdMapping::new(0, 1000, 1), IdMapping::new(1, 2000, 1)];

        assert_eq!(init.name(), "count");
        assert_eq!(
            init.run(&InitContext::new(), &mappings).await.unwrap(),
            InitSource::FromBackup
        );
        assert!(init.run(&InitContext::new(), &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_fn_initializer_observes_cancellation() {
        let init = FnInitializer::new("wait", |ctx, _mappings| {
            async move {
                ctx.cancelled().await;
                ctx.check_cancelled()?;
                Ok::<_, ContentError>(InitSource::FromOther)
            }
            .boxed()
        });
        let ctx = InitContext::new();
        ctx.cancel();

        let err = init.run(&ctx, &[]).await.unwrap_err();
        assert!(matches!(err, ContentError::Cancelled(_)));
    }
}
