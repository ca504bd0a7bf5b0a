use crate::runtime::ContentOptions;
use crate::runtime::constants::filenames;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};
use wscontent_shared::errors::{ContentError, ContentResult};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `options.log_level`. With `log_dir` set,
/// logs go to a daily rolling file and the returned guard must be kept alive
/// for them to be flushed; otherwise logs go to stderr.
///
/// Calling this again after a subscriber is installed is a no-op that logs a
/// warning through the installed subscriber and returns `None`.
pub fn init_logging(options: &ContentOptions) -> ContentResult<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.log_level))
        .map_err(|e| {
            ContentError::Config(format!(
                "Invalid log level '{}': {}",
                options.log_level, e
            ))
        })?;

    let Some(log_dir) = &options.log_dir else {
        if let Err(e) = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init()
        {
            tracing::warn!(error = %e, "Tracing subscriber already installed");
        }
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir).map_err(|e| {
        ContentError::Storage(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let file_appender = tracing_appender::rolling::daily(log_dir, filenames::LOG);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    if let Err(e) = register_to_tracing(non_blocking, env_filter) {
        tracing::warn!(
            log_dir = %log_dir.display(),
            error = %e,
            "Tracing subscriber already installed, file logging disabled"
        );
        return Ok(None);
    }

    Ok(Some(guard))
}

fn register_to_tracing(
    non_blocking: NonBlocking,
    env_filter: EnvFilter,
) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false),
        )
        .try_init()
}
