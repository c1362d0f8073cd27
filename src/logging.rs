use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "codeshell=info,tower_http=info";
const LOG_FILE_PREFIX: &str = "codeshell.log";

/// Keeps the file writer flushing until dropped.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
}

/// Stderr logging, plus a daily-rotated file under `log_dir` when given.
/// Returns `None` if a global subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> Option<LoggingGuard> {
    let log_dir = log_dir.and_then(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => Some(dir.to_path_buf()),
        Err(err) => {
            eprintln!("codeshell: cannot create log dir {}: {err}", dir.display());
            None
        }
    });

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer);

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    match &log_dir {
        Some(dir) => tracing::info!(log_dir = %dir.display(), "tracing initialized"),
        None => tracing::info!("tracing initialized"),
    }

    Some(LoggingGuard { _guard: guard })
}
