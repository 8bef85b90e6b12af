use std::io;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};


#[derive(Debug, Error)]
pub enum TracingInitializationError {
    #[error("unable to create log file output directory {}", .directory_path.display())]
    UnableToCreateLogDirectory {
        directory_path: std::path::PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("a global tracing subscriber has already been set")]
    AlreadyInitialized {
        #[from]
        #[source]
        error: TryInitError,
    },
}


/// Installs the global tracing subscriber: a console layer and a daily-rolling
/// log file layer, each with its own filter.
///
/// The returned guard flushes the file writer when dropped,
/// so it must be held until the program exits.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: &Path,
    log_file_name_prefix: &str,
) -> Result<WorkerGuard, TracingInitializationError> {
    std::fs::create_dir_all(log_file_output_directory).map_err(|error| {
        TracingInitializationError::UnableToCreateLogDirectory {
            directory_path: log_file_output_directory.to_path_buf(),
            error,
        }
    })?;

    let file_appender = rolling::daily(log_file_output_directory, log_file_name_prefix);
    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);


    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_level_filter);

    let log_file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_file_writer)
        .with_filter(log_file_level_filter);


    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()?;

    Ok(guard)
}
