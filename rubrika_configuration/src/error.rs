use std::{borrow::Cow, io, path::PathBuf};

use thiserror::Error;


#[derive(Debug, Error)]
pub enum LoggingConfigurationError {
    #[error(
        "invalid tracing filter of type {} (doesn't parse with EnvFilter): {}",
        .kind,
        .invalid_filter
    )]
    InvalidTracingFilter {
        invalid_filter: String,

        kind: Cow<'static, str>,

        #[source]
        error: tracing_subscriber::filter::ParseError,
    },
}


#[derive(Debug, Error)]
pub enum HttpConfigurationError {
    #[error("the PORT environment variable is not a valid port number: {}", .value)]
    InvalidPortOverride {
        value: String,

        #[source]
        error: std::num::ParseIntError,
    },
}


#[derive(Debug, Error)]
pub enum DatabaseConfigurationError {
    #[error(
        "no database URL: set database.url in the configuration file \
        or the DATABASE_URL environment variable"
    )]
    MissingDatabaseUrl,
}


#[derive(Debug, Error)]
pub enum ConfigurationResolutionError {
    #[error("error while resolving \"logging\" table")]
    LoggingConfigurationError {
        #[from]
        #[source]
        error: LoggingConfigurationError,
    },

    #[error("error while resolving \"http\" table")]
    HttpConfigurationError {
        #[from]
        #[source]
        error: HttpConfigurationError,
    },

    #[error("error while resolving \"database\" table")]
    DatabaseConfigurationError {
        #[from]
        #[source]
        error: DatabaseConfigurationError,
    },
}


#[derive(Debug, Error)]
pub enum ConfigurationLoadingError {
    #[error("unable to read configuration file at {}", .path.display())]
    UnableToReadConfigurationFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("failed to parse the contents of the configuration file as TOML")]
    ParsingError {
        #[from]
        #[source]
        error: toml::de::Error,
    },

    #[error("failed to resolve and validate the contents of the configuration")]
    ResolutionError {
        #[from]
        #[source]
        error: ConfigurationResolutionError,
    },
}
