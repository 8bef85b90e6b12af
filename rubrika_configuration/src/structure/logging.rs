use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::{traits::TryResolve, LoggingConfigurationError};


#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub(crate) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}

impl Default for UnresolvedLoggingConfiguration {
    fn default() -> Self {
        Self {
            console_output_level_filter: "info".to_string(),
            log_file_output_level_filter: "info".to_string(),
            log_file_output_directory: "./logs".to_string(),
        }
    }
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}


impl TryResolve for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        EnvFilter::try_new(&self.console_output_level_filter).map_err(|error| {
            LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.console_output_level_filter.clone(),
                kind: "console_output_level_filter".into(),
                error,
            }
        })?;

        EnvFilter::try_new(&self.log_file_output_level_filter).map_err(|error| {
            LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.log_file_output_level_filter.clone(),
                kind: "log_file_output_level_filter".into(),
                error,
            }
        })?;

        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory: PathBuf::from(self.log_file_output_directory),
        })
    }
}


impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> EnvFilter {
        // Validated in `try_resolve`, the fallback is never reached.
        EnvFilter::try_new(&self.console_output_level_filter)
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_file_output_level_filter)
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
