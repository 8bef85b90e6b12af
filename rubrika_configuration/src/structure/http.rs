use serde::Deserialize;

use crate::{traits::TryResolveWithContext, EnvironmentOverrides, HttpConfigurationError};


#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct UnresolvedHttpConfiguration {
    host: String,

    port: u16,
}

impl Default for UnresolvedHttpConfiguration {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
        }
    }
}


/// Actix HTTP server-related configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfiguration {
    /// Host to bind the HTTP server to.
    pub host: String,

    /// Port to bind the HTTP server to.
    pub port: u16,
}


impl TryResolveWithContext for UnresolvedHttpConfiguration {
    type Resolved = HttpConfiguration;
    type Context = EnvironmentOverrides;
    type Error = HttpConfigurationError;

    fn try_resolve_with_context(
        self,
        overrides: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let port = match overrides.http_port.as_deref() {
            Some(port_override) => port_override.trim().parse::<u16>().map_err(|error| {
                HttpConfigurationError::InvalidPortOverride {
                    value: port_override.to_string(),
                    error,
                }
            })?,
            None => self.port,
        };

        let host = overrides.http_host.unwrap_or(self.host);

        Ok(HttpConfiguration { host, port })
    }
}
