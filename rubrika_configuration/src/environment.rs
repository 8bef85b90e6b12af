use std::env;


pub const DATABASE_URL_ENVIRONMENT_VARIABLE: &str = "DATABASE_URL";
pub const HTTP_PORT_ENVIRONMENT_VARIABLE: &str = "PORT";
pub const HTTP_HOST_ENVIRONMENT_VARIABLE: &str = "HOST";


/// Values from the process environment that take precedence over the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentOverrides {
    /// `DATABASE_URL`, overrides `database.url`.
    pub database_url: Option<String>,

    /// `PORT`, overrides `http.port`. Kept as a string until resolution validates it.
    pub http_port: Option<String>,

    /// `HOST`, overrides `http.host`.
    pub http_host: Option<String>,
}

impl EnvironmentOverrides {
    /// Reads the overrides from the current process environment.
    /// Variables that are unset or not valid unicode are ignored.
    pub fn from_process_environment() -> Self {
        Self {
            database_url: env::var(DATABASE_URL_ENVIRONMENT_VARIABLE).ok(),
            http_port: env::var(HTTP_PORT_ENVIRONMENT_VARIABLE).ok(),
            http_host: env::var(HTTP_HOST_ENVIRONMENT_VARIABLE).ok(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}
