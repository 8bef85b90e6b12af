use std::str::FromStr;
use std::time::Duration;

use rubrika_configuration::DatabaseConfiguration;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

pub mod api;
pub mod logging;
pub mod state;


fn database_pool_options(database_configuration: &DatabaseConfiguration) -> PgPoolOptions {
    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .acquire_timeout(Duration::from_secs(
            database_configuration.acquire_timeout_seconds,
        ))
        .max_connections(database_configuration.max_connections)
        .test_before_acquire(true)
}

fn database_connect_options(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(&database_configuration.url)?
        .application_name(&format!(
            "rubrika_v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(200),
        ))
}


/// Connects to the database, failing if no connection can be established.
pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    database_pool_options(database_configuration)
        .min_connections(1)
        .connect_with(database_connect_options(database_configuration)?)
        .await
}

/// Creates a pool that opens connections on first use.
///
/// Only the URL is validated here; an unreachable database
/// surfaces as errors on the individual queries.
pub fn create_lazy_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    Ok(database_pool_options(database_configuration)
        .connect_lazy_with(database_connect_options(database_configuration)?))
}
