//! Application-wide state (shared between endpoint functions).

use std::sync::Arc;

use actix_web::web::Data;
use rubrika_configuration::Configuration;
use rubrika_database::{CategoryStore, PostgresCategoryStore, QueryError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{create_lazy_database_connection_pool, establish_database_connection_pool};


#[derive(Debug, Error)]
pub enum ApplicationStateError {
    #[error("unable to connect to the database")]
    UnableToConnectToDatabase {
        #[source]
        error: sqlx::Error,
    },

    #[error("unable to initialize the database schema")]
    UnableToInitializeDatabaseSchema {
        #[source]
        error: QueryError,
    },
}


pub struct ApplicationStateInner {
    category_store: Arc<dyn CategoryStore>,
}

impl ApplicationStateInner {
    /// Connects to the database and prepares its schema.
    ///
    /// If `database.require_connection_on_startup` is disabled, connection and
    /// schema failures are only logged: the server starts anyway, and the schema
    /// is set up on the first request that reaches a working database.
    pub async fn new(configuration: &Configuration) -> Result<Self, ApplicationStateError> {
        let database_configuration = &configuration.database;

        if database_configuration.require_connection_on_startup {
            let connection_pool = establish_database_connection_pool(database_configuration)
                .await
                .map_err(|error| ApplicationStateError::UnableToConnectToDatabase { error })?;

            let category_store = PostgresCategoryStore::new(connection_pool);
            category_store
                .initialize_schema()
                .await
                .map_err(|error| ApplicationStateError::UnableToInitializeDatabaseSchema { error })?;

            info!("Connected to the database.");

            return Ok(Self::from_store(Arc::new(category_store)));
        }


        warn!("Database connection is not required on startup, connecting lazily.");

        let connection_pool = create_lazy_database_connection_pool(database_configuration)
            .map_err(|error| ApplicationStateError::UnableToConnectToDatabase { error })?;

        let category_store = PostgresCategoryStore::new(connection_pool);

        if let Err(error) = category_store.initialize_schema().await {
            error!(
                error = ?error,
                "Failed to initialize the database schema, will retry on the next request."
            );
        }

        Ok(Self::from_store(Arc::new(category_store)))
    }

    pub fn from_store(category_store: Arc<dyn CategoryStore>) -> Self {
        Self { category_store }
    }

    #[inline]
    pub fn category_store(&self) -> &dyn CategoryStore {
        self.category_store.as_ref()
    }
}


pub type ApplicationState = Data<ApplicationStateInner>;
