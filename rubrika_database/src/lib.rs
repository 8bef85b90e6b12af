//! Persistence layer: the [`CategoryStore`] abstraction, its PostgreSQL
//! implementation (see [`entities`]) and the schema those queries expect.

use std::borrow::Cow;

use thiserror::Error;

pub mod entities;
pub mod schema;
pub mod store;

pub use store::*;



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("a category named \"{}\" already exists", .name)]
    DuplicateCategoryName { name: String },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }
}



pub type QueryResult<R, E = QueryError> = Result<R, E>;



pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}
