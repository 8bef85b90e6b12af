//! Idempotent schema bootstrap.
//!
//! There is no migration tooling: every statement is `IF NOT EXISTS`,
//! so running [`ensure_schema`] against an already initialized database is a no-op.

use sqlx::PgConnection;
use tracing::debug;

use crate::QueryResult;


const SCHEMA_STATEMENTS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS rubrika_category (\
        id UUID PRIMARY KEY, \
        name TEXT NOT NULL UNIQUE, \
        created_at TIMESTAMPTZ NOT NULL, \
        last_modified_at TIMESTAMPTZ NOT NULL\
    )",
    "CREATE TABLE IF NOT EXISTS rubrika_category_message (\
        id UUID PRIMARY KEY, \
        category_id UUID NOT NULL \
            REFERENCES rubrika_category (id) ON DELETE CASCADE, \
        sequence_number BIGSERIAL NOT NULL, \
        text TEXT NOT NULL, \
        created_at TIMESTAMPTZ NOT NULL\
    )",
    "CREATE INDEX IF NOT EXISTS rubrika_category_message_order_index \
        ON rubrika_category_message (category_id, sequence_number)",
];


pub async fn ensure_schema(database_connection: &mut PgConnection) -> QueryResult<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *database_connection)
            .await?;
    }

    debug!("Database schema is in place.");

    Ok(())
}
