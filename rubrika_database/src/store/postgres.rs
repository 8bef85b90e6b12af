use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::OnceCell;
use tracing::info;

use super::CategoryStore;
use crate::{
    entities::{CategoryModel, CategoryMutation, CategoryQuery, NewCategory, NewCategoryMessage},
    schema,
    QueryError,
    QueryResult,
};



/// [`CategoryStore`] backed by a PostgreSQL connection pool.
///
/// The schema is bootstrapped at most once per process. If the bootstrap fails
/// (e.g. the database is not reachable yet), it is retried on the next operation.
pub struct PostgresCategoryStore {
    connection_pool: PgPool,

    schema_initialized: OnceCell<()>,
}

impl PostgresCategoryStore {
    pub fn new(connection_pool: PgPool) -> Self {
        Self {
            connection_pool,
            schema_initialized: OnceCell::new(),
        }
    }

    /// Makes sure the tables exist. Cheap after the first successful call.
    pub async fn initialize_schema(&self) -> QueryResult<()> {
        self.schema_initialized
            .get_or_try_init(|| async {
                let mut connection = self.connection_pool.acquire().await?;
                schema::ensure_schema(&mut connection).await?;

                info!("Database schema initialized.");
                Ok::<_, QueryError>(())
            })
            .await?;

        Ok(())
    }

    async fn begin_transaction(&self) -> QueryResult<Transaction<'static, Postgres>> {
        self.initialize_schema().await?;

        Ok(self.connection_pool.begin().await?)
    }
}


#[async_trait]
impl CategoryStore for PostgresCategoryStore {
    async fn find_one_by_name(&self, category_name: &str) -> QueryResult<Option<CategoryModel>> {
        let mut transaction = self.begin_transaction().await?;

        let category = CategoryQuery::get_by_name(&mut transaction, category_name).await?;

        transaction.commit().await?;
        Ok(category)
    }

    async fn find_all(&self) -> QueryResult<Vec<CategoryModel>> {
        let mut transaction = self.begin_transaction().await?;

        // Both queries must see the same snapshot.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *transaction)
            .await?;

        let categories = CategoryQuery::get_all(&mut transaction).await?;

        transaction.commit().await?;
        Ok(categories)
    }

    async fn exists_by_name(&self, category_name: &str) -> QueryResult<bool> {
        self.initialize_schema().await?;

        let mut connection = self.connection_pool.acquire().await?;
        CategoryQuery::exists_by_name(&mut connection, category_name).await
    }

    async fn insert(&self, new_category: NewCategory) -> QueryResult<CategoryModel> {
        let mut transaction = self.begin_transaction().await?;

        let created_category = CategoryMutation::create(&mut transaction, new_category).await?;

        transaction.commit().await?;
        Ok(created_category)
    }

    async fn find_and_append_message(
        &self,
        category_name: &str,
        new_message: NewCategoryMessage,
    ) -> QueryResult<Option<CategoryModel>> {
        let mut transaction = self.begin_transaction().await?;

        let Some(category_id) =
            CategoryMutation::append_message(&mut transaction, category_name, new_message).await?
        else {
            transaction.rollback().await?;
            return Ok(None);
        };

        let updated_category = CategoryQuery::get_by_id(&mut transaction, category_id)
            .await?
            .ok_or_else(|| {
                QueryError::database_inconsistency(
                    "appended a message to a category that could not be read back",
                )
            })?;

        transaction.commit().await?;
        Ok(Some(updated_category))
    }
}



#[cfg(test)]
mod test {
    use std::time::Duration;

    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    use super::*;

    fn store_with_unreachable_database() -> PostgresCategoryStore {
        let connection_pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy_with(
                PgConnectOptions::new()
                    .host("127.0.0.1")
                    .port(1)
                    .username("rubrika"),
            );

        PostgresCategoryStore::new(connection_pool)
    }

    #[tokio::test]
    async fn failed_schema_bootstrap_is_retried_on_next_operation() {
        let store = store_with_unreachable_database();

        assert!(matches!(
            store.find_all().await,
            Err(QueryError::SqlxError { .. })
        ));
        assert!(!store.schema_initialized.initialized());

        assert!(matches!(
            store.exists_by_name("general").await,
            Err(QueryError::SqlxError { .. })
        ));
        assert!(!store.schema_initialized.initialized());
    }
}
