use chrono::Utc;
use rubrika_core::ids::{CategoryId, MessageId};
use sqlx::PgConnection;
use uuid::Uuid;

use super::{CategoryMessageModel, CategoryModel, InternalCategoryModel, NewCategory, NewCategoryMessage};
use crate::{QueryError, QueryResult};



pub struct CategoryMutation;

impl CategoryMutation {
    /// Inserts the category row and its initial messages.
    ///
    /// Should be run inside a transaction, otherwise a failure
    /// halfway through leaves a category with only some of its messages.
    pub async fn create(
        database_connection: &mut PgConnection,
        new_category: NewCategory,
    ) -> QueryResult<CategoryModel> {
        let new_category_id = CategoryId::generate();
        let new_category_created_at = Utc::now();
        let new_category_last_modified_at = new_category_created_at;

        let insertion_result = sqlx::query_as::<_, InternalCategoryModel>(
            "INSERT INTO rubrika_category \
                (id, name, created_at, last_modified_at) \
                VALUES ($1, $2, $3, $4) \
                RETURNING id, name, created_at, last_modified_at",
        )
        .bind(new_category_id.into_uuid())
        .bind(&new_category.name)
        .bind(new_category_created_at)
        .bind(new_category_last_modified_at)
        .fetch_one(&mut *database_connection)
        .await;

        let newly_created_category = match insertion_result {
            Ok(category) => category,
            Err(sqlx::Error::Database(database_error)) if database_error.is_unique_violation() => {
                return Err(QueryError::DuplicateCategoryName {
                    name: new_category.name,
                });
            }
            Err(error) => return Err(QueryError::SqlxError { error }),
        };


        let mut created_messages = Vec::with_capacity(new_category.messages.len());

        for NewCategoryMessage { text } in new_category.messages {
            let new_message_id = MessageId::generate();

            sqlx::query(
                "INSERT INTO rubrika_category_message \
                    (id, category_id, text, created_at) \
                    VALUES ($1, $2, $3, $4)",
            )
            .bind(new_message_id.into_uuid())
            .bind(newly_created_category.id)
            .bind(&text)
            .bind(new_category_created_at)
            .execute(&mut *database_connection)
            .await?;

            created_messages.push(CategoryMessageModel {
                id: new_message_id,
                text,
                created_at: new_category_created_at,
            });
        }


        Ok(newly_created_category.into_external_model_with_messages(created_messages))
    }

    /// Appends a message to the category with the given name in a single statement.
    ///
    /// The `UPDATE` takes the category row lock, so concurrent appends to the same
    /// category are serialized. Returns the ID of the category the message was
    /// appended to, or `None` if no category has that name.
    pub async fn append_message(
        database_connection: &mut PgConnection,
        category_name: &str,
        new_message: NewCategoryMessage,
    ) -> QueryResult<Option<CategoryId>> {
        let new_message_id = MessageId::generate();
        let appended_at = Utc::now();

        let target_category_id = sqlx::query_scalar::<_, Uuid>(
            "WITH target_category AS (\
                UPDATE rubrika_category \
                    SET last_modified_at = $2 \
                    WHERE name = $1 \
                    RETURNING id\
            ) \
            INSERT INTO rubrika_category_message \
                (id, category_id, text, created_at) \
                SELECT $3, target_category.id, $4, $2 \
                    FROM target_category \
                RETURNING category_id",
        )
        .bind(category_name)
        .bind(appended_at)
        .bind(new_message_id.into_uuid())
        .bind(new_message.text)
        .fetch_optional(database_connection)
        .await?;

        Ok(target_category_id.map(CategoryId::new))
    }
}
