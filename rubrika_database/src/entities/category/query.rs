use std::collections::HashMap;

use rubrika_core::ids::CategoryId;
use sqlx::PgConnection;
use uuid::Uuid;

use super::{CategoryMessageModel, CategoryModel, InternalCategoryMessageModel, InternalCategoryModel};
use crate::{IntoExternalModel, QueryResult};



async fn get_messages_for_category(
    database_connection: &mut PgConnection,
    category_id: Uuid,
) -> QueryResult<Vec<CategoryMessageModel>> {
    let internal_messages = sqlx::query_as::<_, InternalCategoryMessageModel>(
        "SELECT id, category_id, text, created_at \
            FROM rubrika_category_message \
            WHERE category_id = $1 \
            ORDER BY sequence_number ASC",
    )
    .bind(category_id)
    .fetch_all(database_connection)
    .await?;

    Ok(internal_messages
        .into_iter()
        .map(InternalCategoryMessageModel::into_external_model)
        .collect())
}



pub struct CategoryQuery;

impl CategoryQuery {
    /// Returns every category (with messages), newest first.
    ///
    /// Ties on `created_at` are broken by the ID, which is time-ordered.
    pub async fn get_all(database_connection: &mut PgConnection) -> QueryResult<Vec<CategoryModel>> {
        let internal_categories = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, name, created_at, last_modified_at \
                FROM rubrika_category \
                ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *database_connection)
        .await?;

        if internal_categories.is_empty() {
            return Ok(Vec::new());
        }


        let internal_messages = sqlx::query_as::<_, InternalCategoryMessageModel>(
            "SELECT id, category_id, text, created_at \
                FROM rubrika_category_message \
                ORDER BY category_id, sequence_number ASC",
        )
        .fetch_all(&mut *database_connection)
        .await?;

        let mut messages_by_category: HashMap<Uuid, Vec<CategoryMessageModel>> =
            HashMap::with_capacity(internal_categories.len());

        for internal_message in internal_messages {
            messages_by_category
                .entry(internal_message.category_id)
                .or_default()
                .push(internal_message.into_external_model());
        }


        Ok(internal_categories
            .into_iter()
            .map(|category| {
                let messages = messages_by_category
                    .remove(&category.id)
                    .unwrap_or_default();

                category.into_external_model_with_messages(messages)
            })
            .collect())
    }

    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        category_id: CategoryId,
    ) -> QueryResult<Option<CategoryModel>> {
        let internal_category = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, name, created_at, last_modified_at \
                FROM rubrika_category \
                WHERE id = $1",
        )
        .bind(category_id.into_uuid())
        .fetch_optional(&mut *database_connection)
        .await?;

        let Some(internal_category) = internal_category else {
            return Ok(None);
        };

        let messages = get_messages_for_category(database_connection, internal_category.id).await?;

        Ok(Some(
            internal_category.into_external_model_with_messages(messages),
        ))
    }

    pub async fn get_by_name(
        database_connection: &mut PgConnection,
        category_name: &str,
    ) -> QueryResult<Option<CategoryModel>> {
        let internal_category = sqlx::query_as::<_, InternalCategoryModel>(
            "SELECT id, name, created_at, last_modified_at \
                FROM rubrika_category \
                WHERE name = $1",
        )
        .bind(category_name)
        .fetch_optional(&mut *database_connection)
        .await?;

        let Some(internal_category) = internal_category else {
            return Ok(None);
        };

        let messages = get_messages_for_category(database_connection, internal_category.id).await?;

        Ok(Some(
            internal_category.into_external_model_with_messages(messages),
        ))
    }

    pub async fn exists_by_name(
        database_connection: &mut PgConnection,
        category_name: &str,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 \
                    FROM rubrika_category \
                    WHERE name = $1\
            )",
        )
        .bind(category_name)
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }
}
