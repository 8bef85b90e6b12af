use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use async_trait::async_trait;
use chrono::Utc;
use rubrika_core::ids::{CategoryId, MessageId};

use super::CategoryStore;
use crate::{
    entities::{CategoryMessageModel, CategoryModel, NewCategory, NewCategoryMessage},
    QueryError,
    QueryResult,
};



/// Non-persistent [`CategoryStore`], used in tests.
///
/// Categories are kept in insertion order. Cloning the store
/// yields a handle to the same underlying data.
#[derive(Clone, Default)]
pub struct InMemoryCategoryStore {
    categories: Arc<RwLock<Vec<CategoryModel>>>,

    unavailable: Arc<AtomicBool>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While unavailable, every operation fails as if the database connection was lost.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn number_of_categories(&self) -> usize {
        self.categories
            .read()
            .map(|categories| categories.len())
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> QueryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(QueryError::SqlxError {
                error: sqlx::Error::PoolTimedOut,
            });
        }

        Ok(())
    }

    /// Mirrors PostgreSQL, whose `TEXT` columns reject `U+0000`.
    fn ensure_encodable(text: &str) -> QueryResult<()> {
        if text.contains('\0') {
            return Err(QueryError::SqlxError {
                error: sqlx::Error::Protocol(
                    "invalid byte sequence for encoding \"UTF8\": 0x00".to_string(),
                ),
            });
        }

        Ok(())
    }

    fn read_categories(&self) -> QueryResult<RwLockReadGuard<'_, Vec<CategoryModel>>> {
        self.ensure_available()?;

        self.categories
            .read()
            .map_err(|_| QueryError::database_inconsistency("in-memory category lock is poisoned"))
    }

    fn write_categories(&self) -> QueryResult<RwLockWriteGuard<'_, Vec<CategoryModel>>> {
        self.ensure_available()?;

        self.categories
            .write()
            .map_err(|_| QueryError::database_inconsistency("in-memory category lock is poisoned"))
    }
}


#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_one_by_name(&self, category_name: &str) -> QueryResult<Option<CategoryModel>> {
        Self::ensure_encodable(category_name)?;
        let categories = self.read_categories()?;

        Ok(categories
            .iter()
            .find(|category| category.name == category_name)
            .cloned())
    }

    async fn find_all(&self) -> QueryResult<Vec<CategoryModel>> {
        let categories = self.read_categories()?;

        Ok(categories.iter().rev().cloned().collect())
    }

    async fn exists_by_name(&self, category_name: &str) -> QueryResult<bool> {
        Self::ensure_encodable(category_name)?;
        let categories = self.read_categories()?;

        Ok(categories
            .iter()
            .any(|category| category.name == category_name))
    }

    async fn insert(&self, new_category: NewCategory) -> QueryResult<CategoryModel> {
        Self::ensure_encodable(&new_category.name)?;
        for message in &new_category.messages {
            Self::ensure_encodable(&message.text)?;
        }

        let mut categories = self.write_categories()?;

        if categories
            .iter()
            .any(|category| category.name == new_category.name)
        {
            return Err(QueryError::DuplicateCategoryName {
                name: new_category.name,
            });
        }


        let created_at = Utc::now();

        let messages = new_category
            .messages
            .into_iter()
            .map(|NewCategoryMessage { text }| CategoryMessageModel {
                id: MessageId::generate(),
                text,
                created_at,
            })
            .collect();

        let created_category = CategoryModel {
            id: CategoryId::generate(),
            name: new_category.name,
            messages,
            created_at,
            last_modified_at: created_at,
        };

        categories.push(created_category.clone());

        Ok(created_category)
    }

    async fn find_and_append_message(
        &self,
        category_name: &str,
        new_message: NewCategoryMessage,
    ) -> QueryResult<Option<CategoryModel>> {
        Self::ensure_encodable(category_name)?;
        Self::ensure_encodable(&new_message.text)?;

        let mut categories = self.write_categories()?;

        let Some(category) = categories
            .iter_mut()
            .find(|category| category.name == category_name)
        else {
            return Ok(None);
        };


        let appended_at = Utc::now();

        category.messages.push(CategoryMessageModel {
            id: MessageId::generate(),
            text: new_message.text,
            created_at: appended_at,
        });
        category.last_modified_at = appended_at;

        Ok(Some(category.clone()))
    }
}



#[cfg(test)]
mod test {
    use super::*;

    fn new_category(name: &str, messages: &[&str]) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            messages: messages
                .iter()
                .map(|text| NewCategoryMessage {
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_names() {
        let store = InMemoryCategoryStore::new();

        store.insert(new_category("general", &[])).await.unwrap();

        let duplicate_result = store.insert(new_category("general", &["hi"])).await;
        assert!(matches!(
            duplicate_result,
            Err(QueryError::DuplicateCategoryName { name }) if name == "general"
        ));

        assert_eq!(store.number_of_categories(), 1);
    }

    #[tokio::test]
    async fn lists_newest_category_first() {
        let store = InMemoryCategoryStore::new();

        store.insert(new_category("first", &[])).await.unwrap();
        store.insert(new_category("second", &[])).await.unwrap();

        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn appends_messages_in_order() {
        let store = InMemoryCategoryStore::new();

        let created = store
            .insert(new_category("general", &["hi"]))
            .await
            .unwrap();

        let updated = store
            .find_and_append_message(
                "general",
                NewCategoryMessage {
                    text: "second".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        let texts: Vec<&str> = updated
            .messages
            .iter()
            .map(|message| message.text.as_str())
            .collect();

        assert_eq!(texts, vec!["hi", "second"]);
        assert_eq!(updated.messages[0], created.messages[0]);
        assert!(updated.last_modified_at >= created.last_modified_at);
    }

    #[tokio::test]
    async fn appending_to_missing_category_changes_nothing() {
        let store = InMemoryCategoryStore::new();
        store.insert(new_category("general", &[])).await.unwrap();

        let result = store
            .find_and_append_message(
                "missing",
                NewCategoryMessage {
                    text: "lost".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());

        let general = store.find_one_by_name("general").await.unwrap().unwrap();
        assert!(general.messages.is_empty());
        assert_eq!(store.number_of_categories(), 1);
    }

    #[tokio::test]
    async fn rejects_text_containing_nul_like_postgres() {
        let store = InMemoryCategoryStore::new();
        store.insert(new_category("general", &[])).await.unwrap();

        assert!(matches!(
            store.insert(new_category("has\0nul", &[])).await,
            Err(QueryError::SqlxError { .. })
        ));
        assert!(matches!(
            store
                .find_and_append_message(
                    "general",
                    NewCategoryMessage {
                        text: "a\0b".to_string(),
                    },
                )
                .await,
            Err(QueryError::SqlxError { .. })
        ));
        assert!(matches!(
            store.find_one_by_name("x\0").await,
            Err(QueryError::SqlxError { .. })
        ));

        let general = store.find_one_by_name("general").await.unwrap().unwrap();
        assert!(general.messages.is_empty());
        assert_eq!(store.number_of_categories(), 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = InMemoryCategoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.find_all().await,
            Err(QueryError::SqlxError { .. })
        ));
        assert!(matches!(
            store.exists_by_name("general").await,
            Err(QueryError::SqlxError { .. })
        ));

        store.set_unavailable(false);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
