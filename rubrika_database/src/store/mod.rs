//! The [`CategoryStore`] abstraction the HTTP layer talks to.

use async_trait::async_trait;

use crate::{
    entities::{CategoryModel, NewCategory, NewCategoryMessage},
    QueryResult,
};

#[cfg(any(test, feature = "in_memory_store"))]
mod memory;
mod postgres;

#[cfg(any(test, feature = "in_memory_store"))]
pub use memory::InMemoryCategoryStore;
pub use postgres::PostgresCategoryStore;



/// Persistence of categories and their messages.
///
/// Every method is a single logical operation; implementations must make
/// [`insert`](CategoryStore::insert) and
/// [`find_and_append_message`](CategoryStore::find_and_append_message) atomic.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_one_by_name(&self, category_name: &str) -> QueryResult<Option<CategoryModel>>;

    /// All categories, newest first.
    async fn find_all(&self) -> QueryResult<Vec<CategoryModel>>;

    async fn exists_by_name(&self, category_name: &str) -> QueryResult<bool>;

    /// Fails with [`QueryError::DuplicateCategoryName`](crate::QueryError::DuplicateCategoryName)
    /// if the name is already taken.
    async fn insert(&self, new_category: NewCategory) -> QueryResult<CategoryModel>;

    /// Appends a message and returns the updated category,
    /// or `None` (leaving the store unchanged) if no category has that name.
    async fn find_and_append_message(
        &self,
        category_name: &str,
        new_message: NewCategoryMessage,
    ) -> QueryResult<Option<CategoryModel>>;
}
