//! Tests for [`PostgresCategoryStore`] against a real PostgreSQL database.
//!
//! Run with `RUBRIKA_TEST_DATABASE_URL=postgres://... cargo test -p rubrika_database -- --ignored`.
//! Every test uses its own category names, so they can share one database.

use rubrika_database::{
    entities::{CategoryModel, NewCategory, NewCategoryMessage},
    CategoryStore,
    PostgresCategoryStore,
    QueryError,
};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;


const TEST_DATABASE_URL_ENV_VAR_NAME: &str = "RUBRIKA_TEST_DATABASE_URL";

/// Concurrent `CREATE TABLE IF NOT EXISTS` statements can conflict,
/// so the first bootstrap runs before any test touches the tables.
static SCHEMA_BOOTSTRAPPED: OnceCell<()> = OnceCell::const_new();


async fn prepare_test_store() -> PostgresCategoryStore {
    let database_url = std::env::var(TEST_DATABASE_URL_ENV_VAR_NAME).unwrap_or_else(|_| {
        panic!(
            "Unexpected test environment! Expected a {} environment variable, found none (or invalid unicode).",
            TEST_DATABASE_URL_ENV_VAR_NAME
        )
    });

    let connection_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("failed to connect to the test database");

    let store = PostgresCategoryStore::new(connection_pool);

    SCHEMA_BOOTSTRAPPED
        .get_or_init(|| async {
            store
                .initialize_schema()
                .await
                .expect("failed to bootstrap the test database schema");
        })
        .await;

    store
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::now_v7())
}

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

fn message_texts(category: &CategoryModel) -> Vec<&str> {
    category
        .messages
        .iter()
        .map(|message| message.text.as_str())
        .collect()
}



#[tokio::test]
#[ignore = "requires a PostgreSQL database (RUBRIKA_TEST_DATABASE_URL)"]
async fn created_and_appended_messages_are_read_back_in_order() {
    let store = prepare_test_store().await;
    let name = unique_name("general");


    let created = store
        .insert(new_category(&name, &["hi", "there"]))
        .await
        .unwrap();

    assert_eq!(created.name, name);
    assert_eq!(message_texts(&created), vec!["hi", "there"]);


    let updated = store
        .find_and_append_message(
            &name,
            NewCategoryMessage {
                text: "second".to_string(),
            },
        )
        .await
        .unwrap()
        .expect("category should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(message_texts(&updated), vec!["hi", "there", "second"]);
    assert_eq!(updated.messages[0].id, created.messages[0].id);
    assert!(updated.last_modified_at >= created.last_modified_at);


    let fetched = store
        .find_one_by_name(&name)
        .await
        .unwrap()
        .expect("category should exist");

    assert_eq!(fetched.id, created.id);
    assert_eq!(message_texts(&fetched), vec!["hi", "there", "second"]);
    assert!(store.exists_by_name(&name).await.unwrap());
}


#[tokio::test]
#[ignore = "requires a PostgreSQL database (RUBRIKA_TEST_DATABASE_URL)"]
async fn appending_to_missing_category_changes_nothing() {
    let store = prepare_test_store().await;
    let existing_name = unique_name("existing");
    let missing_name = unique_name("missing");

    store
        .insert(new_category(&existing_name, &["hi"]))
        .await
        .unwrap();


    let append_result = store
        .find_and_append_message(
            &missing_name,
            NewCategoryMessage {
                text: "lost".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(append_result.is_none());
    assert!(!store.exists_by_name(&missing_name).await.unwrap());
    assert!(store.find_one_by_name(&missing_name).await.unwrap().is_none());

    let existing = store
        .find_one_by_name(&existing_name)
        .await
        .unwrap()
        .expect("category should exist");
    assert_eq!(message_texts(&existing), vec!["hi"]);
}


#[tokio::test]
#[ignore = "requires a PostgreSQL database (RUBRIKA_TEST_DATABASE_URL)"]
async fn lists_newer_categories_first_with_their_messages() {
    let store = prepare_test_store().await;
    let older_name = unique_name("older");
    let newer_name = unique_name("newer");

    store
        .insert(new_category(&older_name, &["one", "two", "three"]))
        .await
        .unwrap();
    store.insert(new_category(&newer_name, &[])).await.unwrap();


    let all_categories = store.find_all().await.unwrap();

    let position_of = |name: &str| {
        all_categories
            .iter()
            .position(|category| category.name == name)
            .expect("category should be listed")
    };

    let older_position = position_of(&older_name);
    let newer_position = position_of(&newer_name);
    assert!(newer_position < older_position);

    assert!(all_categories[newer_position].messages.is_empty());
    assert_eq!(
        message_texts(&all_categories[older_position]),
        vec!["one", "two", "three"]
    );
}


#[tokio::test]
#[ignore = "requires a PostgreSQL database (RUBRIKA_TEST_DATABASE_URL)"]
async fn duplicate_name_is_reported_and_not_stored() {
    let store = prepare_test_store().await;
    let name = unique_name("general");

    let original = store.insert(new_category(&name, &[])).await.unwrap();


    let duplicate_result = store.insert(new_category(&name, &["hi"])).await;
    assert!(matches!(
        duplicate_result,
        Err(QueryError::DuplicateCategoryName { name: duplicate_name }) if duplicate_name == name
    ));


    let stored = store
        .find_one_by_name(&name)
        .await
        .unwrap()
        .expect("category should exist");
    assert_eq!(stored.id, original.id);
    assert!(stored.messages.is_empty());
}


#[tokio::test]
#[ignore = "requires a PostgreSQL database (RUBRIKA_TEST_DATABASE_URL)"]
async fn schema_initialization_is_idempotent() {
    let store = prepare_test_store().await;

    store.initialize_schema().await.unwrap();
    store.initialize_schema().await.unwrap();

    // A second store runs the bootstrap again against existing tables.
    let other_store = prepare_test_store().await;
    other_store.initialize_schema().await.unwrap();
    other_store.find_all().await.unwrap();
}
