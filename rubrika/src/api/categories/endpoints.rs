use actix_web::{get, post, web};
use rubrika_core::api_models::{
    CategoriesResponse,
    CategoryCreationRequest,
    CategoryCreationResponse,
    CategoryErrorReason,
    CategoryResponse,
    MessageAppendRequest,
    MessageAppendResponse,
    ResponseWithErrorReason,
};
use rubrika_database::{
    entities::{NewCategory, NewCategoryMessage},
    QueryError,
};
use tracing::{debug, info};

use crate::{
    api::{
        errors::{EndpointError, EndpointResponseBuilder, EndpointResult},
        macros::ContextlessResponder,
        traits::IntoApiModel,
    },
    impl_json_responder,
    state::ApplicationState,
};


impl_json_responder!(MessageAppendResponse);
impl_json_responder!(CategoriesResponse);
impl_json_responder!(CategoryResponse);



/// PostgreSQL `TEXT` cannot hold `U+0000`.
fn contains_nul(value: &str) -> bool {
    value.contains('\0')
}

/// Checks that a string can be stored as a category name or message text.
fn ensure_storable_text(value: &str, field_name: &'static str) -> Result<(), EndpointError> {
    if value.is_empty() {
        Err(EndpointError::empty_field(field_name))
    } else if contains_nul(value) {
        Err(EndpointError::field_containing_nul(field_name))
    } else {
        Ok(())
    }
}

/// Unwraps a required string field, rejecting it if absent, empty or unstorable.
fn require_storable_field(
    value: Option<String>,
    field_name: &'static str,
) -> Result<String, EndpointError> {
    let value = value.ok_or(EndpointError::missing_field(field_name))?;
    ensure_storable_text(&value, field_name)?;

    Ok(value)
}

fn category_already_exists_response() -> EndpointResult {
    EndpointResponseBuilder::bad_request()
        .with_error_reason(CategoryErrorReason::category_already_exists())
        .build()
}

fn category_not_found_response() -> EndpointResult {
    EndpointResponseBuilder::not_found()
        .with_error_reason(CategoryErrorReason::category_not_found())
        .build()
}



/// Create a new category
///
/// Creates a category with the given name, optionally pre-populated with messages
/// (stored in the given order). Category names are unique.
#[utoipa::path(
    post,
    path = "/add-Categories",
    tag = "category",
    request_body(
        content = CategoryCreationRequest
    ),
    responses(
        (
            status = 201,
            description = "The category has been created.",
            body = CategoryCreationResponse,
        ),
        (
            status = 400,
            description = "The request body is invalid, or a category with the given name already exists.",
            body = ResponseWithErrorReason,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ResponseWithErrorReason,
        ),
    )
)]
#[post("/add-Categories")]
pub async fn create_category(
    state: ApplicationState,
    request_body: web::Json<CategoryCreationRequest>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    let category_name = require_storable_field(request_body.category, "category")?;

    let messages = request_body.messages.unwrap_or_default();
    for message in &messages {
        ensure_storable_text(message, "messages")?;
    }


    let category_store = state.category_store();

    if category_store.exists_by_name(&category_name).await? {
        debug!(
            category_name = category_name.as_str(),
            "Refusing to create a category with a duplicate name."
        );

        return category_already_exists_response();
    }


    let insertion_result = category_store
        .insert(NewCategory {
            name: category_name,
            messages: messages
                .into_iter()
                .map(|text| NewCategoryMessage { text })
                .collect(),
        })
        .await;

    let created_category = match insertion_result {
        Ok(category) => category,
        Err(QueryError::DuplicateCategoryName { name }) => {
            debug!(
                category_name = name.as_str(),
                "Category with the same name was created concurrently."
            );

            return category_already_exists_response();
        }
        Err(error) => return Err(error.into()),
    };

    info!(
        category_id = %created_category.id,
        category_name = created_category.name.as_str(),
        number_of_messages = created_category.messages.len(),
        "Created new category."
    );


    EndpointResponseBuilder::created()
        .with_json_body(&CategoryCreationResponse {
            success: true,
            message: format!("{} category added.", created_category.name),
        })
        .build()
}



/// Append a message to a category
///
/// Appends a new message to the end of the category with the given name
/// and returns the updated category.
#[utoipa::path(
    post,
    path = "/add-message",
    tag = "category",
    request_body(
        content = MessageAppendRequest
    ),
    responses(
        (
            status = 200,
            description = "The message has been appended.",
            body = MessageAppendResponse,
        ),
        (
            status = 400,
            description = "The request body is invalid.",
            body = ResponseWithErrorReason,
        ),
        (
            status = 404,
            description = "No category with the given name exists.",
            body = ResponseWithErrorReason,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ResponseWithErrorReason,
        ),
    )
)]
#[post("/add-message")]
pub async fn append_message_to_category(
    state: ApplicationState,
    request_body: web::Json<MessageAppendRequest>,
) -> EndpointResult {
    let request_body = request_body.into_inner();

    let category_name = require_storable_field(request_body.category, "category")?;
    let message_text = require_storable_field(request_body.message, "message")?;


    let updated_category = state
        .category_store()
        .find_and_append_message(
            &category_name,
            NewCategoryMessage { text: message_text },
        )
        .await?;

    let Some(updated_category) = updated_category else {
        debug!(
            category_name = category_name.as_str(),
            "Cannot append message, category does not exist."
        );

        return category_not_found_response();
    };


    Ok(MessageAppendResponse {
        success: true,
        message: "Message added".to_string(),
        data: updated_category.into_api_model(),
    }
    .into_response())
}



/// List all categories
///
/// Returns every category along with its messages, most recently created first.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "category",
    responses(
        (
            status = 200,
            description = "All categories.",
            body = CategoriesResponse,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ResponseWithErrorReason,
        ),
    )
)]
#[get("/categories")]
pub async fn get_all_categories(state: ApplicationState) -> EndpointResult {
    let categories = state.category_store().find_all().await?;

    Ok(CategoriesResponse {
        success: true,
        data: categories
            .into_iter()
            .map(IntoApiModel::into_api_model)
            .collect(),
    }
    .into_response())
}



/// Get a specific category
///
/// Looks up a category by its exact name.
#[utoipa::path(
    get,
    path = "/categories/{category_name}",
    tag = "category",
    params(
        ("category_name" = String, Path, description = "Exact name of the category.")
    ),
    responses(
        (
            status = 200,
            description = "The requested category.",
            body = CategoryResponse,
        ),
        (
            status = 404,
            description = "No category with the given name exists.",
            body = ResponseWithErrorReason,
        ),
        (
            status = 500,
            description = "Internal server error.",
            body = ResponseWithErrorReason,
        ),
    )
)]
#[get("/categories/{category_name}")]
pub async fn get_specific_category(
    state: ApplicationState,
    parameters: web::Path<(String,)>,
) -> EndpointResult {
    let (category_name,) = parameters.into_inner();

    // No stored name can contain NUL, so there is nothing to look up.
    if contains_nul(&category_name) {
        return category_not_found_response();
    }

    let Some(category) = state
        .category_store()
        .find_one_by_name(&category_name)
        .await?
    else {
        return category_not_found_response();
    };


    Ok(CategoryResponse {
        success: true,
        data: category.into_api_model(),
    }
    .into_response())
}
