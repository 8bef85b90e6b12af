use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{CategoryId, MessageId};



/// A single message inside a category.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,

    pub text: String,

    pub created_at: DateTime<Utc>,
}


/// A named category with its messages, oldest message first.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    pub messages: Vec<Message>,

    pub created_at: DateTime<Utc>,

    /// Refreshed every time a message is appended.
    pub updated_at: DateTime<Utc>,
}



/// Request body of `POST /add-Categories`.
///
/// Both fields are optional at the deserialization level so that the endpoint
/// can respond with a precise reason when `category` is missing.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug, Default, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "category": "general",
        "messages": ["hi"]
    })
)]
pub struct CategoryCreationRequest {
    /// Name of the new category.
    #[cfg_attr(
        feature = "serde_impls_for_client_on_models",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<String>,

    /// Messages to pre-populate the category with, in order.
    #[cfg_attr(
        feature = "serde_impls_for_client_on_models",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub messages: Option<Vec<String>>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
#[schema(
    example = json!({
        "success": true,
        "message": "general category added."
    })
)]
pub struct CategoryCreationResponse {
    pub success: bool,

    pub message: String,
}



/// Request body of `POST /add-message`.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug, Default, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "category": "general",
        "message": "second"
    })
)]
pub struct MessageAppendRequest {
    /// Name of the category to append to.
    #[cfg_attr(
        feature = "serde_impls_for_client_on_models",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<String>,

    /// Text of the new message.
    #[cfg_attr(
        feature = "serde_impls_for_client_on_models",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct MessageAppendResponse {
    pub success: bool,

    pub message: String,

    /// The category after the message has been appended.
    pub data: Category,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoriesResponse {
    pub success: bool,

    /// Most recently created category first.
    pub data: Vec<Category>,
}



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct CategoryResponse {
    pub success: bool,

    pub data: Category,
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn category_serializes_with_camel_case_timestamps() {
        let created_at = DateTime::parse_from_rfc3339("2024-07-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let category = Category {
            id: CategoryId::generate(),
            name: "general".to_string(),
            messages: vec![Message {
                id: MessageId::generate(),
                text: "hi".to_string(),
                created_at,
            }],
            created_at,
            updated_at: created_at,
        };

        let serialized = serde_json::to_value(&category).unwrap();

        assert_eq!(serialized["name"], "general");
        assert_eq!(serialized["messages"][0]["text"], "hi");
        assert!(serialized["messages"][0].get("createdAt").is_some());
        assert!(serialized.get("createdAt").is_some());
        assert!(serialized.get("updatedAt").is_some());
        assert!(serialized.get("created_at").is_none());
    }

    #[test]
    fn creation_request_tolerates_missing_fields() {
        let request: CategoryCreationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, CategoryCreationRequest::default());

        let request: CategoryCreationRequest =
            serde_json::from_str(r#"{ "category": "general", "messages": null }"#).unwrap();
        assert_eq!(request.category.as_deref(), Some("general"));
        assert_eq!(request.messages, None);
    }

    #[test]
    fn creation_request_rejects_non_string_category() {
        assert!(serde_json::from_str::<CategoryCreationRequest>(r#"{ "category": 42 }"#).is_err());
        assert!(
            serde_json::from_str::<CategoryCreationRequest>(r#"{ "messages": [1, 2] }"#).is_err()
        );
    }
}
