use actix_http::{Method, StatusCode};
use rubrika_core::api_models::{
    Category,
    CategoryCreationRequest,
    CategoryCreationResponse,
    CategoryResponse,
};

use crate::TestServer;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleCategory {
    General,
    Announcements,
    Random,
}


impl SampleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            SampleCategory::General => "general",
            SampleCategory::Announcements => "announcements",
            SampleCategory::Random => "random",
        }
    }

    pub fn initial_messages(&self) -> &'static [&'static str] {
        match self {
            SampleCategory::General => &["hi"],
            SampleCategory::Announcements => &["welcome", "rules are pinned"],
            SampleCategory::Random => &[],
        }
    }
}


/// Creates the sample category through the API and returns it as stored.
pub async fn create_sample_category(server: &TestServer, category: SampleCategory) -> Category {
    let creation_response = server
        .request(Method::POST, "/add-Categories")
        .with_json_body(CategoryCreationRequest {
            category: Some(category.name().to_string()),
            messages: Some(
                category
                    .initial_messages()
                    .iter()
                    .map(|message| message.to_string())
                    .collect(),
            ),
        })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::CREATED);
    creation_response.assert_json_body_matches(CategoryCreationResponse {
        success: true,
        message: format!("{} category added.", category.name()),
    });


    let category_response = server
        .request(Method::GET, format!("/categories/{}", category.name()))
        .send()
        .await;

    category_response.assert_status_equals(StatusCode::OK);
    category_response.json_body::<CategoryResponse>().data
}
