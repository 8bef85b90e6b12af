//! HTTP API of the category service.
//!
//! All routes live at the root: the category endpoints
//! (`/add-Categories`, `/add-message`, `/categories`, `/categories/{name}`)
//! and the liveness probe under `/health`.

use actix_web::{error::InternalError, web, HttpRequest, Scope};

use self::errors::EndpointError;

pub mod categories;
pub mod errors;
pub mod health;
pub mod macros;
pub mod traits;



/// JSON extractor configuration shared by all endpoints.
///
/// Malformed or missing bodies are answered with the same
/// error body every other client error uses.
pub fn json_extractor_configuration() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _request: &HttpRequest| {
        let endpoint_error = EndpointError::from(error);
        let response = actix_web::ResponseError::error_response(&endpoint_error);

        InternalError::from_response(endpoint_error.to_string(), response).into()
    })
}


/// Router for the entire public API.
#[rustfmt::skip]
pub fn api_router() -> Scope {
    web::scope("")
        .app_data(json_extractor_configuration())
        .service(health::health_router())
        .configure(categories::configure_category_routes)
}
