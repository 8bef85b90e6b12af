pub use actix_http::{header, Method, StatusCode};
pub use rubrika_core::api_models::*;

pub use super::response::TestResponse;
pub use super::sample_categories::*;
pub use super::server::{initialize_test_server, TestServer};
