use std::sync::Arc;

use actix_http::{header, Method};
use actix_web::{middleware::NormalizePath, test, App};
use rubrika::{
    api::api_router,
    state::{ApplicationState, ApplicationStateInner},
};
use rubrika_database::InMemoryCategoryStore;
use serde::Serialize;

use crate::TestResponse;


/// The full API router backed by an [`InMemoryCategoryStore`], driven in-process.
///
/// Every request is served by a freshly initialized app that shares
/// the same store, so state carries over between requests.
pub struct TestServer {
    store: InMemoryCategoryStore,

    state: ApplicationState,
}

impl TestServer {
    pub fn new() -> Self {
        let store = InMemoryCategoryStore::new();
        let state = ApplicationState::new(ApplicationStateInner::from_store(Arc::new(
            store.clone(),
        )));

        Self { store, state }
    }

    /// Direct access to the underlying store, e.g. to simulate a lost database connection.
    pub fn store(&self) -> &InMemoryCategoryStore {
        &self.store
    }

    pub fn request<U>(&self, method: Method, endpoint: U) -> TestRequestBuilder<'_>
    where
        U: AsRef<str>,
    {
        TestRequestBuilder {
            server: self,
            request: test::TestRequest::default()
                .method(method)
                .uri(endpoint.as_ref()),
        }
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}


pub struct TestRequestBuilder<'s> {
    server: &'s TestServer,

    request: test::TestRequest,
}

impl<'s> TestRequestBuilder<'s> {
    pub fn with_json_body<V>(self, value: V) -> Self
    where
        V: Serialize,
    {
        let serialized_body = serde_json::to_vec(&value).expect("failed to serialize value to JSON");

        self.with_raw_body("application/json", serialized_body)
    }

    /// Sends the given bytes as-is, e.g. to test malformed JSON.
    pub fn with_raw_body<B>(mut self, content_type: &'static str, body: B) -> Self
    where
        B: Into<bytes::Bytes>,
    {
        self.request = self
            .request
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body.into());

        self
    }

    pub async fn send(self) -> TestResponse {
        let app = test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(self.server.state.clone())
                .service(api_router()),
        )
        .await;

        let response = test::call_service(&app, self.request.to_request()).await;

        TestResponse::from_service_response(response).await
    }
}


pub fn initialize_test_server() -> TestServer {
    TestServer::new()
}
