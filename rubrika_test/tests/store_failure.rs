use rubrika_test_util::prelude::*;
use serde_json::json;



#[actix_web::test]
async fn store_failures_surface_as_internal_server_errors() {
    let server = initialize_test_server();

    create_sample_category(&server, SampleCategory::General).await;

    server.store().set_unavailable(true);


    let requests = [
        server
            .request(Method::POST, "/add-Categories")
            .with_json_body(json!({ "category": "announcements" })),
        server
            .request(Method::POST, "/add-message")
            .with_json_body(json!({ "category": "general", "message": "hello" })),
        server.request(Method::GET, "/categories"),
        server.request(Method::GET, "/categories/general"),
    ];

    for request in requests {
        let response = request.send().await;

        response.assert_status_equals(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_error_reason_equals(ErrorReason::internal_error());
    }


    // The liveness probe does not depend on the store.
    server
        .request(Method::GET, "/health/ping")
        .send()
        .await
        .assert_status_equals(StatusCode::OK);


    // Once the store is back, nothing has changed.
    server.store().set_unavailable(false);

    let list_response = server.request(Method::GET, "/categories").send().await;
    list_response.assert_status_equals(StatusCode::OK);

    let categories = list_response.json_body::<CategoriesResponse>().data;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].messages.len(), 1);
}
