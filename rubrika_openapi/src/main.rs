use std::net::Ipv4Addr;
use std::path::Path;

use actix_web::{App, HttpServer};
use miette::Context;
use miette::IntoDiagnostic;
use miette::Result;
use rubrika::api::categories;
use rubrika::api::health;
use rubrika::logging::initialize_tracing;
use rubrika_core::api_models;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use utoipa::{openapi::OpenApi, OpenApi as OpenApiDerivable};
use utoipa_rapidoc::RapiDoc;


#[derive(OpenApiDerivable)]
#[openapi(
    paths(
        /***
         * Annotated paths are relative to `rubrika/src/api`.
         */

        // rubrika::api::health
        health::ping,

        // rubrika::api::categories
        categories::create_category,
        categories::append_message_to_category,
        categories::get_all_categories,
        categories::get_specific_category,
    ),
    components(
        schemas(
            // rubrika_core::api_models::error_reason
            api_models::ErrorReason,
            api_models::CategoryErrorReason,
            api_models::ResponseWithErrorReason,

            // rubrika_core::api_models::health
            api_models::PingResponse,

            // rubrika_core::ids
            rubrika_core::ids::CategoryId,
            rubrika_core::ids::MessageId,

            // rubrika_core::api_models::categories
            api_models::Message,
            api_models::Category,
            api_models::CategoryCreationRequest,
            api_models::CategoryCreationResponse,
            api_models::MessageAppendRequest,
            api_models::MessageAppendResponse,
            api_models::CategoriesResponse,
            api_models::CategoryResponse,
        ),
    ),
    tags(
        (name = "category", description = "Categories and their messages."),
        (name = "health", description = "Liveness probe."),
    ),
    info(
        title = "rubrika API",
        description = "Named categories of timestamped text messages.\n\n\
            Every error response has the form \
            `{ \"success\": false, \"error\": \"...\", \"reason\": { \"type\": \"...\", \"data\": ... } }`, \
            where `reason` is meant to be matched on by clients."
    ),
    servers(
        (
            url = "http://127.0.0.1:9000/",
            description = "Local development server"
        )
    )
)]
struct APIDocumentation;



fn remove_duplicated_summary_from_description(summary: &str, paragraph: &mut String) {
    if paragraph.starts_with(summary) {
        *paragraph = paragraph[summary.len()..].trim_start().to_string();
    }
}

/// Removes summary paragraphs duplicated at the start of operation descriptions.
fn clean_up_documentation(documentation: &mut OpenApi) {
    for path in documentation.paths.paths.values_mut() {
        for operation in path.operations.values_mut() {
            if let Some(operation_description) = operation.description.as_mut() {
                if let Some(operation_summary) = operation.summary.as_ref() {
                    remove_duplicated_summary_from_description(
                        operation_summary,
                        operation_description,
                    );
                }
            }
        }
    }
}


#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging and tracing.
    let guard = initialize_tracing(
        EnvFilter::builder().from_env_lossy(),
        EnvFilter::builder().from_env_lossy(),
        Path::new("./logs"),
        "rubrika-openapi.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    // Initialize compile-time generated OpenApi documentation.
    let mut open_api: OpenApi = APIDocumentation::openapi();
    clean_up_documentation(&mut open_api);

    // The interactive documentation page will be served at `/api-documentation`,
    // and the OpenAPI JSON file at `/api-documentation/openapi.json`.
    let server = HttpServer::new(move || {
        App::new().wrap(TracingLogger::default()).service(
            RapiDoc::with_openapi(
                "/api-documentation/openapi.json",
                open_api.clone(),
            )
            .path("/api-documentation"),
        )
    })
    .bind((Ipv4Addr::LOCALHOST, 8877))
    .into_diagnostic()
    .wrap_err("Failed to set up actix HTTP server.")?;

    info!("HTTP server initialized, running at http://127.0.0.1:8877/api-documentation.");

    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;

    drop(guard);
    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_every_endpoint() {
        let documentation = APIDocumentation::openapi();

        for path in [
            "/add-Categories",
            "/add-message",
            "/categories",
            "/categories/{category_name}",
            "/health/ping",
        ] {
            assert!(
                documentation.paths.paths.contains_key(path),
                "missing documentation for {path}"
            );
        }
    }

    #[test]
    fn operation_descriptions_do_not_repeat_their_summary() {
        let mut documentation = APIDocumentation::openapi();
        clean_up_documentation(&mut documentation);

        for path in documentation.paths.paths.values() {
            for operation in path.operations.values() {
                if let (Some(summary), Some(description)) =
                    (operation.summary.as_ref(), operation.description.as_ref())
                {
                    assert!(
                        !description.starts_with(summary.as_str()),
                        "description repeats summary \"{summary}\""
                    );
                }
            }
        }
    }
}
