use actix_web::{web, HttpServer};
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use rubrika::api::api_router;
use rubrika::logging::initialize_tracing;
use rubrika::state::ApplicationStateInner;
use rubrika_configuration::Configuration;
use tracing::info;

mod cli;

use crate::cli::CLIArgs;



#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Environment variables from `.env` (if present) act as configuration overrides.
    let dotenv_file_path = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(error) if error.not_found() => None,
        Err(error) => {
            return Err(error)
                .into_diagnostic()
                .wrap_err("Failed to load the .env file.")
        }
    };

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration.")?;


    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "rubrika.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = ?configuration.configuration_file_path,
        dotenv_file_path = ?dotenv_file_path,
        "Configuration loaded."
    );


    let state = web::Data::new(
        ApplicationStateInner::new(&configuration)
            .await
            .into_diagnostic()
            .wrap_err("Failed to set up application state.")?,
    );


    // Initialize and start the actix HTTP server.
    #[rustfmt::skip]
    let server = HttpServer::new(move || {
        let cors = actix_cors::Cors::permissive().expose_headers(vec![
            "Date",
            "Content-Type",
            "Content-Length",
        ]);

        actix_web::App::new()
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(state.clone())
            .service(api_router())
    })
        .bind((
            configuration.http.host.as_str(),
            configuration.http.port,
        ))
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
