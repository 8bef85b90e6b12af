use actix_web::get;
use rubrika_core::api_models::PingResponse;

use crate::api::errors::EndpointResult;
use crate::api::macros::ContextlessResponder;
use crate::impl_json_responder;


impl_json_responder!(PingResponse);


/// Ping the server.
///
/// Does not touch the database, so it succeeds even while the database is unreachable.
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "health",
    responses(
        (
            status = 200,
            description = "Server is alive and well.",
            body = inline(PingResponse),
            example = json!({ "ok": true })
        )
    )
)]
#[get("/ping")]
pub async fn ping() -> EndpointResult {
    Ok(PingResponse { ok: true }.into_response())
}
