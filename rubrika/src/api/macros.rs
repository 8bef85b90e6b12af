use actix_web::body::MessageBody;
use actix_web::HttpResponse;

/// Simple responder trait (similar to [`actix_web::Responder`]).
///
/// The main difference is that our `into_response` method does not require
/// a reference to [`HttpRequest`][actix_web::HttpRequest],
/// i.e. the response must be built without a request when using this trait.
///
/// See documentation for [`impl_json_responder`][crate::impl_json_responder].
pub trait ContextlessResponder {
    type Body: MessageBody + 'static;

    /// Serializes `self` as JSON and return a `HTTP 200 OK` response
    /// with a JSON-encoded body.
    fn into_response(self) -> HttpResponse<Self::Body>;
}

/// Implements [`ContextlessResponder`] for the given type, which must already
/// implement [`Serialize`][serde::Serialize].
///
/// Response models live in `rubrika_core`, so [`actix_web::Responder`] cannot be
/// implemented for them here. This gives endpoints an equally short way of turning
/// them into a `200 OK` JSON response.
///
///
/// # Example
/// ```
/// use actix_web::get;
/// use serde::Serialize;
/// use rubrika::impl_json_responder;
/// use rubrika::api::errors::EndpointResult;
/// use rubrika::api::macros::ContextlessResponder;
///
/// #[derive(Serialize)]
/// struct SomeResponse {
///     value: i32,
/// }
///
/// impl_json_responder!(SomeResponse);
///
///
/// #[get("/some/path")]
/// async fn example_handler() -> EndpointResult {
///     Ok(SomeResponse { value: 42 }.into_response())
/// }
/// ```
#[macro_export]
macro_rules! impl_json_responder {
    ($struct:ty) => {
        impl $crate::api::macros::ContextlessResponder for $struct {
            type Body = actix_web::body::BoxBody;

            fn into_response(self) -> actix_web::HttpResponse<Self::Body> {
                actix_web::HttpResponse::Ok().json(&self)
            }
        }
    };
}
