//! Provides ways of handling errors in API endpoint functions
//! and ways to have those errors automatically turned into correct
//! HTTP error responses when returned as `Err(error)` from those functions.
//!
//! Expected failures (a duplicate name, a missing category) are not errors in this sense:
//! endpoints build those responses directly with [`EndpointResponseBuilder`].

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use actix_http::header::{HeaderName, HeaderValue};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use rubrika_core::api_models::{
    ErrorReason,
    InvalidFieldProblem,
    InvalidJsonBodyReason,
    ResponseWithErrorReason,
};
use rubrika_database::QueryError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;



/// General-purpose endpoint error type.
///
/// Client errors (`4xx`) carry enough information to build an [`ErrorReason`] body.
/// Server errors (`5xx`) are logged when turned into a response and their details
/// never leave the server; the client only sees [`ErrorReason::InternalError`].
#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     */
    /// The endpoint expected a JSON body, but there was either:
    /// - no JSON body sent with the request,
    /// - or there was an incorrect `Content-Type` header (expected: `application/json`).
    MissingJsonBody,

    /// Invalid JSON body, either due to a deserialization error,
    /// or because the body is too large.
    InvalidJsonBody { reason: InvalidJsonBodyReason },

    /// A required field of an otherwise well-formed JSON body is missing, empty or unstorable.
    InvalidField {
        field: &'static str,
        problem: InvalidFieldProblem,
    },

    /*
     * Server errors.
     *
     * Reasons are not shown externally.
     */
    /// Internal error with a string reason.
    /// Triggers a `500 Internal Server Error` (**reason doesn't leak through the API**).
    InternalErrorWithReason { reason: Cow<'static, str> },

    /// Internal error, constructed from a boxed [`Error`](std::error::Error).
    InternalGenericError {
        #[source]
        error: Box<dyn std::error::Error>,
    },

    /// Internal error, constructed from a [`sqlx::Error`].
    /// Triggers a `500 Internal Server Error` (*doesn't leak the error through the API*).
    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    InvalidDatabaseState { problem: Cow<'static, str> },
}

impl EndpointError {
    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub const fn missing_field(field: &'static str) -> Self {
        Self::InvalidField {
            field,
            problem: InvalidFieldProblem::Missing,
        }
    }

    pub const fn empty_field(field: &'static str) -> Self {
        Self::InvalidField {
            field,
            problem: InvalidFieldProblem::Empty,
        }
    }

    pub const fn field_containing_nul(field: &'static str) -> Self {
        Self::InvalidField {
            field,
            problem: InvalidFieldProblem::ContainsNul,
        }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::InternalErrorWithReason { .. }
                | Self::InternalGenericError { .. }
                | Self::InternalDatabaseError { .. }
                | Self::InvalidDatabaseState { .. }
        )
    }

    /// The reason sent to the client along with this error.
    pub fn error_reason(&self) -> ErrorReason {
        match self {
            Self::MissingJsonBody => ErrorReason::missing_json_body(),
            Self::InvalidJsonBody { reason } => ErrorReason::invalid_json_body(*reason),
            Self::InvalidField { field, problem } => ErrorReason::invalid_field(*field, *problem),
            Self::InternalErrorWithReason { .. }
            | Self::InternalGenericError { .. }
            | Self::InternalDatabaseError { .. }
            | Self::InvalidDatabaseState { .. } => ErrorReason::internal_error(),
        }
    }
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJsonBody => {
                write!(f, "Expected a JSON body.")
            }
            Self::InvalidJsonBody { reason } => match reason {
                InvalidJsonBodyReason::NotJson => {
                    write!(f, "Invalid JSON body: not JSON.")
                }
                InvalidJsonBodyReason::InvalidData => {
                    write!(f, "Invalid JSON body: invalid data.")
                }
                InvalidJsonBodyReason::TooLarge => {
                    write!(f, "Invalid JSON body: too large.")
                }
            },
            Self::InvalidField { field, problem } => match problem {
                InvalidFieldProblem::Missing => write!(f, "Missing required field \"{field}\"."),
                InvalidFieldProblem::Empty => write!(f, "Field \"{field}\" must not be empty."),
                InvalidFieldProblem::ContainsNul => {
                    write!(f, "Field \"{field}\" must not contain NUL characters.")
                }
            },
            Self::InternalErrorWithReason { reason } => write!(
                f,
                "Internal server error (with reason): {reason}."
            ),
            Self::InternalGenericError { error } => {
                write!(f, "Internal server error (generic): {error:?}")
            }
            Self::InternalDatabaseError { error } => {
                write!(
                    f,
                    "Internal server error (database error): {error}."
                )
            }
            Self::InvalidDatabaseState { problem } => {
                write!(
                    f,
                    "Inconsistent internal database state: {}",
                    problem
                )
            }
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        if self.is_server_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if self.is_server_error() {
            error!(error = %self, "Endpoint failed with an internal error.");
        }

        let fallibly_built_response = EndpointResponseBuilder::new(self.status_code())
            .with_error_reason(self.error_reason())
            .build();

        fallibly_built_response.unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            // Endpoints check for duplicates themselves, so reaching this
            // means a concurrent insert won the race after the check.
            QueryError::DuplicateCategoryName { name } => Self::InternalErrorWithReason {
                reason: format!("unhandled duplicate category name: {name}").into(),
            },
            QueryError::DatabaseInconsistencyError { problem } => {
                Self::InvalidDatabaseState { problem }
            }
        }
    }
}

impl From<JsonPayloadError> for EndpointError {
    fn from(value: JsonPayloadError) -> Self {
        match value {
            JsonPayloadError::ContentType => Self::missing_json_body(),
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                Self::invalid_json_body(InvalidJsonBodyReason::TooLarge)
            }
            JsonPayloadError::Deserialize(error) if error.is_data() => {
                Self::invalid_json_body(InvalidJsonBodyReason::InvalidData)
            }
            // An empty body with a JSON content type.
            JsonPayloadError::Deserialize(error) if error.is_eof() && error.column() == 0 => {
                Self::missing_json_body()
            }
            _ => Self::invalid_json_body(InvalidJsonBodyReason::NotJson),
        }
    }
}



pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    additional_headers: Vec<(HeaderName, HeaderValue)>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            additional_headers: Vec::with_capacity(1),
        }
    }

    #[inline]
    pub fn created() -> Self {
        Self::new(StatusCode::CREATED)
    }

    #[inline]
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn with_json_body<D>(mut self, data: &D) -> Self
    where
        D: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data);

        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        ));

        Self {
            status_code: self.status_code,
            body: Some(body),
            additional_headers: self.additional_headers,
        }
    }

    /// Sets the body to a [`ResponseWithErrorReason`] containing the given reason.
    pub fn with_error_reason<R>(self, reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        self.with_json_body(&ResponseWithErrorReason::new(reason))
    }

    pub fn build(self) -> Result<HttpResponse<BoxBody>, EndpointError> {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        for (header_name, header_value) in self.additional_headers {
            response_builder.insert_header((header_name, header_value));
        }


        match optional_body {
            // Neither of these can fail, both body types have `type Error = Infallible`.
            Some(body) => response_builder
                .message_body(body.boxed())
                .map_err(EndpointError::internal_error),
            None => response_builder
                .message_body(().boxed())
                .map_err(EndpointError::internal_error),
        }
    }
}



/// Short for [`Result`]`<`[`HttpResponse`]`, `[`EndpointError`]`>`, intended to be used
/// by all endpoint handlers.
///
/// The generic parameter (`Body`) specifies which body type is used inside [`HttpResponse`]
/// and defaults to [`BoxBody`], which is what [`EndpointResponseBuilder`] produces.
pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;



#[cfg(test)]
mod test {
    use actix_web::body::to_bytes;
    use rubrika_core::api_models::CategoryErrorReason;

    use super::*;

    async fn response_body_as_json(response: HttpResponse<BoxBody>) -> serde_json::Value {
        let body_bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[actix_web::test]
    async fn database_errors_become_opaque_internal_server_errors() {
        let error = EndpointError::from(QueryError::SqlxError {
            error: sqlx::Error::PoolTimedOut,
        });

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_body_as_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"]["type"], "internal-error");
        assert!(!body.to_string().contains("timed out"));
    }

    #[actix_web::test]
    async fn invalid_field_becomes_bad_request_naming_the_field() {
        let response = EndpointError::empty_field("message").error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_body_as_json(response).await;
        assert_eq!(body["reason"]["type"], "invalid-field");
        assert_eq!(body["reason"]["data"]["field"], "message");
        assert_eq!(body["reason"]["data"]["problem"], "empty");
    }

    #[actix_web::test]
    async fn builder_sets_status_and_json_content_type() {
        let response = EndpointResponseBuilder::not_found()
            .with_error_reason(CategoryErrorReason::category_not_found())
            .build()
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = response_body_as_json(response).await;
        assert_eq!(body["error"], "category not found");
    }

    #[test]
    fn json_payload_errors_map_to_reasons() {
        assert!(matches!(
            EndpointError::from(JsonPayloadError::ContentType),
            EndpointError::MissingJsonBody
        ));

        let syntax_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        assert!(matches!(
            EndpointError::from(JsonPayloadError::Deserialize(syntax_error)),
            EndpointError::InvalidJsonBody {
                reason: InvalidJsonBodyReason::NotJson
            }
        ));

        let data_error = serde_json::from_str::<Vec<String>>("[1, 2]").unwrap_err();
        assert!(matches!(
            EndpointError::from(JsonPayloadError::Deserialize(data_error)),
            EndpointError::InvalidJsonBody {
                reason: InvalidJsonBodyReason::InvalidData
            }
        ));
    }
}
