use serde::{Deserialize, Serialize};
use utoipa::ToSchema;



/// An [`ErrorReason`]-related trait providing a quick static description for a given error reason.
pub trait ErrorReasonName {
    fn reason_description(&self) -> &'static str;
}



/// Pertains to all category-related endpoints.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, ToSchema)]
#[serde(tag = "category-error-type")]
#[non_exhaustive]
pub enum CategoryErrorReason {
    /// This error is returned when:
    /// - appending a message to a category that does not exist,
    /// - requesting a category by a name that does not exist.
    #[serde(rename = "category-not-found")]
    CategoryNotFound,

    /// This error is returned when attempting to create a category
    /// whose name is already taken by another category.
    #[serde(rename = "category-already-exists")]
    CategoryAlreadyExists,
}

impl CategoryErrorReason {
    pub const fn category_not_found() -> Self {
        Self::CategoryNotFound
    }

    pub const fn category_already_exists() -> Self {
        Self::CategoryAlreadyExists
    }
}

impl ErrorReasonName for CategoryErrorReason {
    fn reason_description(&self) -> &'static str {
        match self {
            Self::CategoryNotFound => "category not found",
            Self::CategoryAlreadyExists => "category already exists",
        }
    }
}



/// Reasons for a JSON body to not be accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidJsonBodyReason {
    /// Indicates that the provided JSON data was invalid,
    /// possibly due to an IO / syntax / EOF error while parsing.
    #[serde(rename = "not-json")]
    NotJson,

    /// Indicates that the provided JSON data was valid,
    /// but its data did not match the expected scheme / format
    /// (deserialization error, e.g. a number where a string was expected).
    #[serde(rename = "invalid-data")]
    InvalidData,

    /// Indicates that the provided JSON data was too large.
    #[serde(rename = "too-large")]
    TooLarge,
}


/// What is wrong with a required JSON body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidFieldProblem {
    /// The field is absent or `null`.
    #[serde(rename = "missing")]
    Missing,

    /// The field is present, but is an empty string
    /// (or, for lists, contains an empty string).
    #[serde(rename = "empty")]
    Empty,

    /// The field contains a NUL character (`U+0000`), which cannot be stored.
    #[serde(rename = "contains-nul")]
    ContainsNul,
}



#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, ToSchema)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum ErrorReason {
    /// Indicates that the request is missing a JSON body
    /// (or that the `Content-Type` is not `application/json`).
    #[serde(rename = "missing-json-body")]
    MissingJsonBody,

    /// Indicates that the request has an invalid JSON body (see [`InvalidJsonBodyReason`]).
    #[serde(rename = "invalid-json-body")]
    InvalidJsonBody {
        /// Describes why the JSON body is invalid.
        #[schema(value_type = String)]
        reason: InvalidJsonBodyReason,
    },

    /// Indicates that a required field of the JSON body is missing, empty,
    /// or contains characters that cannot be stored.
    #[serde(rename = "invalid-field")]
    InvalidField {
        /// Name of the offending field.
        field: String,

        #[schema(value_type = String)]
        problem: InvalidFieldProblem,
    },

    /// Pertains to all category-related endpoints.
    #[serde(rename = "category")]
    Category(CategoryErrorReason),

    /// Something went wrong on the server. Details are never exposed.
    #[serde(rename = "internal-error")]
    InternalError,
}

impl ErrorReason {
    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub fn invalid_field<F>(field: F, problem: InvalidFieldProblem) -> Self
    where
        F: Into<String>,
    {
        Self::InvalidField {
            field: field.into(),
            problem,
        }
    }

    pub const fn internal_error() -> Self {
        Self::InternalError
    }
}

impl ErrorReasonName for ErrorReason {
    fn reason_description(&self) -> &'static str {
        match self {
            Self::MissingJsonBody => "missing JSON body",
            Self::InvalidJsonBody { reason } => match reason {
                InvalidJsonBodyReason::NotJson => "invalid JSON body: not JSON",
                InvalidJsonBodyReason::InvalidData => "invalid JSON body: invalid data",
                InvalidJsonBodyReason::TooLarge => "invalid JSON body: too large",
            },
            Self::InvalidField { problem, .. } => match problem {
                InvalidFieldProblem::Missing => "required field is missing",
                InvalidFieldProblem::Empty => "required field is empty",
                InvalidFieldProblem::ContainsNul => "field contains a NUL character",
            },
            Self::Category(category_error_reason) => category_error_reason.reason_description(),
            Self::InternalError => "internal server error",
        }
    }
}

impl From<CategoryErrorReason> for ErrorReason {
    fn from(value: CategoryErrorReason) -> Self {
        Self::Category(value)
    }
}



/// JSON body of every error response.
///
/// `error` is a human-readable description, `reason` the strongly-typed
/// [`ErrorReason`] that clients should match on.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, ToSchema)]
pub struct ResponseWithErrorReason {
    /// Always `false`.
    pub success: bool,

    pub error: String,

    pub reason: ErrorReason,
}

impl ResponseWithErrorReason {
    pub fn new<R>(reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        let reason: ErrorReason = reason.into();

        Self {
            success: false,
            error: reason.reason_description().to_string(),
            reason,
        }
    }
}



#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_category_reason_as_nested_tag() {
        let response = ResponseWithErrorReason::new(CategoryErrorReason::category_already_exists());

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "error": "category already exists",
                "reason": {
                    "type": "category",
                    "data": {
                        "category-error-type": "category-already-exists"
                    }
                }
            })
        );
    }

    #[test]
    fn serializes_invalid_field_reason() {
        let reason = ErrorReason::invalid_field("category", InvalidFieldProblem::Missing);

        assert_eq!(
            serde_json::to_value(&reason).unwrap(),
            json!({
                "type": "invalid-field",
                "data": {
                    "field": "category",
                    "problem": "missing"
                }
            })
        );
    }
}
