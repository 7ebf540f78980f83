//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Error responses follow the Problem Details layout. The human-readable
//! explanation is serialized under `error`, so clients that only look for an
//! `{"error": "..."}` body keep working.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use hubfreight_lib::Error as LibError;

/// Problem type URI for invalid request payloads.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for products that no supply center stocks.
pub const PROBLEM_UNKNOWN_PRODUCT: &str = "/problems/unknown-product";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use hubfreight_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_PRODUCT};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_PRODUCT,
///     "Unknown Product",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("Product Z not found in any warehouse")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of the failing occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for an invalid order payload.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 400 Bad Request problem for a product stocked nowhere.
    pub fn unknown_product(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UNKNOWN_PRODUCT,
            "Unknown Product",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownProduct { .. } => {
            ProblemDetails::unknown_product(error.to_string(), request_id)
        }
        LibError::EmptyOrder
        | LibError::MalformedOrder
        | LibError::InvalidQuantity { .. }
        | LibError::Json(_) => ProblemDetails::bad_request(error.to_string(), request_id),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

/// Metric label describing why a quote failed.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownProduct { .. } => "unknown_product",
        LibError::EmptyOrder
        | LibError::MalformedOrder
        | LibError::InvalidQuantity { .. }
        | LibError::Json(_) => "validation_error",
        LibError::NoCandidatePath => "no_path",
        _ => "internal_error",
    }
}
