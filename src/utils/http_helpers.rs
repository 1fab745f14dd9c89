use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// A general purpose HTTP error type that can be converted into a response.
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    /// Logs an unexpected fault and converts it into the generic server-fault
    /// reply. Handlers use this so every call path ends in a definitive
    /// response, with the detail kept in the logs rather than the body.
    pub fn fault(operation: &str, detail: impl std::fmt::Display) -> Self {
        error!("Unhandled fault in {}: {}", operation, detail);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
