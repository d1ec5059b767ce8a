//! Web-layer error handling for CORKBOARD.
//!
//! Every error surfaced to a client is a plain-text response; there is
//! no structured error body. Unexpected errors are logged server-side
//! and collapse to a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::BoardError;

/// Plain-text error response.
#[derive(Debug)]
pub struct WebError {
    status: StatusCode,
    message: String,
}

impl WebError {
    /// Create a new error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a forbidden error (403).
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a generic internal server error (500).
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
    }

    /// The HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The plain-text message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for WebError {}

impl From<BoardError> for WebError {
    fn from(err: BoardError) -> Self {
        match &err {
            BoardError::Validation(msg) => WebError::bad_request(msg.clone()),
            BoardError::Permission(msg) => WebError::forbidden(msg.clone()),
            BoardError::NotFound(_) => WebError::not_found(err.to_string()),
            _ => {
                tracing::error!("internal error: {err}");
                WebError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(WebError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(WebError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            WebError::internal().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(WebError::internal().message(), "Server Error");
    }

    #[test]
    fn test_from_board_error() {
        let err: WebError = BoardError::Validation("Title and content are required.".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Title and content are required.");

        let err: WebError = BoardError::Permission("not the author".into()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err: WebError = BoardError::NotFound("Post".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Post not found");

        let err: WebError = BoardError::Database("boom".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Server Error");
    }
}
