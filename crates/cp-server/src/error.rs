//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cp_codec::CodecError;
use cp_core::CoreError;
use cp_session::SessionError;
use serde_json::json;

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    /// Individual validation problems, when there are several.
    pub issues: Vec<String>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, msg: impl Into<String>) -> Self {
        Self { status, code, message: msg.into(), issues: Vec::new() }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", msg)
    }
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", msg)
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", msg)
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        if !self.issues.is_empty() {
            body["error"]["issues"] = json!(self.issues);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::Validation { issues } => Self {
                issues: issues.iter().map(ToString::to_string).collect(),
                ..Self::new(StatusCode::BAD_REQUEST, "invalid_puzzle", err.to_string())
            },
            CoreError::PuzzleNotFound { .. } => ApiError::not_found(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(err: CodecError) -> Self {
        match &err {
            CodecError::InvalidBaseUrl(_) | CodecError::InvalidPuzzleId(_) => {
                ApiError::bad_request(err.to_string())
            }
            CodecError::Serialization(_) => ApiError::internal(err.to_string()),
            _ => ApiError::new(StatusCode::BAD_REQUEST, "invalid_link", err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match &err {
            SessionError::NotFound(_) => ApiError::not_found(err.to_string()),
            SessionError::Unplayable(_) | SessionError::UnknownTile(_) | SessionError::UnknownWord(_) => {
                ApiError::bad_request(err.to_string())
            }
            SessionError::TileSolved(_)
            | SessionError::SelectionFull { .. }
            | SessionError::IncompleteSelection { .. }
            | SessionError::AlreadyGuessed
            | SessionError::GameOver => ApiError::conflict(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(format!("{err:#}"))
    }
}
