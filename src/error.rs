use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Machine-readable kind reported to callers.
    pub fn status(&self) -> &'static str {
        match self.code {
            101 => "invalid-argument",
            102 => "unauthenticated",
            _ => "internal",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            101 => (StatusCode::BAD_REQUEST, self.message.as_str()),
            102 => (StatusCode::UNAUTHORIZED, self.message.as_str()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        let body = Json(json!({
            "error": {
                "code": self.code,
                "status": self.status(),
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

pub fn invalid_argument_error(message: &str) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn unauthenticated_error() -> Error {
    Error {
        code: 102,
        message: "The function must be called while authenticated.".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!(error = ?err, "database error");

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn config_error(message: String) -> Error {
    Error { code: 3, message }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    tracing::error!(error = ?err, "server error");

    Error {
        code: 4,
        message: "server error".into(),
    }
}

#[test]
fn invalid_argument_response_test() {
    let response = invalid_argument_error("missing details").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn unauthenticated_response_test() {
    let err = unauthenticated_error();
    assert_eq!(err.status(), "unauthenticated");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn internal_errors_are_masked_test() {
    let err = database_error("connection refused");
    assert_eq!(err.status(), "internal");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn store_failure_is_internal_test() {
    let err = Error::from(sqlx::Error::RowNotFound);
    assert_eq!(err.code, 2);
    assert_eq!(err.status(), "internal");
}
