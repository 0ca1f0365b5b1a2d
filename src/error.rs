use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Display};

pub const CONFIG_ERROR: i32 = 1;
pub const PERSISTENCE_ERROR: i32 = 2;
pub const UPSTREAM_ERROR: i32 = 3;
pub const SCHEMA_ERROR: i32 = 4;
pub const UNEXPECTED_ERROR: i32 = 5;
pub const VALIDATION_ERROR: i32 = 100;

/// Crate-wide error. Codes below 100 are server-side failures, 100 and above
/// are caller mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_validation(&self) -> bool {
        self.code >= VALIDATION_ERROR
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        persistence_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let message = if self.message.is_empty() {
            "Internal server error".to_owned()
        } else {
            self.message
        };

        let body = Json(json!({
            "code": self.code,
            "error": message,
        }));

        (status, body).into_response()
    }
}

pub fn validation_error(message: impl Into<String>) -> Error {
    Error {
        code: VALIDATION_ERROR,
        message: message.into(),
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error {
        code: CONFIG_ERROR,
        message: message.into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    config_error(format!("environment variable error: {}", err))
}

pub fn persistence_error<T: Display>(err: T) -> Error {
    Error {
        code: PERSISTENCE_ERROR,
        message: format!("database error: {}", err),
    }
}

pub fn schema_error<T: Display>(err: T) -> Error {
    Error {
        code: SCHEMA_ERROR,
        message: format!("schema bootstrap failed: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    upstream_error(format!("Failed to fetch places: {}", err))
}

pub fn upstream_error(message: impl Into<String>) -> Error {
    Error {
        code: UPSTREAM_ERROR,
        message: message.into(),
    }
}

pub fn unexpected_error(message: impl Into<String>) -> Error {
    Error {
        code: UNEXPECTED_ERROR,
        message: message.into(),
    }
}
