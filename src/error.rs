use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use semainier_shared::Error;
use serde::Serialize;

const GENERIC_MESSAGE: &str = "Impossible de traiter la requête.";

/// Error returned to API clients as a JSON envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "unauthorized",
            message: message.to_string(),
        }
    }

    pub fn validation(message: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "validation",
            message: message.to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: GENERIC_MESSAGE.to_string(),
        }
    }

    /// Replace the message when the error is a server-side failure.
    ///
    /// Domain errors (validation, conflict, not found) already carry the
    /// message the client should see; only opaque 5xx errors get the
    /// route-specific wording.
    pub fn fallback(mut self, message: &str) -> Self {
        if self.status.is_server_error() {
            self.message = message.to_string();
        }
        self
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code: "validation",
                message,
            },
            Error::Conflict(message) => Self {
                status: StatusCode::CONFLICT,
                code: "conflict",
                message,
            },
            Error::NotFound(message) => Self {
                status: StatusCode::NOT_FOUND,
                code: "not_found",
                message,
            },
            Error::Remote(message) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal",
                message,
            },
            err => {
                tracing::error!(error = %err, "Unhandled service error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "internal",
                    message: GENERIC_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
