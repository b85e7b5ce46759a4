use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Notification dispatch failed: {0}")]
    Dispatch(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            // Uniform denial: the body never describes the target record.
            Error::Forbidden => (StatusCode::FORBIDDEN, "forbidden".to_string()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::InvalidState(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::InvalidDate(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Error::Dispatch(msg) => (StatusCode::BAD_GATEWAY, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Reqwest(err) => (
                StatusCode::BAD_GATEWAY,
                format!("External service error: {}", err),
            ),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Xlsx(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Export error: {}", err),
            ),
            Error::Anyhow(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db) => {
                // 23505 = unique_violation; surfaced as a user-facing message
                // instead of a raw storage error.
                if db.code().as_deref() == Some("23505") {
                    Error::Conflict(conflict_message(db.constraint()))
                } else {
                    Error::Database(sqlx::Error::Database(db))
                }
            }
            other => Error::Database(other),
        }
    }
}

pub fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("candidates_email_key") => {
            "A candidate with this email address already exists".to_string()
        }
        Some("users_username_key") => "A user with this username already exists".to_string(),
        Some("skills_name_key") => "A skill with this name already exists".to_string(),
        Some("applications_candidate_vacancy_key") => {
            "This candidate is already attached to this vacancy".to_string()
        }
        _ => "A record with these values already exists".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_messages_are_user_facing() {
        assert!(conflict_message(Some("candidates_email_key")).contains("email"));
        assert!(conflict_message(Some("users_username_key")).contains("username"));
        assert!(conflict_message(Some("skills_name_key")).contains("skill"));
        assert!(conflict_message(Some("applications_candidate_vacancy_key")).contains("vacancy"));
        // Unknown constraints still get a generic message, not a raw error.
        assert_eq!(
            conflict_message(Some("something_else")),
            "A record with these values already exists"
        );
        assert_eq!(
            conflict_message(None),
            "A record with these values already exists"
        );
    }
}
