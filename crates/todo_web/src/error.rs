use actix_web::{http::header::ContentType, http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use todo_manager::TodoError;

use crate::views;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No session attached to the request")]
    MissingSession,

    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error("Page not found")]
    NotFound,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingSession => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Todo(TodoError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Todo(TodoError::ListNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Todo(TodoError::TodoNotFound(_)) => StatusCode::NOT_FOUND,
            // Expired or evicted between the middleware and the handler
            AppError::Todo(TodoError::SessionNotFound(_)) => StatusCode::GONE,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status_code, "Request rejected");
        }

        HttpResponse::build(status_code)
            .content_type(ContentType::html())
            .body(views::error_page(status_code, &self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_manager::{ListId, SessionId};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Todo(TodoError::ListNotFound(ListId::new())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Todo(TodoError::SessionNotFound(SessionId::new())).status_code(),
            StatusCode::GONE
        );
        assert_eq!(
            AppError::MissingSession.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_is_html() {
        let response = AppError::NotFound.error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
