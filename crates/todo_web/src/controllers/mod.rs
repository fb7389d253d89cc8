pub mod list_controller;
pub mod todo_controller;

use actix_web::{
    http::{header, header::ContentType, StatusCode},
    HttpResponse,
};
use std::str::FromStr;
use todo_manager::{Flash, ListId, TodoError, TodoSession};

use crate::error::{AppError, Result};

pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const TODO_NOT_FOUND: &str = "The specified todo was not found.";

pub(crate) fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

pub(crate) fn render(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// Malformed ids are treated the same as ids that no longer exist.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

pub(crate) fn redirect_with_flash(
    session: &mut TodoSession,
    flash: Flash,
    location: impl Into<String>,
) -> HttpResponse {
    session.set_flash(flash);
    redirect(location)
}

pub(crate) fn list_not_found(session: &mut TodoSession) -> HttpResponse {
    redirect_with_flash(session, Flash::error(LIST_NOT_FOUND), "/lists")
}

pub(crate) fn todo_not_found(session: &mut TodoSession, list_id: ListId) -> HttpResponse {
    redirect_with_flash(
        session,
        Flash::error(TODO_NOT_FOUND),
        format!("/lists/{list_id}"),
    )
}

/// Turn a lookup failure into the matching not-found redirect.
pub(crate) fn recover_not_found(
    session: &mut TodoSession,
    list_id: ListId,
    err: TodoError,
) -> Result<HttpResponse> {
    match err {
        TodoError::ListNotFound(_) => Ok(list_not_found(session)),
        TodoError::TodoNotFound(_) => Ok(todo_not_found(session, list_id)),
        other => Err(other.into()),
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> Result<HttpResponse> {
    Err(AppError::NotFound)
}
