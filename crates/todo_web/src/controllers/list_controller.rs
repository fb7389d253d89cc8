use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use serde::Deserialize;
use todo_manager::{Flash, ListId, TodoError};

use super::{list_not_found, parse_id, redirect, redirect_with_flash, render};
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use crate::views;

pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_UPDATED: &str = "The list has been updated.";
pub const LIST_DELETED: &str = "The list has been deleted.";

#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

/// GET /
#[get("/")]
pub async fn index() -> HttpResponse {
    redirect("/lists")
}

/// GET /lists
#[get("/lists")]
pub async fn list_lists(
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state
        .with_session(session, |session| {
            let flash = session.take_flash();
            let page = views::lists_page(session.lists.lists(), flash.as_ref());
            Ok(render(StatusCode::OK, page))
        })
        .await
}

/// GET /lists/new
#[get("/lists/new")]
pub async fn new_list(session: CurrentSession, state: web::Data<AppState>) -> Result<HttpResponse> {
    state
        .with_session(session, |session| {
            let flash = session.take_flash();
            Ok(render(StatusCode::OK, views::new_list_page(flash.as_ref(), "")))
        })
        .await
}

/// POST /lists
/// Create a list, or re-render the form with the validation message
#[post("/lists")]
pub async fn create_list(
    session: CurrentSession,
    state: web::Data<AppState>,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state
        .with_session(session, |todo_session| {
            match todo_session.lists.create_list(&form.list_name) {
                Ok(list_id) => {
                    tracing::info!(session_id = %session.id(), list_id = %list_id, "List created");
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(LIST_CREATED),
                        "/lists",
                    ))
                }
                Err(TodoError::Validation(message)) => {
                    let page = views::new_list_page(Some(&Flash::error(message)), &form.list_name);
                    Ok(render(StatusCode::UNPROCESSABLE_ENTITY, page))
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
}

/// GET /lists/{id}
#[get("/lists/{id}")]
pub async fn show_list(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    state
        .with_session(session, |session| {
            let Some(list_id) = parse_id::<ListId>(&raw_id) else {
                return Ok(list_not_found(session));
            };
            let flash = session.take_flash();
            match session.lists.list(list_id) {
                Ok(list) => Ok(render(
                    StatusCode::OK,
                    views::list_page(list, flash.as_ref(), ""),
                )),
                Err(TodoError::ListNotFound(_)) => Ok(list_not_found(session)),
                Err(err) => Err(err.into()),
            }
        })
        .await
}

/// GET /lists/{id}/edit
#[get("/lists/{id}/edit")]
pub async fn edit_list(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    state
        .with_session(session, |session| {
            let Some(list_id) = parse_id::<ListId>(&raw_id) else {
                return Ok(list_not_found(session));
            };
            let flash = session.take_flash();
            match session.lists.list(list_id) {
                Ok(list) => Ok(render(
                    StatusCode::OK,
                    views::edit_list_page(list, flash.as_ref(), &list.name),
                )),
                Err(TodoError::ListNotFound(_)) => Ok(list_not_found(session)),
                Err(err) => Err(err.into()),
            }
        })
        .await
}

/// POST /lists/{id}
/// Rename a list
#[post("/lists/{id}")]
pub async fn update_list(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    let form = form.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_id) else {
                return Ok(list_not_found(todo_session));
            };
            match todo_session.lists.rename_list(list_id, &form.list_name) {
                Ok(()) => {
                    tracing::info!(session_id = %session.id(), list_id = %list_id, "List renamed");
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(LIST_UPDATED),
                        format!("/lists/{list_id}"),
                    ))
                }
                Err(TodoError::Validation(message)) => {
                    let list = todo_session.lists.list(list_id)?;
                    let page =
                        views::edit_list_page(list, Some(&Flash::error(message)), &form.list_name);
                    Ok(render(StatusCode::UNPROCESSABLE_ENTITY, page))
                }
                Err(TodoError::ListNotFound(_)) => Ok(list_not_found(todo_session)),
                Err(err) => Err(err.into()),
            }
        })
        .await
}

/// POST /lists/{id}/delete
#[post("/lists/{id}/delete")]
pub async fn delete_list(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_id) else {
                return Ok(list_not_found(todo_session));
            };
            match todo_session.lists.delete_list(list_id) {
                Ok(list) => {
                    tracing::info!(
                        session_id = %session.id(),
                        list_id = %list_id,
                        todos = list.todos_count(),
                        "List deleted"
                    );
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(LIST_DELETED),
                        "/lists",
                    ))
                }
                Err(TodoError::ListNotFound(_)) => Ok(list_not_found(todo_session)),
                Err(err) => Err(err.into()),
            }
        })
        .await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    // `/lists/new` must be registered ahead of `/lists/{id}`
    cfg.service(index)
        .service(list_lists)
        .service(new_list)
        .service(create_list)
        .service(show_list)
        .service(edit_list)
        .service(update_list)
        .service(delete_list);
}
