use actix_web::{http::StatusCode, post, web, HttpResponse};
use serde::Deserialize;
use todo_manager::{Flash, ListId, TodoError, TodoId};

use super::{list_not_found, parse_id, recover_not_found, redirect_with_flash, render, todo_not_found};
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use crate::views;

pub const TODO_ADDED: &str = "The todo was added.";
pub const TODO_DELETED: &str = "The todo has been deleted.";
pub const TODO_UPDATED: &str = "The todo has been updated.";
pub const ALL_TODOS_UPDATED: &str = "All todos have been updated.";

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// POST /lists/{list_id}/todos
/// Add a todo, or re-render the list page with the validation message
#[post("/lists/{list_id}/todos")]
pub async fn add_todo(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
    form: web::Form<TodoForm>,
) -> Result<HttpResponse> {
    let raw_list_id = path.into_inner();
    let form = form.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_list_id) else {
                return Ok(list_not_found(todo_session));
            };
            match todo_session.lists.add_todo(list_id, &form.todo) {
                Ok(todo_id) => {
                    tracing::info!(
                        session_id = %session.id(),
                        list_id = %list_id,
                        todo_id = %todo_id,
                        "Todo added"
                    );
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(TODO_ADDED),
                        format!("/lists/{list_id}"),
                    ))
                }
                Err(TodoError::Validation(message)) => {
                    let list = todo_session.lists.list(list_id)?;
                    let page = views::list_page(list, Some(&Flash::error(message)), &form.todo);
                    Ok(render(StatusCode::UNPROCESSABLE_ENTITY, page))
                }
                Err(err) => recover_not_found(todo_session, list_id, err),
            }
        })
        .await
}

/// POST /lists/{list_id}/todos/{todo_id}/delete
#[post("/lists/{list_id}/todos/{todo_id}/delete")]
pub async fn delete_todo(
    path: web::Path<(String, String)>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (raw_list_id, raw_todo_id) = path.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_list_id) else {
                return Ok(list_not_found(todo_session));
            };
            let Some(todo_id) = parse_id::<TodoId>(&raw_todo_id) else {
                return Ok(todo_not_found(todo_session, list_id));
            };
            match todo_session.lists.delete_todo(list_id, todo_id) {
                Ok(_) => {
                    tracing::info!(
                        session_id = %session.id(),
                        list_id = %list_id,
                        todo_id = %todo_id,
                        "Todo deleted"
                    );
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(TODO_DELETED),
                        format!("/lists/{list_id}"),
                    ))
                }
                Err(err) => recover_not_found(todo_session, list_id, err),
            }
        })
        .await
}

/// POST /lists/{list_id}/todos/{todo_id}/completed
/// Flip a single todo between done and open
#[post("/lists/{list_id}/todos/{todo_id}/completed")]
pub async fn toggle_todo(
    path: web::Path<(String, String)>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (raw_list_id, raw_todo_id) = path.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_list_id) else {
                return Ok(list_not_found(todo_session));
            };
            let Some(todo_id) = parse_id::<TodoId>(&raw_todo_id) else {
                return Ok(todo_not_found(todo_session, list_id));
            };
            match todo_session.lists.toggle_todo(list_id, todo_id) {
                Ok(completed) => {
                    tracing::info!(
                        session_id = %session.id(),
                        list_id = %list_id,
                        todo_id = %todo_id,
                        completed,
                        "Todo toggled"
                    );
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(TODO_UPDATED),
                        format!("/lists/{list_id}"),
                    ))
                }
                Err(err) => recover_not_found(todo_session, list_id, err),
            }
        })
        .await
}

/// POST /lists/{list_id}/complete_all
/// Complete every todo, or reopen them all when nothing is left open
#[post("/lists/{list_id}/complete_all")]
pub async fn complete_all(
    path: web::Path<String>,
    session: CurrentSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let raw_list_id = path.into_inner();
    state
        .with_session(session, |todo_session| {
            let Some(list_id) = parse_id::<ListId>(&raw_list_id) else {
                return Ok(list_not_found(todo_session));
            };
            match todo_session.lists.complete_all(list_id) {
                Ok(completed) => {
                    tracing::info!(
                        session_id = %session.id(),
                        list_id = %list_id,
                        completed,
                        "All todos updated"
                    );
                    Ok(redirect_with_flash(
                        todo_session,
                        Flash::success(ALL_TODOS_UPDATED),
                        format!("/lists/{list_id}"),
                    ))
                }
                Err(err) => recover_not_found(todo_session, list_id, err),
            }
        })
        .await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_todo)
        .service(delete_todo)
        .service(toggle_todo)
        .service(complete_all);
}
