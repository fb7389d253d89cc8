/// HTTP tests for the todo routes nested under a list
use actix_http::Request;
use actix_web::{
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App, Error,
};
use std::sync::Arc;
use todo_manager::{List, ListId, SessionId, TodoId};
use todo_web::config::SessionConfig;
use todo_web::middleware::{SessionMiddleware, SESSION_COOKIE};
use todo_web::server::{app_config, AppState};

struct TestSession {
    cookie: Cookie<'static>,
    session_id: SessionId,
}

async fn setup_test_app() -> (
    web::Data<AppState>,
    impl Service<Request, Response = ServiceResponse, Error = Error>,
) {
    let state = web::Data::new(AppState::new(&SessionConfig::default()));
    let sessions = Arc::clone(&state.sessions);
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(sessions, false))
            .configure(app_config),
    )
    .await;
    (state, app)
}

/// Helper: Start a session and create one list in it
async fn session_with_list(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    state: &AppState,
    name: &str,
) -> (TestSession, ListId) {
    let req = test::TestRequest::post()
        .uri("/lists")
        .set_form([("list_name", name)])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
        .unwrap();
    let session_id: SessionId = cookie.value().parse().unwrap();
    let session = TestSession { cookie, session_id };

    let list = snapshot(state, &session).await;
    (session, list[0].id)
}

async fn snapshot(state: &AppState, session: &TestSession) -> Vec<List> {
    state
        .sessions
        .with_session(session.session_id, |todo_session| {
            todo_session.lists.lists().to_vec()
        })
        .await
        .unwrap()
}

async fn list_in(state: &AppState, session: &TestSession, list_id: ListId) -> List {
    snapshot(state, session)
        .await
        .into_iter()
        .find(|list| list.id == list_id)
        .unwrap()
}

async fn post(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    session: &TestSession,
    uri: &str,
    form: &[(&str, &str)],
) -> ServiceResponse {
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(session.cookie.clone())
        .set_form(form)
        .to_request();
    test::call_service(app, req).await
}

async fn page(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    session: &TestSession,
    uri: &str,
) -> String {
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(session.cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn add_todos(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    session: &TestSession,
    list_id: ListId,
    names: &[&str],
) {
    for &name in names {
        let resp = post(app, session, &format!("/lists/{list_id}/todos"), &[("todo", name)]).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }
}

fn todo_ids(list: &List) -> Vec<TodoId> {
    list.todos.iter().map(|todo| todo.id).collect()
}

#[actix_web::test]
async fn test_add_todo() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Groceries").await;
    let list_uri = format!("/lists/{list_id}");

    let resp = post(&app, &session, &format!("{list_uri}/todos"), &[("todo", " Milk ")]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), list_uri);

    let list = list_in(&state, &session, list_id).await;
    assert_eq!(list.todos.len(), 1);
    assert_eq!(list.todos[0].name, "Milk");
    assert!(!list.todos[0].completed);

    let body = page(&app, &session, &list_uri).await;
    assert!(body.contains("<span>Milk</span>"));
    assert!(body.contains("The todo was added."));
}

#[actix_web::test]
async fn test_add_invalid_todo_rerenders_list() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Groceries").await;
    let uri = format!("/lists/{list_id}/todos");

    let resp = post(&app, &session, &uri, &[("todo", "   ")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Todo must be between 1 and 100 characters."));
    assert!(body.contains("<h2>Groceries</h2>"));

    let too_long = "x".repeat(101);
    let resp = post(&app, &session, &uri, &[("todo", too_long.as_str())]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(list_in(&state, &session, list_id).await.todos.is_empty());
}

#[actix_web::test]
async fn test_add_todo_to_missing_list() {
    let (state, app) = setup_test_app().await;
    let (session, _) = session_with_list(&app, &state, "Groceries").await;

    let uri = format!("/lists/{}/todos", ListId::new());
    let resp = post(&app, &session, &uri, &[("todo", "Milk")]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/lists");

    let body = page(&app, &session, "/lists").await;
    assert!(body.contains("The specified list was not found."));
}

#[actix_web::test]
async fn test_toggle_todo_and_display_order() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Letters").await;
    add_todos(&app, &session, list_id, &["Alpha", "Bravo", "Charlie"]).await;
    let ids = todo_ids(&list_in(&state, &session, list_id).await);

    for todo_id in [ids[0], ids[2]] {
        let uri = format!("/lists/{list_id}/todos/{todo_id}/completed");
        let resp = post(&app, &session, &uri, &[]).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/lists/{list_id}"));
    }

    let list = list_in(&state, &session, list_id).await;
    let completed: Vec<bool> = list.todos.iter().map(|todo| todo.completed).collect();
    assert_eq!(completed, vec![true, false, true]);

    let body = page(&app, &session, &format!("/lists/{list_id}")).await;
    assert!(body.contains("The todo has been updated."));
    let alpha = body.find("<span>Alpha</span>").unwrap();
    let bravo = body.find("<span>Bravo</span>").unwrap();
    let charlie = body.find("<span>Charlie</span>").unwrap();
    assert!(bravo < alpha && alpha < charlie);

    // Toggling again reopens it
    let uri = format!("/lists/{list_id}/todos/{}/completed", ids[0]);
    post(&app, &session, &uri, &[]).await;
    assert!(!list_in(&state, &session, list_id).await.todos[0].completed);
}

#[actix_web::test]
async fn test_delete_todo_preserves_order() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Letters").await;
    add_todos(&app, &session, list_id, &["A", "B", "C"]).await;
    let ids = todo_ids(&list_in(&state, &session, list_id).await);

    let uri = format!("/lists/{list_id}/todos/{}/delete", ids[1]);
    let resp = post(&app, &session, &uri, &[]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/lists/{list_id}"));

    let list = list_in(&state, &session, list_id).await;
    let names: Vec<&str> = list.todos.iter().map(|todo| todo.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(todo_ids(&list), vec![ids[0], ids[2]]);

    let body = page(&app, &session, &format!("/lists/{list_id}")).await;
    assert!(body.contains("The todo has been deleted."));
}

#[actix_web::test]
async fn test_missing_todo_redirects_to_list() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Letters").await;
    add_todos(&app, &session, list_id, &["A"]).await;
    let ids = todo_ids(&list_in(&state, &session, list_id).await);

    let delete_uri = format!("/lists/{list_id}/todos/{}/delete", ids[0]);
    post(&app, &session, &delete_uri, &[]).await;

    // Same todo again, then a malformed todo id
    for uri in [
        delete_uri.clone(),
        format!("/lists/{list_id}/todos/{}/completed", ids[0]),
        format!("/lists/{list_id}/todos/7/completed"),
    ] {
        let resp = post(&app, &session, &uri, &[]).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(location(&resp), format!("/lists/{list_id}"));
    }

    let body = page(&app, &session, &format!("/lists/{list_id}")).await;
    assert!(body.contains("The specified todo was not found."));
}

#[actix_web::test]
async fn test_complete_all_toggles_every_todo() {
    let (state, app) = setup_test_app().await;
    let (session, list_id) = session_with_list(&app, &state, "Chores").await;
    add_todos(&app, &session, list_id, &["Dishes", "Laundry"]).await;
    let ids = todo_ids(&list_in(&state, &session, list_id).await);
    post(
        &app,
        &session,
        &format!("/lists/{list_id}/todos/{}/completed", ids[0]),
        &[],
    )
    .await;

    let uri = format!("/lists/{list_id}/complete_all");
    let resp = post(&app, &session, &uri, &[]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/lists/{list_id}"));

    let list = list_in(&state, &session, list_id).await;
    assert!(list.is_complete());

    let body = page(&app, &session, "/lists").await;
    assert!(body.contains("<li class=\"complete\">"));
    assert!(body.contains("0 / 2"));

    // Everything was complete, so the second call reopens all todos
    post(&app, &session, &uri, &[]).await;
    let list = list_in(&state, &session, list_id).await;
    assert!(list.todos.iter().all(|todo| !todo.completed));
    assert_eq!(list.todos_remaining_count(), 2);
}

#[actix_web::test]
async fn test_complete_all_on_missing_list() {
    let (state, app) = setup_test_app().await;
    let (session, _) = session_with_list(&app, &state, "Chores").await;

    let resp = post(&app, &session, "/lists/not-a-list/complete_all", &[]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/lists");
}
