use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use todo_manager::{SessionId, SessionStore};

use super::tracing_middleware::TraceId;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "todo_session";

/// Middleware that binds every request to a session in the [`SessionStore`].
///
/// Reads the session cookie, starts a new session when it is missing, unknown
/// or expired, and sets the cookie on the response for new sessions.
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
    cookie_secure: bool,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>, cookie_secure: bool) -> Self {
        Self {
            store,
            cookie_secure,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: Arc::clone(&self.store),
            cookie_secure: self.cookie_secure,
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<SessionStore>,
    cookie_secure: bool,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let store = Arc::clone(&self.store);
        let cookie_secure = self.cookie_secure;

        Box::pin(async move {
            let requested = req
                .cookie(SESSION_COOKIE)
                .and_then(|cookie| cookie.value().parse::<SessionId>().ok());

            let (session_id, created) = store.get_or_create(requested).await;
            if created {
                let trace_id = req.extensions().get::<TraceId>().cloned();
                tracing::debug!(
                    trace_id = trace_id.as_ref().map(TraceId::as_str),
                    session_id = %session_id,
                    replaced = requested.is_some(),
                    "Session started"
                );
                store.purge_expired().await;
            }

            req.extensions_mut().insert(CurrentSession(session_id));
            let mut res = service.call(req).await?;

            if created {
                let cookie = Cookie::build(SESSION_COOKIE, session_id.to_string())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(cookie_secure)
                    .finish();
                res.response_mut()
                    .add_cookie(&cookie)
                    .map_err(ErrorInternalServerError)?;
            }

            Ok(res)
        })
    }
}

/// Session of the current request, placed in request extensions by
/// [`SessionMiddleware`]. Usable as a handler argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentSession(pub SessionId);

impl CurrentSession {
    pub fn id(&self) -> SessionId {
        self.0
    }
}

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentSession>()
                .copied()
                .ok_or(AppError::MissingSession),
        )
    }
}
