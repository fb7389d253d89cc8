use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{anyhow, Context};
use todo_manager::{SessionStore, TodoSession};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::config::{ServerConfig, SessionConfig};
use crate::controllers::{self, list_controller, todo_controller};
use crate::error::Result;
use crate::middleware::{CurrentSession, SessionMiddleware, TracingMiddleware};

pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.max_sessions, config.ttl)),
        }
    }

    /// Run a handler body against the request's session.
    pub async fn with_session<F>(&self, session: CurrentSession, f: F) -> Result<HttpResponse>
    where
        F: FnOnce(&mut TodoSession) -> Result<HttpResponse>,
    {
        self.sessions.with_session(session.id(), f).await?
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(list_controller::config)
        .configure(todo_controller::config)
        .default_service(web::to(controllers::not_found));
}

pub struct WebService {
    config: ServerConfig,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
    local_addrs: Vec<SocketAddr>,
}

impl WebService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            shutdown_tx: None,
            server_handle: None,
            local_addrs: Vec::new(),
        }
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        info!("Starting web service...");
        if self.server_handle.is_some() {
            return Err(anyhow!("Web service is already running"));
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let app_state = web::Data::new(AppState::new(&self.config.session));
        let sessions = Arc::clone(&app_state.sessions);
        let cookie_secure = self.config.session.cookie_secure;

        let http_server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .wrap(SessionMiddleware::new(Arc::clone(&sessions), cookie_secure))
                .wrap(TracingMiddleware)
                .configure(app_config)
        })
        .workers(self.config.workers.max(1))
        .disable_signals()
        .bind(self.config.bind_address())
        .with_context(|| format!("Failed to bind server to {}", self.config.bind_address()))?;

        self.local_addrs = http_server.addrs();
        let server = http_server.run();
        let server_control = server.handle();

        let server_handle = tokio::spawn(async move {
            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!("Web server error: {}", e);
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Web service shutdown signal received");
                    server_control.stop(true).await;
                }
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server_handle = Some(server_handle);

        for addr in &self.local_addrs {
            info!("Web service listening on http://{addr}");
        }
        Ok(())
    }

    pub async fn stop(&mut self) -> anyhow::Result<()> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                error!("Failed to send shutdown signal");
            }
        }

        if let Some(handle) = self.server_handle.take() {
            handle
                .await
                .context("Error waiting for server shutdown")?;
        }

        self.local_addrs.clear();
        info!("Web service stopped successfully");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }

    /// Addresses the server is bound to, once started
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }
}

impl Drop for WebService {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}
