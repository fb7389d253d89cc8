//! Configuration management for the todo web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::time::Duration;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Idle time after which a session and its lists are dropped
    pub ttl: Duration,
    /// Upper bound on live sessions; the least recently used one is evicted
    pub max_sessions: usize,
    /// Mark the session cookie `Secure` (only sent over HTTPS)
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            max_sessions: DEFAULT_MAX_SESSIONS,
            cookie_secure: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// Port to bind; 0 lets the OS pick one
    pub port: u16,
    pub workers: usize,
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKER_COUNT,
            session: SessionConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Load SessionConfig from environment variables
///
/// Environment variables:
/// - `TODO_SESSION_TTL_SECS`: Idle session lifetime in seconds (default: 86400)
/// - `TODO_MAX_SESSIONS`: Maximum number of live sessions (default: 10000)
/// - `TODO_COOKIE_SECURE`: Set the `Secure` cookie attribute (default: false)
pub fn load_session_config() -> SessionConfig {
    SessionConfig {
        ttl: Duration::from_secs(env_or("TODO_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
        max_sessions: env_or("TODO_MAX_SESSIONS", DEFAULT_MAX_SESSIONS),
        cookie_secure: env_or("TODO_COOKIE_SECURE", false),
    }
}
