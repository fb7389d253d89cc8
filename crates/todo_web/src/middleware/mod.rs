pub mod session_middleware;
pub mod tracing_middleware;

pub use session_middleware::{CurrentSession, SessionMiddleware, SESSION_COOKIE};
pub use tracing_middleware::{TraceId, TracingMiddleware, TRACE_ID_HEADER};
