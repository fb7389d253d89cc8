//! # Todo Manager
//!
//! Session-scoped to-do lists: typed list and todo records, name validation,
//! the list store operations, display ordering and the per-browser session store.
//! Nothing in here knows about HTTP.

pub mod error;
pub mod manager;
pub mod ordering;
pub mod session_store;
pub mod structs;
pub mod validation;

// Re-exports
pub use error::{Result, TodoError};
pub use manager::ListStore;
pub use ordering::{sort_lists, sort_todos};
pub use session_store::SessionStore;
pub use structs::{Flash, FlashKind, List, ListId, SessionId, Todo, TodoId, TodoSession};
