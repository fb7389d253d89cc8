//! Todo manager error types

use crate::structs::{ListId, SessionId, TodoId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Rejected user input. The message is meant to be shown as-is.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Todo not found: {0}")]
    TodoNotFound(TodoId),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

pub type Result<T> = std::result::Result<T, TodoError>;
