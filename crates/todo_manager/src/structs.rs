//! Session data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::manager::ListStore;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Stable identifier of a list. Survives deletion of other lists.
    ListId
);
uuid_id!(
    /// Stable identifier of a todo within its list.
    TodoId
);
uuid_id!(
    /// Identifier of a browser session, carried in the session cookie.
    SessionId
);

/// A single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TodoId::new(),
            name: name.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of todos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl List {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete when it has at least one todo and none are left open.
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }

    pub fn todo(&self, todo_id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }

    pub(crate) fn todo_mut(&mut self, todo_id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == todo_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// One-shot status message shown on the next rendered page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Per-browser session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoSession {
    /// The session's lists, in creation order
    pub lists: ListStore,

    /// Pending flash message, cleared once rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,

    /// Last time the session was touched by a request
    pub last_seen: DateTime<Utc>,
}

impl Default for TodoSession {
    fn default() -> Self {
        Self {
            lists: ListStore::default(),
            flash: None,
            last_seen: Utc::now(),
        }
    }
}

impl TodoSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    /// Whether the session has been idle for longer than `ttl` at `now`.
    /// A `last_seen` in the future never counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        (now - self.last_seen)
            .to_std()
            .map(|idle| idle > ttl)
            .unwrap_or(false)
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Utc::now(), ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(name: &str, completed: bool) -> Todo {
        Todo {
            completed,
            ..Todo::new(name)
        }
    }

    #[test]
    fn test_list_complete_requires_todos() {
        let list = List::new("Empty");
        assert!(!list.is_complete());
        assert_eq!(list.todos_count(), 0);
        assert_eq!(list.todos_remaining_count(), 0);
    }

    #[test]
    fn test_list_complete_when_all_done() {
        let mut list = List::new("Chores");
        list.todos.push(todo("Dishes", true));
        list.todos.push(todo("Laundry", true));
        assert!(list.is_complete());

        list.todos.push(todo("Vacuum", false));
        assert!(!list.is_complete());
        assert_eq!(list.todos_count(), 3);
        assert_eq!(list.todos_remaining_count(), 1);
    }

    #[test]
    fn test_id_parse_and_display() {
        let id = ListId::new();
        let parsed: ListId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ListId>().is_err());
    }

    #[test]
    fn test_flash_is_one_shot() {
        let mut session = TodoSession::new();
        session.set_flash(Flash::success("The list has been created."));

        let flash = session.take_flash().unwrap();
        assert_eq!(flash.kind, FlashKind::Success);
        assert!(session.take_flash().is_none());
    }

    #[test]
    fn test_session_expiry() {
        let mut session = TodoSession::new();
        let ttl = Duration::from_secs(60);
        let now = session.last_seen;

        assert!(!session.is_expired_at(now, ttl));
        assert!(!session.is_expired_at(now + chrono::Duration::seconds(60), ttl));
        assert!(session.is_expired_at(now + chrono::Duration::seconds(61), ttl));

        session.last_seen = now + chrono::Duration::seconds(30);
        assert!(!session.is_expired_at(now, ttl));
    }

    #[test]
    fn test_serialization() {
        let mut session = TodoSession::new();
        session.lists.create_list("Groceries").unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: TodoSession = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.lists.lists(), session.lists.lists());
        assert!(!json.contains("\"flash\""));
    }
}
