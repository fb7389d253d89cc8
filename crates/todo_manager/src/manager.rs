//! List store: the mutations a session can apply to its lists

use crate::error::{Result, TodoError};
use crate::structs::{List, ListId, Todo, TodoId};
use crate::validation::{validate_list_name, validate_todo_name};
use serde::{Deserialize, Serialize};

/// Ordered lists of one session, addressed by stable id.
///
/// Every operation either succeeds completely or leaves the store untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListStore {
    lists: Vec<List>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists in creation order
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, list_id: ListId) -> Result<&List> {
        self.lists
            .iter()
            .find(|list| list.id == list_id)
            .ok_or(TodoError::ListNotFound(list_id))
    }

    fn list_mut(&mut self, list_id: ListId) -> Result<&mut List> {
        self.lists
            .iter_mut()
            .find(|list| list.id == list_id)
            .ok_or(TodoError::ListNotFound(list_id))
    }

    pub fn create_list(&mut self, name: &str) -> Result<ListId> {
        let name = name.trim();
        validate_list_name(&self.lists, name, None)?;

        let list = List::new(name);
        let list_id = list.id;
        self.lists.push(list);

        tracing::debug!(list_id = %list_id, "ListStore: List created");
        Ok(list_id)
    }

    pub fn rename_list(&mut self, list_id: ListId, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        // Existence first, so an unknown id is never reported as a validation error
        self.list(list_id)?;
        validate_list_name(&self.lists, new_name, Some(list_id))?;

        self.list_mut(list_id)?.name = new_name.to_string();

        tracing::debug!(list_id = %list_id, "ListStore: List renamed");
        Ok(())
    }

    pub fn delete_list(&mut self, list_id: ListId) -> Result<List> {
        let position = self
            .lists
            .iter()
            .position(|list| list.id == list_id)
            .ok_or(TodoError::ListNotFound(list_id))?;

        tracing::debug!(list_id = %list_id, "ListStore: List deleted");
        Ok(self.lists.remove(position))
    }

    pub fn add_todo(&mut self, list_id: ListId, text: &str) -> Result<TodoId> {
        let text = text.trim();
        let list = self.list_mut(list_id)?;
        validate_todo_name(text)?;

        let todo = Todo::new(text);
        let todo_id = todo.id;
        list.todos.push(todo);

        tracing::debug!(list_id = %list_id, todo_id = %todo_id, "ListStore: Todo added");
        Ok(todo_id)
    }

    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> Result<Todo> {
        let list = self.list_mut(list_id)?;
        let position = list
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(TodoError::TodoNotFound(todo_id))?;

        tracing::debug!(list_id = %list_id, todo_id = %todo_id, "ListStore: Todo deleted");
        Ok(list.todos.remove(position))
    }

    /// Flip a todo's completed flag and return the new value.
    pub fn toggle_todo(&mut self, list_id: ListId, todo_id: TodoId) -> Result<bool> {
        let todo = self
            .list_mut(list_id)?
            .todo_mut(todo_id)
            .ok_or(TodoError::TodoNotFound(todo_id))?;
        todo.completed = !todo.completed;

        tracing::debug!(
            list_id = %list_id,
            todo_id = %todo_id,
            completed = todo.completed,
            "ListStore: Todo toggled"
        );
        Ok(todo.completed)
    }

    /// Complete every todo if any is still open, otherwise reopen them all.
    ///
    /// Returns the completed state that was applied.
    pub fn complete_all(&mut self, list_id: ListId) -> Result<bool> {
        let list = self.list_mut(list_id)?;
        let completed = list.todos.iter().any(|todo| !todo.completed);
        for todo in &mut list.todos {
            todo.completed = completed;
        }

        tracing::debug!(list_id = %list_id, completed, "ListStore: All todos updated");
        Ok(completed)
    }
}
