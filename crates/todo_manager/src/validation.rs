//! Name validation rules for lists and todos

use crate::error::{Result, TodoError};
use crate::structs::{List, ListId};

pub const MIN_NAME_LEN: usize = 1;
pub const MAX_NAME_LEN: usize = 100;

pub const LIST_NAME_NOT_UNIQUE: &str = "The list name must be unique.";
pub const LIST_NAME_LENGTH: &str = "The list name must be between 1 and 100 characters.";
pub const TODO_NAME_LENGTH: &str = "Todo must be between 1 and 100 characters.";

fn has_valid_length(name: &str) -> bool {
    (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.chars().count())
}

/// Validate a list name against the other lists of the session.
///
/// `renaming` excludes that list from the uniqueness check so a list can
/// keep its own name. Uniqueness is checked before length.
pub fn validate_list_name(lists: &[List], name: &str, renaming: Option<ListId>) -> Result<()> {
    let taken = lists
        .iter()
        .filter(|list| Some(list.id) != renaming)
        .any(|list| list.name == name);

    if taken {
        return Err(TodoError::Validation(LIST_NAME_NOT_UNIQUE.to_string()));
    }

    if !has_valid_length(name) {
        return Err(TodoError::Validation(LIST_NAME_LENGTH.to_string()));
    }

    Ok(())
}

pub fn validate_todo_name(name: &str) -> Result<()> {
    if !has_valid_length(name) {
        return Err(TodoError::Validation(TODO_NAME_LENGTH.to_string()));
    }
    Ok(())
}
