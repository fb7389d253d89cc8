//! Display ordering: open items first, finished items last.
//!
//! Both orderings are stable partitions, so items keep their relative order
//! inside each group.

use crate::structs::{List, Todo};

fn incomplete_first<T>(items: &[T], is_complete: impl Fn(&T) -> bool) -> Vec<&T> {
    let (complete, incomplete): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| is_complete(*item));
    incomplete.into_iter().chain(complete).collect()
}

pub fn sort_lists(lists: &[List]) -> Vec<&List> {
    incomplete_first(lists, List::is_complete)
}

pub fn sort_todos(todos: &[Todo]) -> Vec<&Todo> {
    incomplete_first(todos, |todo| todo.completed)
}
