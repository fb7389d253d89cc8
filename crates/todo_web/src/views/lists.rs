use std::fmt::Write;

use todo_manager::{sort_lists, Flash, List};

use super::{escape, layout};

/// All lists, open ones first, with remaining/total counts.
pub fn lists_page(lists: &[List], flash: Option<&Flash>) -> String {
    let mut content = String::from("<h2>Your Lists</h2>\n");

    if lists.is_empty() {
        content.push_str("<p>No lists yet. <a href=\"/lists/new\">Create one</a>.</p>\n");
        return layout("Lists", flash, &content);
    }

    content.push_str("<ul id=\"lists\">\n");
    for list in sort_lists(lists) {
        let class = if list.is_complete() { " class=\"complete\"" } else { "" };
        let _ = writeln!(
            content,
            "  <li{class}><a href=\"/lists/{id}\">{name}</a><span class=\"count\">{remaining} / {total}</span></li>",
            id = list.id,
            name = escape(&list.name),
            remaining = list.todos_remaining_count(),
            total = list.todos_count(),
        );
    }
    content.push_str("</ul>\n");

    layout("Lists", flash, &content)
}

fn list_name_form(action: &str, value: &str, submit: &str) -> String {
    format!(
        concat!(
            "<form action=\"{action}\" method=\"post\">\n",
            "  <label for=\"list_name\">Enter the name for your list:</label>\n",
            "  <input id=\"list_name\" name=\"list_name\" type=\"text\" value=\"{value}\" maxlength=\"100\" autofocus>\n",
            "  <button type=\"submit\">{submit}</button>\n",
            "</form>\n",
        ),
        action = action,
        value = escape(value),
        submit = submit,
    )
}

/// `value` refills the input after a rejected submission.
pub fn new_list_page(flash: Option<&Flash>, value: &str) -> String {
    let mut content = String::from("<h2>New List</h2>\n");
    content.push_str(&list_name_form("/lists", value, "Save"));
    content.push_str("<p><a href=\"/lists\">Cancel</a></p>\n");
    layout("New List", flash, &content)
}

pub fn edit_list_page(list: &List, flash: Option<&Flash>, value: &str) -> String {
    let mut content = format!("<h2>Editing '{}'</h2>\n", escape(&list.name));
    content.push_str(&list_name_form(&format!("/lists/{}", list.id), value, "Save"));
    let _ = write!(
        content,
        concat!(
            "<form action=\"/lists/{id}/delete\" method=\"post\">\n",
            "  <button type=\"submit\" class=\"delete\">Delete List</button>\n",
            "</form>\n",
            "<p><a href=\"/lists/{id}\">Cancel</a></p>\n",
        ),
        id = list.id,
    );
    layout("Edit List", flash, &content)
}
