use std::fmt::Write;

use todo_manager::{sort_todos, Flash, List};

use super::{escape, layout};

/// One list with its todos (open first), the add-todo form and the list actions.
///
/// `todo_value` refills the add-todo input after a rejected submission.
pub fn list_page(list: &List, flash: Option<&Flash>, todo_value: &str) -> String {
    let mut content = String::new();
    let _ = write!(
        content,
        concat!(
            "<section id=\"todos\"{class}>\n",
            "<h2>{name}</h2>\n",
            "<div class=\"actions\">\n",
            "  <form action=\"/lists/{id}/complete_all\" method=\"post\" class=\"inline\">\n",
            "    <button type=\"submit\" class=\"check\">Complete All</button>\n",
            "  </form>\n",
            "  <a class=\"edit\" href=\"/lists/{id}/edit\">Edit List</a>\n",
            "</div>\n",
        ),
        class = if list.is_complete() { " class=\"complete\"" } else { "" },
        name = escape(&list.name),
        id = list.id,
    );

    content.push_str("<ul>\n");
    for todo in sort_todos(&list.todos) {
        let class = if todo.completed { " class=\"complete\"" } else { "" };
        let _ = writeln!(
            content,
            concat!(
                "  <li{class}>",
                "<form action=\"/lists/{list_id}/todos/{todo_id}/completed\" method=\"post\" class=\"inline\">",
                "<button type=\"submit\" class=\"check\">{toggle}</button></form>",
                "<span>{name}</span>",
                "<form action=\"/lists/{list_id}/todos/{todo_id}/delete\" method=\"post\" class=\"inline delete\">",
                "<button type=\"submit\">Delete</button></form>",
                "</li>",
            ),
            class = class,
            list_id = list.id,
            todo_id = todo.id,
            toggle = if todo.completed { "Undo" } else { "Done" },
            name = escape(&todo.name),
        );
    }
    content.push_str("</ul>\n</section>\n");

    let _ = write!(
        content,
        concat!(
            "<form action=\"/lists/{id}/todos\" method=\"post\">\n",
            "  <label for=\"todo\">Enter a new todo item:</label>\n",
            "  <input id=\"todo\" name=\"todo\" type=\"text\" value=\"{value}\" maxlength=\"100\" placeholder=\"Something to do\">\n",
            "  <button type=\"submit\">Add</button>\n",
            "</form>\n",
            "<p><a href=\"/lists\">All Lists</a></p>\n",
        ),
        id = list.id,
        value = escape(todo_value),
    );

    layout(&list.name, flash, &content)
}
