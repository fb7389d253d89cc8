//! Server-rendered HTML pages.
//!
//! Pages are assembled from static fragments and escaped user text; there is
//! no template engine.

mod list;
mod lists;

pub use list::list_page;
pub use lists::{edit_list_page, lists_page, new_list_page};

use actix_web::http::StatusCode;
use todo_manager::Flash;

const LAYOUT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #27272a; }
        header { display: flex; justify-content: space-between; align-items: baseline; border-bottom: 1px solid #e4e4e7; margin-bottom: 1.5rem; }
        .flash { padding: 0.75rem 1rem; border-radius: 0.5rem; margin-bottom: 1rem; }
        .flash.success { background: #dcfce7; color: #166534; }
        .flash.error { background: #fee2e2; color: #991b1b; }
        ul { list-style: none; padding: 0; }
        li { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 0; border-bottom: 1px solid #f4f4f5; }
        li.complete > a, li.complete > span { color: #a1a1aa; text-decoration: line-through; }
        form.inline { display: inline; }
        .count { margin-left: auto; color: #71717a; font-size: 0.875rem; }
        .actions { display: flex; gap: 0.5rem; }
    </style>
"#;

const LAYOUT_TAIL: &str = r#"    </main>
</body>
</html>
"#;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn flash_html(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            "<div class=\"flash {}\"><p>{}</p></div>\n",
            flash.kind.as_str(),
            escape(&flash.message)
        ),
        None => String::new(),
    }
}

/// Wrap page content in the shared layout. `content` must already be escaped.
pub fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let mut page = String::with_capacity(LAYOUT_HEAD.len() + content.len() + 256);
    page.push_str(LAYOUT_HEAD);
    page.push_str(&format!("    <title>{} - Todos</title>\n", escape(title)));
    page.push_str("</head>\n<body>\n");
    page.push_str("    <header><h1><a href=\"/lists\">Todos</a></h1><a href=\"/lists/new\">New List</a></header>\n");
    page.push_str("    <main>\n");
    page.push_str(&flash_html(flash));
    page.push_str(content);
    page.push_str(LAYOUT_TAIL);
    page
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/lists\">Back to all lists</a></p>\n",
        escape(title),
        escape(message)
    );
    layout(title, None, &content)
}
