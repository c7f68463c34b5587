//! Table of contents for the accordion variant.

use crate::output::IndexEntry;
use crate::pipeline::markup::{escape_attr, escape_text};
use std::fmt::Write;

/// Filename of the table of contents inside the output folder.
pub const INDEX_FILENAME: &str = "index.html";

const STYLE: &str = r#"        body {
            font-family: Arial, sans-serif;
            padding: 2rem;
            background: #f9f9f9;
            color: #333;
        }
        h1 {
            text-align: center;
            margin-bottom: 2rem;
        }
        ul {
            list-style: none;
            padding: 0;
        }
        li {
            margin: 1rem 0;
        }
        a {
            text-decoration: none;
            font-weight: bold;
            color: #2c3e50;
        }
        a:hover {
            color: #007acc;
        }
"#;

/// Render the static table of contents: one link per entry, in the given
/// order. No sorting or deduplication.
pub fn render_index(title: &str, entries: &[IndexEntry]) -> String {
    let title = escape_text(title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "    <title>{title}</title>");
    let _ = write!(html, "    <style>\n{STYLE}    </style>\n");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "    <h1>{title}</h1>");
    html.push_str("    <ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "        <li><a href=\"{}\">{}</a></li>",
            escape_attr(&entry.filename),
            escape_text(&entry.title)
        );
    }
    html.push_str("    </ul>\n</body>\n</html>\n");
    html
}
