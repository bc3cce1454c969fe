use crate::pipeline::PreviewLine;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render preview lines as a table of element, original and new name
pub fn render_table(lines: &[PreviewLine], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
    }

    if use_color {
        table.set_header(vec![
            Cell::new("Element").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New").fg(Color::Cyan),
            Cell::new("Notes").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Element", "Original", "New", "Notes"]);
    }

    for line in lines {
        let notes = if !line.warnings.is_empty() {
            format!("{} warning(s)", line.warnings.len())
        } else if line.changed() {
            String::new()
        } else {
            "unchanged".to_string()
        };

        if use_color {
            let new_color = if line.changed() {
                Color::Green
            } else {
                Color::DarkGrey
            };
            table.add_row(vec![
                Cell::new(line.element.to_string()).fg(Color::Yellow),
                Cell::new(&line.original),
                Cell::new(format!("→ {}", line.renamed)).fg(new_color),
                Cell::new(&notes).fg(Color::Yellow),
            ]);
        } else {
            table.add_row(vec![
                line.element.to_string(),
                line.original.clone(),
                format!("→ {}", line.renamed),
                notes,
            ]);
        }
    }

    let changed = lines.iter().filter(|line| line.changed()).count();
    let totals = format!("{} items, {} changed", lines.len(), changed);
    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(totals).fg(Color::White),
            Cell::new(""),
            Cell::new(""),
        ]);
    } else {
        table.add_row(vec!["─────────", "─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", totals.as_str(), "", ""]);
    }

    table.to_string()
}
