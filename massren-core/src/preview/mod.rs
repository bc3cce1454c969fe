mod lines;
mod summary;
mod table;

pub use lines::render_lines;
pub use summary::render_summary;
pub use table::render_table;

use crate::pipeline::PreviewLine;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Lines,
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render preview lines in the specified format
pub fn render_previews(lines: &[PreviewLine], format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Lines => render_lines(lines, use_color),
        Preview::Table => render_table(lines, use_color),
        Preview::Summary => render_summary(lines),
        Preview::Json => render_json(lines),
        Preview::None => String::new(),
    }
}

pub fn render_json(lines: &[PreviewLine]) -> String {
    serde_json::to_string_pretty(lines).unwrap_or_default()
}

/// Write rendered preview lines to stdout
pub fn write_preview(lines: &[PreviewLine], format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_previews(lines, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
