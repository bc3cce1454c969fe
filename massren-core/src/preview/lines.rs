use crate::pipeline::PreviewLine;
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;

/// Render one `Element N: old -> new` line per item, warnings indented below
pub fn render_lines(lines: &[PreviewLine], use_color: bool) -> String {
    let mut output = String::new();

    for line in lines {
        if use_color {
            let renamed_style = if line.changed() {
                AnsiColor::Green.normal()
            } else {
                Style::new().dimmed()
            };
            writeln!(
                output,
                "{} {} -> {}",
                AnsiColor::Cyan
                    .bold()
                    .paint(format!("Element {}:", line.element)),
                line.original,
                renamed_style.paint(&line.renamed)
            )
            .unwrap();
        } else {
            writeln!(output, "{}", line).unwrap();
        }

        for warning in &line.warnings {
            if use_color {
                writeln!(
                    output,
                    "  {}",
                    AnsiColor::Yellow.paint(format!("warning: {}", warning))
                )
                .unwrap();
            } else {
                writeln!(output, "  warning: {}", warning).unwrap();
            }
        }
    }

    output
}
