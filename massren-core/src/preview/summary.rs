use crate::pipeline::PreviewLine;
use std::fmt::Write;

/// Render preview as AI-friendly summary format
pub fn render_summary(lines: &[PreviewLine]) -> String {
    let mut output = String::new();

    let changed = lines.iter().filter(|line| line.changed()).count();
    let warnings: usize = lines.iter().map(|line| line.warnings.len()).sum();

    writeln!(output, "[PREVIEW SUMMARY]").unwrap();
    writeln!(output, "Items: {}", lines.len()).unwrap();
    writeln!(output, "Changed: {}", changed).unwrap();
    writeln!(output, "Warnings: {}", warnings).unwrap();

    if !lines.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[ITEMS]").unwrap();
        for line in lines {
            let kind = if line.is_asset { "asset" } else { "object" };
            if line.changed() {
                writeln!(
                    output,
                    "{} {}: {} -> {}",
                    kind, line.element, line.original, line.renamed
                )
                .unwrap();
            } else {
                writeln!(
                    output,
                    "{} {}: {} (unchanged)",
                    kind, line.element, line.original
                )
                .unwrap();
            }
        }
    }

    if warnings > 0 {
        writeln!(output).unwrap();
        writeln!(output, "[WARNINGS]").unwrap();
        for line in lines {
            for warning in &line.warnings {
                writeln!(output, "{}: {}", line.element, warning).unwrap();
            }
        }
    }

    output
}
