use anyhow::Result;
use massren_core::{preview_operation, write_preview, OutputFormatter, Preview};
use std::path::Path;

use crate::cli::ItemArgs;
use crate::items::{batch_options, Items};
use crate::{ItemsFailed, OutputFormat};

pub fn handle_preview(
    args: &ItemArgs,
    rules_path: &Path,
    format: Preview,
    output: OutputFormat,
    use_color: Option<bool>,
) -> Result<()> {
    let options = batch_options(args);
    let result = match Items::collect(args) {
        Items::Files(mut host, mut items) => {
            preview_operation(rules_path, &mut host, &mut items, options)?
        },
        Items::Names(mut host, mut items) => {
            preview_operation(rules_path, &mut host, &mut items, options)?
        },
    };

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            write_preview(&result.previews, format, use_color)?;
            if format != Preview::Json {
                print!("{}", result.format_summary());
            }
        },
    }

    if result.is_success() {
        Ok(())
    } else {
        Err(ItemsFailed {
            failed: result.failures.len(),
            total: result.previews.len() + result.failures.len(),
        }
        .into())
    }
}
