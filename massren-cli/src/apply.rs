use anyhow::Result;
use massren_core::{
    apply_operation, preview_operation, write_preview, BatchOptions, Host, ItemList,
    OutputFormatter, Preview,
};
use std::path::Path;

use crate::cli::ItemArgs;
use crate::items::{batch_options, Items};
use crate::{ItemsFailed, OutputFormat};

pub struct ApplyArgs<'a> {
    pub rules_path: &'a Path,
    /// Preview shown first, when the batch is small enough
    pub auto_preview: Option<Preview>,
    pub output: OutputFormat,
    pub quiet: bool,
    pub use_color: Option<bool>,
}

pub fn handle_apply(args: &ItemArgs, apply: &ApplyArgs<'_>) -> Result<()> {
    let options = batch_options(args);
    let result = match Items::collect(args) {
        Items::Files(mut host, mut items) => {
            show_preview(&mut host, &mut items, options, apply)?;
            apply_operation(apply.rules_path, &mut host, &mut items, options)?
        },
        Items::Names(mut host, mut items) => {
            show_preview(&mut host, &mut items, options, apply)?;
            apply_operation(apply.rules_path, &mut host, &mut items, options)?
        },
    };

    match apply.output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !apply.quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    if result.is_success() {
        Ok(())
    } else {
        Err(ItemsFailed {
            failed: result.failures.len(),
            total: result.renamed.len() + result.unchanged + result.failures.len(),
        }
        .into())
    }
}

fn show_preview<T: Host>(
    host: &mut T,
    items: &mut ItemList<T::Item>,
    options: BatchOptions,
    apply: &ApplyArgs<'_>,
) -> Result<()>
where
    T::Item: PartialEq,
{
    let Some(format) = apply.auto_preview else {
        return Ok(());
    };
    if apply.quiet || apply.output == OutputFormat::Json || format == Preview::None {
        return Ok(());
    }

    let result = preview_operation(apply.rules_path, host, items, options)?;
    write_preview(&result.previews, format, apply.use_color)?;
    Ok(())
}
