use super::{load_pipeline, BatchOptions};
use crate::batch::{run_batch, ItemList};
use crate::host::Host;
use crate::output::PreviewResult;
use crate::rule::ApplyMode;
use anyhow::Result;
use std::path::Path;

/// Preview operation - equivalent to `massren preview`
///
/// Runs the rules stored at `rules_path` over `items` without touching the host.
pub fn preview_operation<T: Host>(
    rules_path: &Path,
    host: &mut T,
    items: &mut ItemList<T::Item>,
    options: BatchOptions,
) -> Result<PreviewResult>
where
    T::Item: PartialEq,
{
    let mut pipeline = load_pipeline(rules_path)?;
    let validation = items.validate(options.remove_empties, options.remove_duplicates);

    let report = run_batch(&mut pipeline, host, items, ApplyMode::Preview);
    Ok(PreviewResult::new(&pipeline, &report, validation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use std::fs;
    use tempfile::TempDir;

    fn write_rules(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("rules.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_preview_operation() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(
            &dir,
            r#"
[[rules]]
kind = "rename"
new_base_name = "Tex"
"#,
        );

        let mut host = MemoryHost::new();
        let mut items = ItemList::from_items([host.add("rock.png", true), host.add("moss.png", true)]);
        let result = preview_operation(&rules, &mut host, &mut items, BatchOptions::default()).unwrap();

        assert_eq!(result.changed, 2);
        assert_eq!(result.previews[0].to_string(), "Element 0: rock.png -> Tex_01.png");
        assert_eq!(result.previews[1].to_string(), "Element 1: moss.png -> Tex_02.png");
        assert_eq!(host.name(0), Some("rock.png"));
    }

    #[test]
    fn test_preview_operation_validates_items() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(&dir, "");

        let mut host = MemoryHost::new();
        let rock = host.add("rock.png", true);
        let mut items = ItemList::from_items([rock, rock]);
        items.push_empty();

        let result = preview_operation(
            &rules,
            &mut host,
            &mut items,
            BatchOptions {
                remove_empties: false,
                remove_duplicates: true,
            },
        )
        .unwrap();

        assert_eq!(result.validation.duplicates, 0);
        assert_eq!(result.validation.empties, 1);
        assert_eq!(result.skipped_empty, 1);
        assert_eq!(result.previews.len(), 1);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_preview_operation_bad_rules_file() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(&dir, "[[rules]\nkind =");

        let mut host = MemoryHost::new();
        let mut items = ItemList::from_items([host.add("rock.png", true)]);
        let err = preview_operation(&rules, &mut host, &mut items, BatchOptions::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load rules"));
    }
}
