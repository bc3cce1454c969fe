use super::{load_pipeline, BatchOptions};
use crate::batch::{run_batch, ItemList};
use crate::error::RulesError;
use crate::host::Host;
use crate::output::ApplyResult;
use crate::rule::ApplyMode;
use anyhow::Result;
use std::path::Path;

/// Apply operation - equivalent to `massren apply`
///
/// Commits the rules stored at `rules_path` to every item. Per-item failures are
/// part of the result; only a rule set that cannot be used is an error.
pub fn apply_operation<T: Host>(
    rules_path: &Path,
    host: &mut T,
    items: &mut ItemList<T::Item>,
    options: BatchOptions,
) -> Result<ApplyResult>
where
    T::Item: PartialEq,
{
    let mut pipeline = load_pipeline(rules_path)?;
    if !pipeline.rules().iter().any(|rule| rule.enabled) {
        return Err(RulesError::NoEnabledRules(rules_path.display().to_string()).into());
    }

    let validation = items.validate(options.remove_empties, options.remove_duplicates);
    let report = run_batch(&mut pipeline, host, items, ApplyMode::Commit);

    tracing::debug!(
        renamed = report.changed_count(),
        failed = report.failures.len(),
        "apply finished"
    );

    Ok(ApplyResult::new(&report, validation))
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
    fn test_apply_operation() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(
            &dir,
            r#"
[[rules]]
kind = "replace"
search_text = "old"
replacement_text = "new"

[[rules]]
kind = "insert"
insert_text = "_hd"
reverse_from_end = true
"#,
        );

        let mut host = MemoryHost::new();
        let mut items = ItemList::from_items([
            host.add("old_rock.png", true),
            host.add("OldPlayer", false),
        ]);
        let result = apply_operation(&rules, &mut host, &mut items, BatchOptions::default()).unwrap();

        assert!(result.is_success());
        assert_eq!(result.renamed.len(), 2);
        assert_eq!(host.name(0), Some("new_rock_hd.png"));
        assert_eq!(host.name(1), Some("OldPlayer_hd"));
    }

    #[test]
    fn test_apply_operation_reports_unsafe_items() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(
            &dir,
            r#"
[[rules]]
kind = "insert"
insert_text = ".bak"
reverse_from_end = true
"#,
        );

        let mut host = MemoryHost::new();
        let mut items = ItemList::from_items([host.add("rock.png", true), host.add("Node", false)]);
        let result = apply_operation(&rules, &mut host, &mut items, BatchOptions::default()).unwrap();

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].index, 0);
        assert_eq!(host.name(0), Some("rock.png"));
        assert_eq!(host.name(1), Some("Node.bak"));
    }

    #[test]
    fn test_apply_operation_requires_enabled_rules() {
        let dir = TempDir::new().unwrap();
        let rules = write_rules(
            &dir,
            r#"
[[rules]]
kind = "rename"
enabled = false
new_base_name = "x"
"#,
        );

        let mut host = MemoryHost::new();
        let mut items = ItemList::from_items([host.add("rock.png", true)]);
        let err = apply_operation(&rules, &mut host, &mut items, BatchOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("No enabled rules"));
        assert_eq!(host.name(0), Some("rock.png"));
    }
}
