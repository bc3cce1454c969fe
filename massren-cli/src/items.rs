use crate::cli::ItemArgs;
use crate::fs_host::FsHost;
use massren_core::{BatchOptions, ItemList, MemoryHost};
use std::path::PathBuf;

/// Items from the command line, with the host that owns them.
pub enum Items {
    Files(FsHost, ItemList<PathBuf>),
    Names(MemoryHost, ItemList<usize>),
}

impl Items {
    /// Build the item list. Files that do not exist and blank names become empty
    /// entries so the remaining items keep their positions.
    pub fn collect(args: &ItemArgs) -> Self {
        if args.names {
            let mut host = MemoryHost::new();
            let mut items = ItemList::new();
            for name in &args.items {
                if name.trim().is_empty() {
                    items.push_empty();
                } else {
                    items.push(host.add(name, false));
                }
            }
            return Self::Names(host, items);
        }

        let mut items = ItemList::new();
        for raw in &args.items {
            let path = PathBuf::from(raw);
            if path.symlink_metadata().is_ok() {
                items.push(path);
            } else {
                tracing::warn!("{} does not exist, treating it as an empty entry", raw);
                items.push_empty();
            }
        }
        Self::Files(FsHost::new(), items)
    }
}

pub fn batch_options(args: &ItemArgs) -> BatchOptions {
    BatchOptions {
        remove_empties: args.remove_empties,
        remove_duplicates: args.remove_duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(items: &[&str], names: bool) -> ItemArgs {
        ItemArgs {
            items: items.iter().map(ToString::to_string).collect(),
            names,
            remove_empties: false,
            remove_duplicates: false,
        }
    }

    #[test]
    fn test_collect_names() {
        let Items::Names(host, items) = Items::collect(&args(&["Player", "", "Enemy"], true))
        else {
            panic!("expected names");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items.slots()[1], None);
        assert_eq!(host.name(1), Some("Enemy"));
    }

    #[test]
    fn test_collect_files_marks_missing_as_empty() {
        let dir = TempDir::new().unwrap();
        let rock = dir.path().join("rock.png");
        std::fs::write(&rock, "").unwrap();
        let missing = dir.path().join("missing.png");

        let collected = Items::collect(&args(
            &[rock.to_str().unwrap(), missing.to_str().unwrap()],
            false,
        ));
        let Items::Files(_, items) = collected else {
            panic!("expected files");
        };
        assert_eq!(items.slots(), &[Some(rock), None]);
    }
}
