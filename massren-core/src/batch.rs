use crate::error::ItemError;
use crate::host::Host;
use crate::pipeline::RulePipeline;
use crate::rule::ApplyMode;
use serde::Serialize;

/// Ordered item handles as the user selected them.
///
/// A slot can be empty when the item it referred to went away; empty slots keep
/// their place so batch positions stay what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList<H> {
    slots: Vec<Option<H>>,
}

impl<H> Default for ItemList<H> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

/// Counts produced by [`ItemList::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Empty slots still in the list.
    pub empties: usize,
    /// Distinct items that appear more than once.
    pub duplicates: usize,
}

impl<H: PartialEq> ItemList<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        Self {
            slots: items.into_iter().map(Some).collect(),
        }
    }

    pub fn push(&mut self, item: H) {
        self.slots.push(Some(item));
    }

    pub fn push_empty(&mut self) {
        self.slots.push(None);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn slots(&self) -> &[Option<H>] {
        &self.slots
    }

    /// Count (and optionally drop) empty slots and repeated items.
    ///
    /// Removing duplicates keeps the first occurrence of each item.
    pub fn validate(&mut self, remove_empties: bool, remove_duplicates: bool) -> ValidationReport {
        if remove_empties {
            self.slots.retain(Option::is_some);
        }

        let duplicates = if remove_duplicates {
            let mut kept: Vec<Option<H>> = Vec::with_capacity(self.slots.len());
            for slot in self.slots.drain(..) {
                let repeated = slot.is_some() && kept.iter().any(|k| k.is_some() && *k == slot);
                if !repeated {
                    kept.push(slot);
                }
            }
            self.slots = kept;
            0
        } else {
            self.count_duplicates()
        };

        ValidationReport {
            empties: self.slots.iter().filter(|slot| slot.is_none()).count(),
            duplicates,
        }
    }

    fn count_duplicates(&self) -> usize {
        let items: Vec<&H> = self.slots.iter().flatten().collect();
        items
            .iter()
            .enumerate()
            .filter(|&(i, item)| {
                // Count each repeated item once, at its first occurrence
                !items[..i].contains(item) && items[i + 1..].contains(item)
            })
            .count()
    }
}

/// Sequence position handed to rename rules: none for a lone item.
pub fn sequence_position(index: usize, batch_len: usize) -> Option<usize> {
    (batch_len > 1).then_some(index)
}

/// An item that made it through the pipeline (and, when committing, the host).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedItem {
    pub index: usize,
    pub original: String,
    pub renamed: String,
    pub is_asset: bool,
    pub warnings: Vec<String>,
}

impl RenamedItem {
    pub fn changed(&self) -> bool {
        self.original != self.renamed
    }
}

#[derive(Debug)]
pub struct ItemFailure {
    pub index: usize,
    /// Known when the host managed to resolve the item.
    pub original_name: Option<String>,
    pub error: ItemError,
}

/// What happened to each item of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    pub mode: ApplyMode,
    pub items: Vec<RenamedItem>,
    pub failures: Vec<ItemFailure>,
    pub skipped_empty: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.items.iter().filter(|item| item.changed()).count()
    }
}

/// Run the pipeline over every item of `items`.
///
/// Previews are rebuilt from scratch. Each item is handled on its own: a failure is
/// recorded against that item and the batch moves on to the next one.
pub fn run_batch<T: Host>(
    pipeline: &mut RulePipeline,
    host: &mut T,
    items: &ItemList<T::Item>,
    mode: ApplyMode,
) -> BatchReport
where
    T::Item: PartialEq,
{
    pipeline.clear_previews();

    let mut report = BatchReport {
        mode,
        items: Vec::new(),
        failures: Vec::new(),
        skipped_empty: 0,
    };

    for (index, slot) in items.slots().iter().enumerate() {
        let Some(item) = slot else {
            report.skipped_empty += 1;
            continue;
        };

        match process_item(pipeline, host, item, index, items.len(), mode) {
            Ok(renamed) => report.items.push(renamed),
            Err((original_name, error)) => {
                tracing::warn!(index, "{}", error);
                report.failures.push(ItemFailure {
                    index,
                    original_name,
                    error,
                });
            },
        }
    }

    report
}

fn process_item<T: Host>(
    pipeline: &mut RulePipeline,
    host: &mut T,
    item: &T::Item,
    index: usize,
    batch_len: usize,
    mode: ApplyMode,
) -> Result<RenamedItem, (Option<String>, ItemError)> {
    let resolved = host
        .resolve(item)
        .map_err(|e| (None, ItemError::Resolve(e)))?;
    let position = sequence_position(index, batch_len);

    let outcome = pipeline
        .run(&resolved.name, resolved.is_asset, position, mode)
        .map_err(|e| (Some(resolved.name.clone()), ItemError::from(e)))?;

    let renamed = outcome.parts.full_name();
    let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();

    match mode {
        ApplyMode::Preview => {
            let line =
                pipeline.record_preview(&resolved.name, &renamed, position, resolved.is_asset);
            line.warnings.clone_from(&warnings);
        },
        ApplyMode::Commit => {
            let committed = if resolved.is_asset {
                host.rename_asset(item, &renamed)
            } else {
                host.set_display_name(item, &outcome.parts.base_name)
            };
            committed.map_err(|e| (Some(resolved.name.clone()), ItemError::Commit(e)))?;
            tracing::info!(from = resolved.name.as_str(), to = renamed.as_str(), "renamed");
        },
    }

    Ok(RenamedItem {
        index,
        original: resolved.name,
        renamed,
        is_asset: resolved.is_asset,
        warnings,
    })
}
