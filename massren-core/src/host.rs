//! The boundary to whatever owns the items being renamed.
//!
//! The pipeline never touches items directly. A [`Host`] tells it what an item is
//! called and whether it is a path-addressable asset, and carries out the rename
//! once a name has been computed.

use crate::error::HostError;

/// What the host knows about an item before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub name: String,
    pub is_asset: bool,
}

pub trait Host {
    /// Opaque handle the host uses to find an item again.
    type Item;

    fn resolve(&self, item: &Self::Item) -> Result<ResolvedItem, HostError>;

    /// Rename an asset to `new_full_name`, extension included.
    fn rename_asset(&mut self, item: &Self::Item, new_full_name: &str) -> Result<(), HostError>;

    /// Change the display name of a non-asset item.
    fn set_display_name(&mut self, item: &Self::Item, new_base_name: &str)
        -> Result<(), HostError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub name: String,
    pub is_asset: bool,
}

/// Host keeping its items in memory, addressed by insertion index.
///
/// Asset names must be unique among assets and non-empty; display names of other
/// items are unrestricted.
#[derive(Debug, Default, Clone)]
pub struct MemoryHost {
    items: Vec<MemoryItem>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and return its handle.
    pub fn add(&mut self, name: &str, is_asset: bool) -> usize {
        self.items.push(MemoryItem {
            name: name.to_string(),
            is_asset,
        });
        self.items.len() - 1
    }

    pub fn name(&self, handle: usize) -> Option<&str> {
        self.items.get(handle).map(|item| item.name.as_str())
    }

    pub fn items(&self) -> &[MemoryItem] {
        &self.items
    }

    fn item_mut(&mut self, handle: usize) -> Result<&mut MemoryItem, HostError> {
        self.items
            .get_mut(handle)
            .ok_or_else(|| HostError::NotFound(format!("item {}", handle)))
    }
}

impl Host for MemoryHost {
    type Item = usize;

    fn resolve(&self, item: &usize) -> Result<ResolvedItem, HostError> {
        self.items
            .get(*item)
            .map(|found| ResolvedItem {
                name: found.name.clone(),
                is_asset: found.is_asset,
            })
            .ok_or_else(|| HostError::NotFound(format!("item {}", item)))
    }

    fn rename_asset(&mut self, item: &usize, new_full_name: &str) -> Result<(), HostError> {
        if new_full_name.trim().is_empty() {
            return Err(HostError::InvalidName {
                name: new_full_name.to_string(),
                reason: "asset names cannot be empty".to_string(),
            });
        }

        let clash = self
            .items
            .iter()
            .enumerate()
            .any(|(i, other)| i != *item && other.is_asset && other.name == new_full_name);
        let target = self.item_mut(*item)?;
        if clash {
            return Err(HostError::TargetExists {
                from: target.name.clone(),
                to: new_full_name.to_string(),
            });
        }

        target.name = new_full_name.to_string();
        Ok(())
    }

    fn set_display_name(&mut self, item: &usize, new_base_name: &str) -> Result<(), HostError> {
        self.item_mut(*item)?.name = new_base_name.to_string();
        Ok(())
    }
}
