//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each massren command, separated from
//! CLI concerns like argument parsing and output formatting.

pub mod apply;
pub mod preview;
pub mod rules;

pub use apply::apply_operation;
pub use preview::preview_operation;
pub use rules::{load_pipeline, rules_operation, RuleChanges, RulesAction};

/// How the item list is cleaned up before a batch runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub remove_empties: bool,
    pub remove_duplicates: bool,
}
