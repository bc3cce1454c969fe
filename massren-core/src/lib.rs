#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Batch renaming through an ordered pipeline of rename, replace and insert rules.

pub mod batch;
pub mod config;
pub mod error;
pub mod host;
pub mod name_parts;
pub mod operations;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod rule;
pub mod ruleset;

pub use batch::{
    run_batch, sequence_position, BatchReport, ItemFailure, ItemList, RenamedItem,
    ValidationReport,
};
pub use config::Config;
pub use error::{HostError, InvalidEditError, ItemError, RuleSetError, RulesError};
pub use host::{Host, MemoryHost, MemoryItem, ResolvedItem};
pub use name_parts::NameParts;
pub use operations::{
    apply_operation, load_pipeline, preview_operation, rules_operation, BatchOptions,
    RuleChanges, RulesAction,
};
pub use output::{
    ApplyResult, FailureEntry, OutputFormat, OutputFormatter, PreviewResult, RuleEntry,
    RulesResult, VersionResult,
};
pub use pipeline::{PreviewLine, RulePipeline, RunOutcome};
pub use preview::{render_previews, write_preview, Preview};
pub use rule::{
    Applied, ApplyMode, EditKind, InsertConfig, RenameConfig, RenameRule, ReplaceConfig, RuleEdit,
    RuleId,
};
pub use ruleset::RuleSet;
