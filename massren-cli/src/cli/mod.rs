pub mod args;
pub mod types;

pub use args::{Cli, Commands, ItemArgs, RulesCommand};
pub use types::{OutputFormat, PreviewArg};
