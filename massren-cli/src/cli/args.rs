use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use massren_core::RuleChanges;
use std::path::PathBuf;

use super::types::{KindArg, OutputFormat, PreviewArg};

/// Batch rename files and objects with an ordered pipeline of edit rules
#[derive(Parser, Debug)]
#[command(name = "massren")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output (NO_COLOR with any value other than a falsey one)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Rule set file (defaults to .massren/rules.toml or the config's rules_file)
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Log debug output to stderr (MASSREN_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Items to run the rules over
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Files to rename, or plain names with --names. Missing files count as empty entries.
    #[arg(required = true, num_args = 1..)]
    pub items: Vec<String>,

    /// Treat items as plain object names instead of files (no extension handling)
    #[arg(long)]
    pub names: bool,

    /// Drop empty entries before running
    #[arg(long)]
    pub remove_empties: bool,

    /// Drop repeated entries before running, keeping the first
    #[arg(long)]
    pub remove_duplicates: bool,
}

/// Rule fields shared by `rules add` and `rules edit`
#[derive(Args, Debug, Clone, Default)]
pub struct RuleFieldArgs {
    /// Rename: new base name
    #[arg(long, allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Rename: text between the new name and the sequence number
    #[arg(long, allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Rename: minimum width of the sequence number (0 disables numbering)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=8))]
    pub digits: Option<u8>,

    /// Replace: text to search for
    #[arg(long, allow_hyphen_values = true)]
    pub search: Option<String>,

    /// Replace: text to put in its place
    #[arg(long, allow_hyphen_values = true)]
    pub replace_with: Option<String>,

    /// Insert: text to insert
    #[arg(long, allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Insert: character offset
    #[arg(long)]
    pub index: Option<usize>,

    /// Insert: count the offset from the end of the name
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub reverse: Option<bool>,
}

impl From<RuleFieldArgs> for RuleChanges {
    fn from(args: RuleFieldArgs) -> Self {
        Self {
            name: args.name,
            suffix: args.suffix,
            digits: args.digits,
            search: args.search,
            replace_with: args.replace_with,
            text: args.text,
            index: args.index,
            reverse: args.reverse,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what the rules would do to the items without renaming anything
    Preview {
        #[command(flatten)]
        items: ItemArgs,

        /// Preview output format (defaults from config if not specified)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Rename the items
    Apply {
        #[command(flatten)]
        items: ItemArgs,

        /// Preview format shown before small batches are applied
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long)]
        quiet: bool,
    },

    /// Manage the rule set
    Rules {
        #[command(subcommand)]
        action: RulesCommand,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary", global = true)]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List rules in execution order
    List,

    /// Append a rule
    Add {
        /// Kind of rule to add
        #[arg(value_enum)]
        kind: KindArg,

        #[command(flatten)]
        fields: RuleFieldArgs,

        /// Add the rule switched off
        #[arg(long)]
        disabled: bool,
    },

    /// Change a rule's settings
    Edit {
        /// Zero-based rule position
        position: usize,

        /// Switch the rule to another kind (resets its settings)
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[command(flatten)]
        fields: RuleFieldArgs,
    },

    /// Append a copy of a rule
    Duplicate {
        /// Zero-based rule position
        position: usize,
    },

    /// Remove a rule
    Remove {
        /// Zero-based rule position
        position: usize,
    },

    /// Move a rule to another position
    Move {
        /// Zero-based rule position
        position: usize,

        /// Move one place towards the front
        #[arg(long, conflicts_with_all = ["down", "to"])]
        up: bool,

        /// Move one place towards the back
        #[arg(long, conflicts_with = "to")]
        down: bool,

        /// Target position
        #[arg(long, required_unless_present_any = ["up", "down"])]
        to: Option<usize>,
    },

    /// Switch a rule on
    Enable {
        /// Zero-based rule position
        position: usize,
    },

    /// Switch a rule off
    Disable {
        /// Zero-based rule position
        position: usize,
    },

    /// Remove every rule
    Clear,
}
