use anyhow::Result;
use massren_core::{rules_operation, OutputFormatter, RulesAction};
use std::path::Path;

use crate::cli::RulesCommand;
use crate::OutputFormat;

impl From<RulesCommand> for RulesAction {
    fn from(command: RulesCommand) -> Self {
        match command {
            RulesCommand::List => Self::List,
            RulesCommand::Add {
                kind,
                fields,
                disabled,
            } => Self::Add {
                kind: kind.into(),
                changes: fields.into(),
                disabled,
            },
            RulesCommand::Edit {
                position,
                kind,
                fields,
            } => Self::Edit {
                position,
                kind: kind.map(Into::into),
                changes: fields.into(),
            },
            RulesCommand::Duplicate { position } => Self::Duplicate { position },
            RulesCommand::Remove { position } => Self::Remove { position },
            RulesCommand::Move {
                position,
                up,
                down,
                to,
            } => match (up, down, to) {
                (true, _, _) => Self::MoveUp { position },
                (_, true, _) => Self::MoveDown { position },
                (_, _, Some(to)) => Self::Move { from: position, to },
                // clap requires one of the three
                (false, false, None) => Self::List,
            },
            RulesCommand::Enable { position } => Self::Enable { position },
            RulesCommand::Disable { position } => Self::Disable { position },
            RulesCommand::Clear => Self::Clear,
        }
    }
}

pub fn handle_rules(command: RulesCommand, rules_path: &Path, output: OutputFormat) -> Result<()> {
    let result = rules_operation(rules_path, command.into())?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(())
}
