use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use massren_core::{Config, OutputFormatter, Preview, RuleSetError, RulesError, VersionResult};
use std::io;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

mod apply;
mod cli;
mod fs_host;
mod items;
mod preview;
mod rules;

use cli::{Cli, Commands, OutputFormat};

/// Some items of a batch could not be processed; the rest were.
#[derive(Debug, thiserror::Error)]
#[error("{failed} of {total} items failed")]
pub struct ItemsFailed {
    pub failed: usize,
    pub total: usize,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MASSREN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {e:#}");
        Config::default()
    });

    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };
    let rules_path = cli
        .rules
        .clone()
        .unwrap_or_else(|| config.defaults.rules_file.clone());

    let result = match cli.command {
        Commands::Preview {
            items,
            preview,
            output,
        } => {
            let format = preview_format(preview, &config);
            preview::handle_preview(&items, &rules_path, format, output, use_color)
        },

        Commands::Apply {
            items,
            preview,
            output,
            quiet,
        } => {
            let auto_preview = config
                .auto_preview(items.items.len())
                .then(|| preview_format(preview, &config));
            apply::handle_apply(
                &items,
                &apply::ApplyArgs {
                    rules_path: &rules_path,
                    auto_preview,
                    output,
                    quiet,
                    use_color,
                },
            )
        },

        Commands::Rules { action, output } => rules::handle_rules(action, &rules_path, output),

        Commands::Completions { shell, out_dir } => handle_completions(shell, out_dir),

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// Preview format from the CLI arg, else the config default, else a table.
fn preview_format(arg: Option<cli::PreviewArg>, config: &Config) -> Preview {
    arg.map(Into::into).unwrap_or_else(|| {
        Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table)
    })
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ItemsFailed>().is_some() {
        return 1;
    }

    let invalid_input = error.chain().any(|cause| {
        cause.is::<RulesError>()
            || matches!(
                cause.downcast_ref::<RuleSetError>(),
                Some(RuleSetError::Parse { .. })
            )
    });
    if invalid_input {
        2
    } else {
        3
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_completions(shell: clap_complete::Shell, out_dir: Option<PathBuf>) -> Result<()> {
    let mut cmd = Cli::command();
    match out_dir {
        Some(dir) => generate_completions(shell, &mut cmd, "massren", &dir),
        None => {
            clap_complete::generate(shell, &mut cmd, "massren", &mut io::stdout());
            Ok(())
        },
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "massren".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
