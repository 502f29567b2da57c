use std::io;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pe_cli::commands::{check, keys, path, show};
use pe_cli::{Cli, Commands, Settings};
use pe_term::StdinSource;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Keep stdout for command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let settings =
        Settings::load_from(cli.settings.as_deref()).context("failed to load settings")?;
    tracing::debug!(?settings, "loaded settings");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Some(Commands::Check { file }) => {
            check::run(&mut stdout, &settings.config_file(file.as_deref()))?;
        }
        Some(Commands::Show { file, json }) => {
            show::run(&mut stdout, &settings.config_file(file.as_deref()), json)?;
        }
        Some(Commands::Path { kind, at, file }) => {
            let at: DateTime<FixedOffset> = at.unwrap_or_else(|| Local::now().into());
            path::run(&mut stdout, &settings.config_file(file.as_deref()), kind, &at)?;
        }
        Some(Commands::Keys) => {
            let source = StdinSource::spawn().context("failed to read from stdin")?;
            keys::run(&mut stdout, source, settings.poll_interval())?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
