//! Quotebook CLI
//!
//! Command-line interface for Quotebook - a local-first quote collection.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use quotebook_core::{Config, Session};

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Quotebook - Local-first quotes with remote sync")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session with periodic sync
    Shell,
    /// Show a random quote
    Random,
    /// List quotes, filtered by the saved or given category
    #[command(alias = "ls")]
    List {
        /// Filter by category ("all" for everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Set the saved category filter and show the result
    Filter {
        /// Category name, or "all"
        category: String,
    },
    /// List categories with quote counts
    Categories,
    /// Add a quote
    Add {
        /// Quote text
        text: String,
        /// Quote category
        category: String,
        /// Do not send the quote to the remote
        #[arg(long)]
        no_push: bool,
    },
    /// Import quotes from a JSON file
    Import {
        /// Path to a JSON array of {text, category}
        path: PathBuf,
    },
    /// Export all quotes as JSON
    Export {
        /// Output file ("-" for stdout)
        path: Option<PathBuf>,
    },
    /// Sync with the remote endpoint now
    Sync,
    /// Show status (counts, filter, storage, remote)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, remote_url, sync_enabled, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the session
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let mut config = Config::load_with_cli_override(config_path)?;
    logging::init_logging(&config);

    if let Some(Commands::Add { no_push: true, .. }) = &cli.command {
        config.push_enabled = false;
    }

    // The shell (default) renders through the session; one-shot commands
    // print their own results
    let command = cli.command.unwrap_or(Commands::Shell);
    if matches!(command, Commands::Shell) {
        let session = Session::open(&config, output)?;
        report_storage_issue(&session, &output);
        return commands::shell::run(session, &config, &output).await;
    }

    let mut session = Session::open(&config, output.muted())?;
    report_storage_issue(&session, &output);

    match command {
        Commands::Shell | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Random => commands::quote::random(&mut session, &output),
        Commands::List { category } => commands::quote::list(&mut session, category, &output),
        Commands::Filter { category } => commands::quote::filter(&mut session, category, &output),
        Commands::Categories => commands::quote::categories(&session, &output),
        Commands::Add { text, category, .. } => {
            commands::quote::add(&mut session, text, category, &output).await
        }
        Commands::Import { path } => commands::transfer::import(&mut session, &path, &output),
        Commands::Export { path } => commands::transfer::export(&session, path, &output),
        Commands::Sync => commands::sync::sync(&mut session, &config, &output).await,
        Commands::Status => commands::status::show(&session, &config, &output),
    }
}

fn report_storage_issue(session: &Session<Output>, output: &Output) {
    if let Some(error) = session.storage_issue() {
        output.storage_issue(error, session.storage_stats().is_persistent());
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
