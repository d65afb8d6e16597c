//! Interactive shell
//!
//! A long-running session: reads commands from stdin while a background
//! poller asks for a sync cycle every interval. Both feed the same loop, so
//! the session is only ever mutated from here.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use quotebook_core::sync::{spawn_sync_poller, PollerEvent, SyncOutcome, SyncPollerHandle};
use quotebook_core::{Config, FilterSelection, RenderedQuote, Session};

use super::quote::category_counts;
use super::transfer;
use crate::output::Output;

const HELP: &str = "\
Commands:
  random                    Show a random quote
  list                      Show quotes for the current filter
  filter <category|all>     Change the filter
  categories                List categories
  add <text> | <category>   Add a quote
  import <path>             Import quotes from a JSON file
  export [path]             Export quotes (default quotes.json, - for stdout)
  sync                      Sync with the remote now
  last                      Show the last random quote of this session
  help                      Show this help
  quit                      Leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Random,
    List,
    Filter(FilterSelection),
    Categories,
    Add { text: String, category: String },
    Import(PathBuf),
    Export(Option<PathBuf>),
    Sync,
    Last,
    Help,
    Quit,
    Empty,
}

/// Parse one line of shell input
pub fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "random" | "r" => ShellCommand::Random,
        "list" | "ls" => ShellCommand::List,
        "categories" => ShellCommand::Categories,
        "sync" => ShellCommand::Sync,
        "last" => ShellCommand::Last,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "filter" => {
            if rest.is_empty() {
                return Err("Usage: filter <category|all>".to_string());
            }
            ShellCommand::Filter(FilterSelection::parse(rest))
        }
        "add" => {
            let Some((text, category)) = rest.rsplit_once('|') else {
                return Err("Usage: add <text> | <category>".to_string());
            };
            ShellCommand::Add {
                text: text.trim().to_string(),
                category: category.trim().to_string(),
            }
        }
        "import" => {
            if rest.is_empty() {
                return Err("Usage: import <path>".to_string());
            }
            ShellCommand::Import(PathBuf::from(rest))
        }
        "export" => ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        other => return Err(format!("Unknown command: '{}'. Type 'help'.", other)),
    };

    Ok(command)
}

/// Run the interactive shell until `quit`, end of input or Ctrl-C
pub async fn run(mut session: Session<Output>, config: &Config, output: &Output) -> Result<()> {
    let mut poller = config
        .sync_enabled
        .then(|| spawn_sync_poller(config.sync_interval()));

    if !output.is_quiet() && !output.is_json() {
        println!("Quotebook shell. Type 'help' for commands.");
        println!();
    }
    session.show_filtered();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(output);

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_shell_command(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => execute(&mut session, command, output).await,
                    Err(message) => output.warn(&message),
                }
            }
            Some(PollerEvent::Tick) = next_tick(&mut poller) => {
                debug!("Scheduled sync tick");
                session.sync_now().await;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    if let Some(poller) = &poller {
        poller.shutdown().await;
    }
    info!("Shell closed");
    Ok(())
}

async fn execute(session: &mut Session<Output>, command: ShellCommand, output: &Output) {
    match command {
        ShellCommand::Random => {
            session.show_random();
        }
        ShellCommand::List => {
            session.show_filtered();
        }
        ShellCommand::Filter(selection) => {
            session.filter(selection);
        }
        ShellCommand::Categories => {
            let counts = category_counts(session.quotes(), session.categories());
            output.print_categories(&counts);
        }
        ShellCommand::Add { text, category } => {
            if let Err(e) = session.add_quote(&text, &category).await {
                output.warn(&e.to_string());
            }
        }
        ShellCommand::Import(path) => match std::fs::read_to_string(&path) {
            Ok(raw) => {
                if let Err(e) = session.import_document(&raw) {
                    output.warn(&format!("Import failed: {}", e));
                }
            }
            Err(e) => output.warn(&format!("Failed to read {:?}: {}", path, e)),
        },
        ShellCommand::Export(path) => {
            if let Err(e) = transfer::export(session, path, output) {
                output.warn(&format!("{:#}", e));
            }
        }
        ShellCommand::Sync => match session.sync_now().await {
            SyncOutcome::Merged(report) if report.added == 0 => {
                output.message("Already up to date.");
            }
            SyncOutcome::Merged(_) => {}
            SyncOutcome::Failed(reason) => output.warn(&format!("Sync failed: {}", reason)),
        },
        ShellCommand::Last => match session.last_viewed() {
            Some((_, quote)) => output.print_quote(&RenderedQuote::from(quote)),
            None => output.message("No quote viewed yet in this session."),
        },
        ShellCommand::Help => output.message(HELP),
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
}

/// Next poller tick, or never when periodic sync is off
async fn next_tick(poller: &mut Option<SyncPollerHandle>) -> Option<PollerEvent> {
    match poller {
        Some(poller) => poller.next_tick().await,
        None => std::future::pending().await,
    }
}

fn prompt(output: &Output) {
    if output.is_quiet() || output.is_json() {
        return;
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}
