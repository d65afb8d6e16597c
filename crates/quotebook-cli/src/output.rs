//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! `Output` is also the terminal implementation of the display port the
//! session renders into.

use quotebook_core::{DisplayPort, RenderedQuote, StorageError};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// The output format
    pub format: OutputFormat,
    /// Suppress notifications and view refreshes (one-shot commands)
    pub muted: bool,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            muted: false,
        }
    }

    /// Copy of this output that ignores display-port calls
    pub fn muted(self) -> Self {
        Self {
            muted: true,
            ..self
        }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single quote
    pub fn print_quote(&self, quote: &RenderedQuote) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", quote.text);
                println!("Category: {}", quote.category);
            }
            OutputFormat::Json => {
                println!("{}", to_json(quote));
            }
            OutputFormat::Quiet => {
                println!("{}", quote.text);
            }
        }
    }

    /// Print a list of quotes
    pub fn print_quotes(&self, quotes: &[RenderedQuote]) {
        match self.format {
            OutputFormat::Human => {
                for (i, quote) in quotes.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    println!("{}", quote.text);
                    println!("Category: {}", quote.category);
                }
                println!("\n{} quote(s)", quotes.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(&quotes));
            }
            OutputFormat::Quiet => {
                for quote in quotes {
                    println!("{}", quote.text);
                }
            }
        }
    }

    /// Print a placeholder when there is nothing to show
    pub fn print_empty(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", message),
            OutputFormat::Json => println!("[]"),
            OutputFormat::Quiet => {}
        }
    }

    /// Print the category list
    pub fn print_categories(&self, categories: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories found.");
                    return;
                }
                for (name, count) in categories {
                    println!("{} ({})", name, count);
                }
                println!("\n{} categor{}", categories.len(), plural_y(categories.len()));
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                println!("{}", to_json(&json));
            }
            OutputFormat::Quiet => {
                for (name, _) in categories {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warn(&self, msg: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", msg);
        }
    }

    /// Report a storage problem the session recovered from
    pub fn storage_issue(&self, error: &StorageError, persistent: bool) {
        for line in storage_issue_lines(error, persistent) {
            self.warn(&line);
        }
    }
}

impl DisplayPort for Output {
    fn show_quote(&mut self, quote: &RenderedQuote) {
        if !self.muted {
            self.print_quote(quote);
        }
    }

    fn show_quotes(&mut self, quotes: &[RenderedQuote]) {
        if !self.muted {
            self.print_quotes(quotes);
        }
    }

    fn show_empty(&mut self, message: &str) {
        if !self.muted {
            self.print_empty(message);
        }
    }

    fn notify(&mut self, message: &str) {
        if !self.muted {
            self.message(message);
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn storage_issue_lines(error: &StorageError, persistent: bool) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    if let Some(suggestion) = error.recovery_suggestion() {
        lines.push(suggestion.to_string());
    }
    if !persistent {
        lines.push("Quotes are kept in memory only; changes will not be saved.".to_string());
    }
    lines
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
