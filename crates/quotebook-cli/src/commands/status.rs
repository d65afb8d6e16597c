//! Status command handler

use anyhow::Result;

use quotebook_core::{Config, Session};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(session: &Session<Output>, config: &Config, output: &Output) -> Result<()> {
    let stats = session.storage_stats();
    let categories = session.categories();
    let settings = session.engine().settings();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "quotes": session.quotes().len(),
                    "categories": categories,
                    "selection": session.selection().as_str(),
                    "selection_available": session.selection_available(),
                    "storage": {
                        "path": stats.path,
                        "persistent": stats.is_persistent(),
                        "exists": stats.exists,
                        "size": stats.size_bytes
                    },
                    "sync": {
                        "enabled": config.sync_enabled,
                        "interval_secs": config.sync_interval().as_secs(),
                        "remote_url": config.remote_url,
                        "fetch_limit": settings.fetch_limit,
                        "remote_category": settings.remote_category,
                        "push_enabled": settings.push_enabled
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", session.quotes().len());
        }
        OutputFormat::Human => {
            println!("Quotebook Status");
            println!("================");
            println!();
            println!("Contents:");
            println!("  Quotes:     {}", session.quotes().len());
            println!("  Categories: {}", categories.len());
            let selection_note = if session.selection_available() {
                ""
            } else {
                " (no matching quotes)"
            };
            println!("  Filter:     {}{}", session.selection(), selection_note);
            println!();
            println!("Sync:");
            println!(
                "  Status:   {}",
                if config.sync_enabled {
                    format!("every {}s", config.sync_interval().as_secs())
                } else {
                    "disabled".to_string()
                }
            );
            println!("  Remote:   {}", config.remote_url);
            println!(
                "  Fetch:    first {} record(s) as \"{}\"",
                settings.fetch_limit, settings.remote_category
            );
            println!(
                "  Push:     {}",
                if settings.push_enabled { "on" } else { "off" }
            );
            println!();
            println!("Storage:");
            match &stats.path {
                Some(path) => {
                    println!("  Location: {}", path.display());
                    if stats.exists {
                        println!("  Size:     {}", stats.size_human());
                    } else {
                        println!("  Size:     (not written yet)");
                    }
                }
                None => println!("  Location: memory only (changes are not saved)"),
            }
        }
    }

    Ok(())
}
