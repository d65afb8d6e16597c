//! Import and export command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quotebook_core::session::NOTHING_TO_IMPORT_MESSAGE;
use quotebook_core::transfer::EXPORT_FILE_NAME;
use quotebook_core::Session;

use crate::output::Output;

/// Import quotes from a JSON file
///
/// Entries without a text and category are skipped. Nothing is written when
/// the document is malformed or holds no valid entries.
pub fn import(session: &mut Session<Output>, path: &Path, output: &Output) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    let result = session
        .import_document(&raw)
        .with_context(|| format!("Failed to import {:?}", path))?;

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "imported": result.quotes.len(),
                "skipped": result.skipped,
                "total": session.quotes().len()
            })
        );
        return Ok(());
    }

    if result.is_empty() {
        output.warn(NOTHING_TO_IMPORT_MESSAGE);
        return Ok(());
    }

    output.success(&format!("Quotes imported! ({} added)", result.quotes.len()));
    if result.skipped > 0 {
        output.warn(&format!(
            "Skipped {} entr{} without text and category",
            result.skipped,
            if result.skipped == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}

/// Export every quote as a JSON document
///
/// Writes `quotes.json` in the current directory unless a path is given;
/// `-` writes to stdout.
pub fn export(session: &Session<Output>, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let document = session.export_document()?;

    match export_target(path) {
        None => println!("{}", document),
        Some(path) => {
            std::fs::write(&path, format!("{}\n", document))
                .with_context(|| format!("Failed to write export file: {:?}", path))?;
            output.success(&format!(
                "Exported {} quote(s) to {}",
                session.quotes().len(),
                path.display()
            ));
        }
    }
    Ok(())
}

/// Resolve where an export goes (`None` means stdout)
fn export_target(path: Option<PathBuf>) -> Option<PathBuf> {
    match path {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path),
        None => Some(PathBuf::from(EXPORT_FILE_NAME)),
    }
}
