//! Sync command handler

use anyhow::{bail, Result};

use quotebook_core::sync::SyncOutcome;
use quotebook_core::{Config, Session};

use crate::output::{Output, OutputFormat};

/// Run one sync cycle against the remote endpoint
///
/// Runs even when periodic sync is disabled; `sync_enabled` only controls
/// the shell's timer.
pub async fn sync(session: &mut Session<Output>, config: &Config, output: &Output) -> Result<()> {
    if !output.is_json() {
        output.message(&format!("Fetching quotes from {}...", config.remote_url));
    }

    match session.sync_now().await {
        SyncOutcome::Merged(report) => match output.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "success",
                        "considered": report.considered,
                        "added": report.added,
                        "total": session.quotes().len(),
                        "completed_at": report.completed_at.to_rfc3339()
                    })
                );
            }
            OutputFormat::Quiet => {}
            OutputFormat::Human => {
                if report.added > 0 {
                    output.success(&format!(
                        "Quotes updated from server ({} new of {} fetched)",
                        report.added, report.considered
                    ));
                } else {
                    output.success("Already up to date");
                }
            }
        },
        SyncOutcome::Failed(reason) => {
            bail!("Sync failed: {}\nLocal quotes are unchanged.", reason);
        }
    }

    Ok(())
}
