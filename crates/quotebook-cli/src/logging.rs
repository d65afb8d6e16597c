//! Logging setup
//!
//! Logging is off unless QUOTEBOOK_LOG is set (to a level such as `debug`).
//! Output goes to a file so it never mixes with command output.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use quotebook_core::Config;

/// Environment variable holding the log level
const LOG_ENV: &str = "QUOTEBOOK_LOG";

/// Initialize file logging
///
/// Logs to config.log_file or {data_dir}/debug.log.
pub fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(filter_directive(&log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

fn filter_directive(level: &str) -> String {
    let level = if level.trim().is_empty() {
        "info"
    } else {
        level.trim()
    };
    format!("quotebook_core={},quotebook_cli={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive("debug"),
            "quotebook_core=debug,quotebook_cli=debug"
        );
        assert_eq!(
            filter_directive(""),
            "quotebook_core=info,quotebook_cli=info"
        );
    }
}
