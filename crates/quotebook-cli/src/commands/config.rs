//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use quotebook_core::Config;

use crate::output::{Output, OutputFormat};

const VALID_KEYS: &str = "data_dir, remote_url, sync_enabled, sync_interval_secs, \
                          remote_fetch_limit, remote_category, push_enabled, \
                          request_timeout_secs, log_file";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!("  remote_url:           {}", config.remote_url);
            println!("  sync_enabled:         {}", config.sync_enabled);
            println!("  sync_interval_secs:   {}", config.sync_interval_secs);
            println!("  remote_fetch_limit:   {}", config.remote_fetch_limit);
            println!("  remote_category:      {}", config.remote_category);
            println!("  push_enabled:         {}", config.push_enabled);
            println!("  request_timeout_secs: {}", config.request_timeout_secs);
            println!(
                "  log_file:             {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "remote_url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                bail!("Invalid value for remote_url. Use an http:// or https:// URL.");
            }
            config.remote_url = value.to_string();
        }
        "sync_enabled" => {
            config.sync_enabled = value
                .parse()
                .context("Invalid value for sync_enabled. Use 'true' or 'false'.")?;
        }
        "sync_interval_secs" => {
            config.sync_interval_secs = positive(value, key)?;
        }
        "remote_fetch_limit" => {
            config.remote_fetch_limit = positive(value, key)? as usize;
        }
        "remote_category" => {
            let value = value.trim();
            if value.is_empty() {
                bail!("remote_category cannot be empty");
            }
            config.remote_category = value.to_string();
        }
        "push_enabled" => {
            config.push_enabled = value
                .parse()
                .context("Invalid value for push_enabled. Use 'true' or 'false'.")?;
        }
        "request_timeout_secs" => {
            config.request_timeout_secs = positive(value, key)?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }
    Ok(())
}

fn positive(value: &str, key: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("Invalid value for {}. Use a whole number above zero.", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();

        apply_setting(&mut config, "sync_interval_secs", "30").unwrap();
        apply_setting(&mut config, "remote_category", " Remote ").unwrap();
        apply_setting(&mut config, "push_enabled", "false").unwrap();
        apply_setting(&mut config, "log_file", "/tmp/quotebook.log").unwrap();

        assert_eq!(config.sync_interval_secs, 30);
        assert_eq!(config.remote_category, "Remote");
        assert!(!config.push_enabled);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/quotebook.log")));

        apply_setting(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        let mut config = Config::default();

        assert!(apply_setting(&mut config, "sync_interval_secs", "0").is_err());
        assert!(apply_setting(&mut config, "remote_fetch_limit", "many").is_err());
        assert!(apply_setting(&mut config, "remote_url", "ftp://example.com").is_err());
        assert!(apply_setting(&mut config, "sync_enabled", "yes").is_err());
        assert!(apply_setting(&mut config, "favorite_tag", "x").is_err());
        assert_eq!(config.sync_interval_secs, 60);
    }

    #[test]
    fn test_set_writes_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let data_dir = temp_dir.path().join("data");
        std::fs::write(
            &config_path,
            format!("data_dir = {:?}\n", data_dir.display().to_string()),
        )
        .unwrap();
        let output = Output::new(OutputFormat::Quiet);

        set(
            "remote_fetch_limit".to_string(),
            "3".to_string(),
            Some(&config_path),
            &output,
        )
        .unwrap();

        let saved = Config::load_from_path(&config_path).unwrap();
        assert_eq!(saved.remote_fetch_limit, 3);
        assert!(data_dir.exists());
    }
}
