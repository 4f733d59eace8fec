//! Config command handlers

use anyhow::{bail, Context, Result};

use telly_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "token_set": config.is_authenticated()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.api_url);
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  api_url: {}", config.api_url);
            println!(
                "  token:   {}",
                if config.is_authenticated() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "api_url" => {
            config.api_url = value.clone();
        }
        "token" => {
            config.token = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: api_url, token",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    // Never echo the token back
    if key == "token" {
        output.success("Set token");
    } else {
        output.success(&format!("Set {} = {}", key, value));
    }

    Ok(())
}
