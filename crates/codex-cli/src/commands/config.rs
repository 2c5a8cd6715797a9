use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::ConfigCommands;
use codex_config::CodexConfig;

/// Execute config subcommand
pub fn execute(config: &CodexConfig, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config),
        ConfigCommands::Check => check(config),
    }
}

/// Show the current effective configuration
fn show(config: &CodexConfig) -> Result<()> {
    print!("{}", config.to_redacted_toml());
    Ok(())
}

/// Validate the RM API section
fn check(config: &CodexConfig) -> Result<()> {
    let Some(rmapi) = &config.rmapi else {
        bail!("No RM API configuration: add an [rmapi] section or set CODEX_RMAPI_* variables");
    };

    rmapi.validate()?;

    println!("{} {}", "Valid:".green().bold(), rmapi.normalized());
    Ok(())
}
