use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use codex_cli::{
    cli::{Cli, Commands},
    commands,
};
use codex_config::CodexConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. RUST_LOG wins over the flags when set.
    let level: LevelFilter = match (cli.log_level, cli.verbose) {
        (Some(level), _) => level.into(),
        (None, true) => LevelFilter::DEBUG,
        (None, false) => LevelFilter::OFF,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CodexConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(
        explicit_path = ?cli.config,
        rmapi_configured = config.rmapi.is_some(),
        default_limit = config.translate.default_limit,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Translate {
            query,
            offset,
            limit,
            format,
            urls,
        } => {
            debug!(%query, offset, ?limit, "Running translate command");
            commands::translate::execute(&config, &query, offset, limit, format, urls)
        }

        Commands::Parse { query, format } => {
            debug!(%query, "Running parse command");
            commands::parse::execute(&query, format)
        }

        Commands::Config(cmd) => {
            debug!("Running config command");
            commands::config::execute(&config, cmd)
        }
    }
}
