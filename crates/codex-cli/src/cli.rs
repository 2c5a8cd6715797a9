use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including every accepted query constraint
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "codex")]
#[command(about = "codex - Translate CQL queries into RM API title searches")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, defaults to 'off' unless RUST_LOG is set
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/codex/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a CQL query into RM API query strings
    Translate {
        /// CQL query, e.g. 'title=dinosaurs and type=books sortby title'
        query: String,

        /// Zero-based index of the first wanted record
        #[arg(short, long, default_value = "0")]
        offset: u32,

        /// Number of records wanted (defaults to translate.default_limit)
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print full titles endpoint URLs (requires an [rmapi] config section)
        #[arg(long)]
        urls: bool,
    },

    /// Parse a CQL query and print its tree
    Parse {
        /// CQL query
        query: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current effective configuration (API key redacted)
    Show,

    /// Validate the RM API connection settings
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_translate_defaults() {
        let cli = Cli::parse_from(["codex", "translate", "title=a"]);
        match cli.command {
            Commands::Translate {
                offset,
                limit,
                format,
                urls,
                ..
            } => {
                assert_eq!(offset, 0);
                assert_eq!(limit, None);
                assert_eq!(format, OutputFormat::Text);
                assert!(!urls);
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["codex", "parse", "a", "--verbose", "-l", "trace"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_level, Some(LogLevel::Trace));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::OFF);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
    }
}
