//! # Codex Configuration Library
//!
//! Configuration for the CQL to RM API translator:
//!
//! - RM API connection settings (customer id, API key, base URL), loaded from a
//!   TOML file, environment overrides, or a configuration-module response
//! - Translation options (default page size, unknown publication type policy)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codex_config::CodexConfig;
//!
//! let config = CodexConfig::load(None)?;
//! if let Some(rmapi) = &config.rmapi {
//!     rmapi.validate()?;
//!     println!("{}", rmapi.titles_url("search=x"));
//! }
//! # Ok::<(), codex_config::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod loader;
mod rmapi;
mod translate;

pub use error::{ConfigError, ConfigResult};
pub use loader::*;
pub use rmapi::*;
pub use translate::*;
