//! Config file loading
//!
//! Resolution order, later wins:
//! 1. Built-in defaults
//! 2. Config file (`--config`, `CODEX_CONFIG`, or `~/.config/codex/config.toml`)
//! 3. `CODEX_RMAPI_*` environment variables

use crate::{ConfigResult, RmApiConfig, TranslateConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CODEX_CONFIG";
/// Environment override for [`RmApiConfig::customer_id`]
pub const CUSTOMER_ID_ENV: &str = "CODEX_RMAPI_CUSTOMER_ID";
/// Environment override for [`RmApiConfig::api_key`]
pub const API_KEY_ENV: &str = "CODEX_RMAPI_API_KEY";
/// Environment override for [`RmApiConfig::url`]
pub const URL_ENV: &str = "CODEX_RMAPI_URL";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodexConfig {
    /// RM API connection settings, if configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmapi: Option<RmApiConfig>,

    /// Translation options
    #[serde(default)]
    pub translate: TranslateConfig,
}

impl CodexConfig {
    /// Default config file location (`~/.config/codex/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codex").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `CODEX_CONFIG` and then the
    /// default location are tried, and a missing file yields the defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = env::var_os(CONFIG_PATH_ENV)
                    .map(PathBuf::from)
                    .or_else(Self::default_path);
                match candidate {
                    Some(candidate) if candidate.exists() => Self::from_file(&candidate)?,
                    Some(candidate) => {
                        debug!(path = %candidate.display(), "No config file, using defaults");
                        Self::default()
                    }
                    None => Self::default(),
                }
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config file without applying environment overrides
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse TOML config text
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay `CODEX_RMAPI_*` variables onto the RM API settings.
    ///
    /// Creates the `[rmapi]` section when only the environment provides it.
    pub fn apply_env_overrides(&mut self) {
        let overrides = [
            (CUSTOMER_ID_ENV, env::var(CUSTOMER_ID_ENV).ok()),
            (API_KEY_ENV, env::var(API_KEY_ENV).ok()),
            (URL_ENV, env::var(URL_ENV).ok()),
        ];
        if overrides.iter().all(|(_, value)| value.is_none()) {
            return;
        }

        let rmapi = self.rmapi.get_or_insert_with(RmApiConfig::default);
        for (name, value) in overrides {
            let Some(value) = value else { continue };
            debug!(variable = name, "Applying environment override");
            match name {
                CUSTOMER_ID_ENV => rmapi.customer_id = value,
                API_KEY_ENV => rmapi.api_key = value,
                _ => rmapi.url = value,
            }
        }
    }

    /// Render as TOML with the API key redacted
    pub fn to_redacted_toml(&self) -> String {
        let mut redacted = self.clone();
        if let Some(rmapi) = redacted.rmapi.as_mut() {
            if !rmapi.api_key.is_empty() {
                rmapi.api_key = "<redacted>".to_string();
            }
        }
        toml::to_string_pretty(&redacted).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, UnknownPubTypePolicy};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    const FULL: &str = r#"
[rmapi]
customer_id = "examplecorp"
api_key = "8675309"
url = "https://rmapi.example.com"

[translate]
default_limit = 25
unknown_pub_type = "map_to_unknown"
"#;

    fn clear_env() {
        for name in [CONFIG_PATH_ENV, CUSTOMER_ID_ENV, API_KEY_ENV, URL_ENV] {
            env::remove_var(name);
        }
    }

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        let mut file = fs::File::create(&path).expect("Failed to create file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write file");
        (temp_dir, path)
    }

    #[test]
    fn test_from_toml_full() {
        let config = CodexConfig::from_toml(FULL).unwrap();

        let rmapi = config.rmapi.expect("rmapi section missing");
        assert_eq!(rmapi.customer_id, "examplecorp");
        assert_eq!(rmapi.url, "https://rmapi.example.com");
        assert_eq!(config.translate.default_limit, 25);
        assert_eq!(
            config.translate.unknown_pub_type,
            UnknownPubTypePolicy::MapToUnknown
        );
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        let config = CodexConfig::from_toml("").unwrap();
        assert_eq!(config, CodexConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = CodexConfig::from_toml("[translate]\ndefault_limit = \"ten\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    #[serial]
    fn test_load_explicit_path() {
        clear_env();
        let (_dir, path) = write_config(FULL);

        let config = CodexConfig::load(Some(&path)).unwrap();
        assert_eq!(config.rmapi.unwrap().api_key, "8675309");
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_path_fails() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let result = CodexConfig::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    #[serial]
    fn test_load_env_path_missing_file_uses_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        env::set_var(CONFIG_PATH_ENV, temp_dir.path().join("absent.toml"));

        let config = CodexConfig::load(None).unwrap();
        assert_eq!(config, CodexConfig::default());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_values() {
        clear_env();
        let (_dir, path) = write_config(FULL);
        env::set_var(API_KEY_ENV, "from-env");

        let config = CodexConfig::load(Some(&path)).unwrap();
        let rmapi = config.rmapi.unwrap();
        assert_eq!(rmapi.api_key, "from-env");
        assert_eq!(rmapi.customer_id, "examplecorp");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_creates_rmapi_section() {
        clear_env();
        let (_dir, path) = write_config("");
        env::set_var(CUSTOMER_ID_ENV, "envcorp");
        env::set_var(URL_ENV, "https://env.example.com");

        let config = CodexConfig::load(Some(&path)).unwrap();
        let rmapi = config.rmapi.unwrap();
        assert_eq!(rmapi.customer_id, "envcorp");
        assert!(rmapi.api_key.is_empty());
        assert!(rmapi.validate().is_err());
        clear_env();
    }

    #[test]
    fn test_redacted_toml_hides_key() {
        let config = CodexConfig::from_toml(FULL).unwrap();
        let rendered = config.to_redacted_toml();

        assert!(rendered.contains("examplecorp"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("8675309"));
    }
}
