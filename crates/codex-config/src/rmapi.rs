//! RM API connection settings
//!
//! A tenant's RM API access is described by three values: the customer id,
//! the API key sent as `X-Api-Key`, and the base URL of the RM API host.
//! They come either from the `[rmapi]` table of the config file or from a
//! configuration-module response:
//!
//! ```json
//! {
//!   "configs": [
//!     { "code": "kb.ebsco.customerId", "value": "examplecorp" },
//!     { "code": "kb.ebsco.apiKey", "value": "8675309" },
//!     { "code": "kb.ebsco.url", "value": "https://rmapi.example.com" }
//!   ],
//!   "totalRecords": 3
//! }
//! ```

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Config entry code carrying the customer id
pub const CUSTOMER_ID_CODE: &str = "kb.ebsco.customerId";
/// Config entry code carrying the API key
pub const API_KEY_CODE: &str = "kb.ebsco.apiKey";
/// Config entry code carrying the RM API base URL
pub const URL_CODE: &str = "kb.ebsco.url";

/// Connection settings for one tenant's RM API account.
///
/// `Debug` and `Display` never print the API key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmApiConfig {
    /// RM API customer id
    #[serde(default)]
    pub customer_id: String,

    /// RM API key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the RM API host
    #[serde(default)]
    pub url: String,
}

/// One entry of a configuration-module response
#[derive(Debug, Clone, Deserialize)]
struct ConfigEntry {
    code: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigEntries {
    #[serde(default)]
    configs: Vec<ConfigEntry>,
}

impl RmApiConfig {
    /// Create settings from the three values
    pub fn new(
        customer_id: impl Into<String>,
        api_key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            api_key: api_key.into(),
            url: url.into(),
        }
    }

    /// Parse a configuration-module response body.
    ///
    /// Every one of the three codes must be present with a non-empty value.
    /// When a code appears more than once the first value wins.
    pub fn from_config_entries(json: &str) -> ConfigResult<Self> {
        let entries: ConfigEntries = serde_json::from_str(json)?;
        if entries.configs.is_empty() {
            return Err(ConfigError::Missing {
                field: "configs".to_string(),
            });
        }

        let mut customer_id = None;
        let mut api_key = None;
        let mut url = None;

        for entry in entries.configs {
            let slot = match entry.code.as_str() {
                CUSTOMER_ID_CODE => &mut customer_id,
                API_KEY_CODE => &mut api_key,
                URL_CODE => &mut url,
                other => {
                    debug!(code = other, "Ignoring unrelated config entry");
                    continue;
                }
            };

            if slot.is_some() {
                warn!(code = %entry.code, "Duplicate RM API config entry, keeping the first value");
                continue;
            }
            *slot = entry.value;
        }

        let config = Self {
            customer_id: customer_id.unwrap_or_default(),
            api_key: api_key.unwrap_or_default(),
            url: url.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config.normalized())
    }

    /// Check that all three values are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("customer_id", &self.customer_id),
            ("api_key", &self.api_key),
            ("url", &self.url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing {
                    field: field.to_string(),
                });
            }
        }

        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.url),
            });
        }

        Ok(())
    }

    /// Copy with surrounding whitespace and trailing slashes removed
    pub fn normalized(&self) -> Self {
        Self {
            customer_id: self.customer_id.trim().to_string(),
            api_key: self.api_key.trim().to_string(),
            url: self.url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Titles endpoint of this account with the given query string appended
    pub fn titles_url(&self, query: &str) -> String {
        format!(
            "{}/rm/rmaccounts/{}/titles?{}",
            self.url.trim_end_matches('/'),
            self.customer_id,
            query
        )
    }
}

impl fmt::Display for RmApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RmApiConfig [customerId={}, apiKey=<redacted>, url={}]",
            self.customer_id, self.url
        )
    }
}

impl fmt::Debug for RmApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RmApiConfig")
            .field("customer_id", &self.customer_id)
            .field("api_key", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}
