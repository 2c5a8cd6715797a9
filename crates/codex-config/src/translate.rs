//! Translation options

use serde::{Deserialize, Serialize};

/// What to do with a `type=` value missing from the publication type table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPubTypePolicy {
    /// Fail the translation with an unsupported value error
    #[default]
    Reject,
    /// Filter on the RM API `unknown` resource type and log a warning
    MapToUnknown,
}

/// `[translate]` section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Page size used when the caller does not pass a limit
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Handling of unrecognised publication types
    #[serde(default)]
    pub unknown_pub_type: UnknownPubTypePolicy,
}

fn default_limit() -> u32 {
    10
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            unknown_pub_type: UnknownPubTypePolicy::default(),
        }
    }
}
