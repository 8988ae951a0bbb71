//! Per-rule options and ambient settings.

use serde::{Deserialize, Serialize};

/// Options shared by all rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Variable names to which wrappers are typically assigned.
    #[serde(default = "default_wrapper_names")]
    pub wrapper_names: Vec<String>,

    /// Mount option property names to ignore (treated as valid).
    #[serde(default)]
    pub ignore_mount_options: Vec<String>,
}

fn default_wrapper_names() -> Vec<String> {
    vec!["wrapper".to_string()]
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            wrapper_names: default_wrapper_names(),
            ignore_mount_options: Vec::new(),
        }
    }
}

/// Ambient settings supplied by the host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit Vue Test Utils version, overriding filesystem detection.
    #[serde(default)]
    pub vtu_version: Option<String>,
}
