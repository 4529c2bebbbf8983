//! Configuration type definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rule-set backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend kind: "memory" or "http". Default: memory
    #[serde(default = "default_backend_kind")]
    pub kind: String,
    /// Base URL of the policy service (required for http).
    #[serde(default)]
    pub url: Option<String>,
    /// Bearer token sent to the policy service.
    #[serde(default)]
    pub token: Option<String>,
    /// Request body codec: "json" or "bincode". Default: json
    #[serde(default = "default_backend_codec")]
    pub codec: String,
    /// Request timeout in seconds.
    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            url: None,
            token: None,
            codec: default_backend_codec(),
            timeout_secs: default_backend_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Accepted IP family for CIDRs and next hops: "any", "ipv4" or "ipv6".
    #[serde(default = "default_ip_version")]
    pub ip_version: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            ip_version: default_ip_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"routerrules_store": "debug", "reqwest": "warn"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
