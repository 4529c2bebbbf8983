//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override backend kind (memory, http)
    #[arg(long, global = true)]
    pub backend_kind: Option<String>,
    /// Override policy service base URL; implies the http backend
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
    /// Override bearer token sent to the policy service
    #[arg(long, global = true, env = "ROUTERRULES_BACKEND_TOKEN", hide_env_values = true)]
    pub backend_token: Option<String>,
    /// Override request body codec (json, bincode)
    #[arg(long, global = true)]
    pub backend_codec: Option<String>,
    /// Override backend request timeout (seconds)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    /// Override accepted IP family (any, ipv4, ipv6)
    #[arg(long, global = true)]
    pub ip_version: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Override log format (json, pretty, compact)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.backend_url {
        config.backend.url = Some(v.clone());
        config.backend.kind = "http".into();
    }
    if let Some(v) = &overrides.backend_kind {
        config.backend.kind = v.clone();
    }
    if let Some(v) = &overrides.backend_token {
        config.backend.token = Some(v.clone());
    }
    if let Some(v) = &overrides.backend_codec {
        config.backend.codec = v.clone();
    }
    if let Some(v) = overrides.timeout_secs {
        config.backend.timeout_secs = v;
    }
    if let Some(v) = &overrides.ip_version {
        config.validator.ip_version = v.clone();
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
}
