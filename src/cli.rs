//! Command-line interface for routerrules.
//!
//! # Usage
//!
//! ```bash
//! # Check a rule without contacting the policy service
//! routerrules validate --action permit --source 10.0.0.0/24 --destination any
//!
//! # Add a rule, replacing the one at priority 5
//! routerrules --backend-url https://controller.example/v1 \
//!     add --router r1 --priority 9 --action permit \
//!     --source 10.0.0.0/24 --destination external --nexthops 10.0.0.1 --replace 5
//!
//! # Remove one rule / clear the whole policy
//! routerrules remove --router r1 --rule 9
//! routerrules reset --router r1
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use routerrules_config::{
    BackendConfig, CliOverrides, Config, LoggingConfig, apply_overrides, load_config,
    validate_config,
};
use routerrules_core::defaults::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_LOG_OUTPUT};
use routerrules_core::{PROJECT_NAME, VERSION};
use routerrules_manager::{OperationError, RuleManager};
use routerrules_rules::{IpVersion, RawRuleInput, RouterId, RuleId, RuleValidator};
use routerrules_store::{Codec, HttpBackend, MemoryBackend, RulePolicyBackend};
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Config file read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_PATH: &str = "routerrules.toml";

pub const ACTION_SUCCESS: &str = "Router policy action performed successfully.";
pub const RESET_SUCCESS: &str = "Router policy reset performed successfully.";

/// routerrules CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "routerrules",
    version,
    about = "Validate and apply router policy rules",
    propagate_version = true
)]
pub struct Cli {
    /// Config file path (json/jsonc/yaml/toml). Defaults to ./routerrules.toml when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Rule fields as typed by the operator.
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Rule priority, -1..=3000. Omit or pass -1 to append.
    #[arg(long, allow_hyphen_values = true)]
    pub priority: Option<String>,

    /// permit or deny.
    #[arg(long)]
    pub action: String,

    /// Source: CIDR, "any" or "external".
    #[arg(long)]
    pub source: String,

    /// Destination: CIDR, "any" or "external".
    #[arg(long)]
    pub destination: String,

    /// Comma-separated next-hop addresses. Ignored for deny rules.
    #[arg(long)]
    pub nexthops: Option<String>,
}

impl From<RuleArgs> for RawRuleInput {
    fn from(args: RuleArgs) -> Self {
        RawRuleInput {
            priority: args.priority,
            action: args.action,
            source: args.source,
            destination: args.destination,
            nexthops: args.nexthops,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate and normalize a rule, printing it as JSON.
    Validate {
        #[command(flatten)]
        rule: RuleArgs,
    },

    /// Submit a rule to a router's policy.
    Add {
        /// Router identifier.
        #[arg(short, long)]
        router: String,

        #[command(flatten)]
        rule: RuleArgs,

        /// Rule to delete before adding (replace workflow).
        #[arg(long)]
        replace: Option<String>,
    },

    /// Remove one rule from a router's policy.
    Remove {
        /// Router identifier.
        #[arg(short, long)]
        router: String,

        /// Rule identifier.
        #[arg(long)]
        rule: String,
    },

    /// Clear every rule of a router's policy.
    Reset {
        /// Router identifier.
        #[arg(short, long)]
        router: String,
    },
}

/// Run the CLI with parsed arguments.
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(cli.config.as_deref(), &cli.overrides)?;
    init_tracing(&config.logging);

    let ip_version: IpVersion = config.validator.ip_version.parse()?;
    let backend = build_backend(&config.backend)?;
    info!(
        version = VERSION,
        backend = %config.backend.kind,
        ip_version = ip_version.as_str(),
        "{PROJECT_NAME} starting"
    );

    let manager = RuleManager::with_validator(backend, RuleValidator::with_ip_version(ip_version));
    let output = execute(&manager, cli.command).await?;
    println!("{output}");
    Ok(())
}

/// Load the config file (if any), then apply overrides and validate.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

/// Build the configured backend.
pub fn build_backend(
    config: &BackendConfig,
) -> Result<Box<dyn RulePolicyBackend>, Box<dyn std::error::Error>> {
    match config.kind.as_str() {
        "http" => {
            let url = config
                .url
                .as_deref()
                .ok_or("backend.url is required for the http backend")?;
            let codec: Codec = config.codec.parse()?;
            let backend = HttpBackend::new(
                url,
                codec,
                config.token.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            debug!(url, codec = ?codec, "using http policy backend");
            Ok(Box::new(backend))
        }
        _ => {
            debug!("using in-memory policy backend, changes are not persisted");
            Ok(Box::new(MemoryBackend::new()))
        }
    }
}

/// Execute one command against `manager`, returning the text to print.
///
/// A failed removal during `add --replace` is reported on stderr but does
/// not fail the command.
pub async fn execute<B: RulePolicyBackend>(
    manager: &RuleManager<B>,
    command: Command,
) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Command::Validate { rule } => {
            let rule = manager
                .validate_and_normalize(&rule.into())
                .map_err(|e| format!("Invalid router rule ({}): {e}", e.kind()))?;
            Ok(serde_json::to_string_pretty(&rule)?)
        }
        Command::Add {
            router,
            rule,
            replace,
        } => {
            let router_id = RouterId::new(router)?;
            let replace = replace.map(RuleId::from);
            let submitted = manager
                .submit_rule(&router_id, &rule.into(), replace.as_ref())
                .await
                .map_err(|e| failure("Failed to add router rule", &e))?;
            if let Some(e) = submitted.removal_error() {
                eprintln!("Unable to delete router policy: {e}");
            }
            Ok(ACTION_SUCCESS.to_string())
        }
        Command::Remove { router, rule } => {
            let router_id = RouterId::new(router)?;
            manager
                .remove_rule(&router_id, &RuleId::from(rule))
                .await
                .map_err(|e| failure("Unable to delete router policy", &e))?;
            Ok(ACTION_SUCCESS.to_string())
        }
        Command::Reset { router } => {
            let router_id = RouterId::new(router)?;
            manager
                .reset_rules(&router_id)
                .await
                .map_err(|e| failure("Failed to reset router policy", &e))?;
            Ok(RESET_SUCCESS.to_string())
        }
    }
}

fn failure(context: &str, e: &OperationError) -> String {
    format!("{context} ({}): {e}", e.kind())
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(filter_directives(config))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let format = config.format.as_deref().unwrap_or(DEFAULT_LOG_FORMAT);
    let writer = match config.output.as_deref().unwrap_or(DEFAULT_LOG_OUTPUT) {
        "stdout" => BoxMakeWriter::new(io::stdout),
        _ => BoxMakeWriter::new(io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "json" => registry.with(fmt::layer().json().with_writer(writer)).init(),
        "compact" => registry.with(fmt::layer().compact().with_writer(writer)).init(),
        _ => registry.with(fmt::layer().with_writer(writer)).init(),
    }
}

/// Base level followed by `module=level` pairs, in `EnvFilter` syntax.
fn filter_directives(config: &LoggingConfig) -> String {
    let base = config.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    std::iter::once(base.to_string())
        .chain(
            config
                .filters
                .iter()
                .map(|(module, level)| format!("{module}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}
