//! Configuration validation logic.

use routerrules_rules::IpVersion;

use crate::Config;
use crate::loader::ConfigError;

const BACKEND_KINDS: [&str; 2] = ["memory", "http"];
const BACKEND_CODECS: [&str; 2] = ["json", "bincode"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];
const LOG_OUTPUTS: [&str; 2] = ["stdout", "stderr"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let backend = &config.backend;
    if !BACKEND_KINDS.contains(&backend.kind.as_str()) {
        return Err(ConfigError::Validation(format!(
            "backend.kind must be one of: {:?}",
            BACKEND_KINDS
        )));
    }
    if backend.kind == "http" {
        match backend.url.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ConfigError::Validation(
                    "backend.url is required for the http backend".into(),
                ));
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                return Err(ConfigError::Validation(
                    "backend.url must start with http:// or https://".into(),
                ));
            }
            Some(_) => {}
        }
    }
    if !BACKEND_CODECS.contains(&backend.codec.as_str()) {
        return Err(ConfigError::Validation(format!(
            "backend.codec must be one of: {:?}",
            BACKEND_CODECS
        )));
    }
    if backend.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "backend.timeout_secs must be > 0".into(),
        ));
    }

    config
        .validator
        .ip_version
        .parse::<IpVersion>()
        .map_err(|e| ConfigError::Validation(format!("validator.ip_version: {e}")))?;

    if let Some(format) = config.logging.format.as_deref() {
        if !LOG_FORMATS.contains(&format) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of: {:?}",
                LOG_FORMATS
            )));
        }
    }
    if let Some(output) = config.logging.output.as_deref() {
        if !LOG_OUTPUTS.contains(&output) {
            return Err(ConfigError::Validation(format!(
                "logging.output must be one of: {:?}",
                LOG_OUTPUTS
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config() -> Config {
        let mut cfg = Config::default();
        cfg.backend.kind = "http".into();
        cfg.backend.url = Some("https://controller.example/v1".into());
        cfg
    }

    fn validation_message(cfg: &Config) -> String {
        match validate_config(cfg) {
            Err(ConfigError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        validate_config(&Config::default()).unwrap();
        validate_config(&http_config()).unwrap();
    }

    #[test]
    fn unknown_backend_kind() {
        let mut cfg = Config::default();
        cfg.backend.kind = "sql".into();
        assert!(validation_message(&cfg).starts_with("backend.kind"));
    }

    #[test]
    fn http_requires_url() {
        let mut cfg = http_config();
        cfg.backend.url = None;
        assert!(validation_message(&cfg).contains("required"));

        cfg.backend.url = Some("  ".into());
        assert!(validation_message(&cfg).contains("required"));

        cfg.backend.url = Some("ftp://controller".into());
        assert!(validation_message(&cfg).contains("http://"));
    }

    #[test]
    fn codec_and_timeout() {
        let mut cfg = http_config();
        cfg.backend.codec = "protobuf".into();
        assert!(validation_message(&cfg).starts_with("backend.codec"));

        let mut cfg = http_config();
        cfg.backend.timeout_secs = 0;
        assert!(validation_message(&cfg).starts_with("backend.timeout_secs"));
    }

    #[test]
    fn ip_version_must_parse() {
        let mut cfg = Config::default();
        cfg.validator.ip_version = "ipv6".into();
        validate_config(&cfg).unwrap();

        cfg.validator.ip_version = "ipx".into();
        assert!(validation_message(&cfg).starts_with("validator.ip_version"));
    }

    #[test]
    fn logging_values() {
        let mut cfg = Config::default();
        cfg.logging.format = Some("xml".into());
        assert!(validation_message(&cfg).starts_with("logging.format"));

        let mut cfg = Config::default();
        cfg.logging.output = Some("syslog".into());
        assert!(validation_message(&cfg).starts_with("logging.output"));
    }
}
