//! Configuration file loading and error types.

use std::{fs, path::Path};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format: {0:?} (expected json, jsonc, yaml, yml or toml)")]
    UnsupportedFormat(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Config file syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON with `//` and `/* */` comments allowed.
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" | "jsonc" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }
}

/// Parse config text in the given syntax.
pub fn parse_config(data: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    match format {
        ConfigFormat::Json => {
            let stripped = json_comments::StripComments::new(data.as_bytes());
            Ok(serde_json::from_reader(stripped)?)
        }
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(data)?),
        ConfigFormat::Toml => Ok(toml::from_str(data)?),
    }
}

/// Load a config file; the format is checked before the file is read.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    parse_config(&fs::read_to_string(path)?, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_each_format() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = write(&dir, "c.toml", "[backend]\nkind = \"http\"\nurl = \"http://a/\"\n");
        assert_eq!(load_config(toml_path).unwrap().backend.kind, "http");

        let yaml_path = write(&dir, "c.yaml", "validator:\n  ip_version: ipv4\n");
        assert_eq!(load_config(yaml_path).unwrap().validator.ip_version, "ipv4");

        let json_path = write(
            &dir,
            "c.jsonc",
            "{\n  // controller\n  \"backend\": {\"codec\": \"bincode\"}\n}\n",
        );
        assert_eq!(load_config(json_path).unwrap().backend.codec, "bincode");
    }

    #[test]
    fn unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "c.ini", "");
        assert!(matches!(load_config(path), Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"));

        // Rejected before any read, so the file need not exist.
        assert!(matches!(
            load_config(dir.path().join("absent.conf")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_from_extension_ignores_case() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.Yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.jsonc")).unwrap(), ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Path::new("routerrules")).is_err());
    }

    #[test]
    fn parse_config_reports_syntax_errors() {
        assert!(matches!(
            parse_config("[backend", ConfigFormat::Toml),
            Err(ConfigError::Toml(_))
        ));
        let cfg = parse_config("{\"logging\": {\"level\": \"warn\"}}", ConfigFormat::Json).unwrap();
        assert_eq!(cfg.logging.level.as_deref(), Some("warn"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
