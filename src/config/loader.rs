//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SupportConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SupportConfig, ConfigError> {
    let config: SupportConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SupportConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[server\nbind_address = 1").unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let raw = r#"
            [server]
            bind_address = "bad"
            request_timeout_secs = 0
        "#;
        let err = parse_config(raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid bind address 'bad'"));
        assert!(msg.contains("server.request_timeout_secs must be greater than zero"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("support_box_loader_test.toml");
        fs::write(&path, "[donation]\nconfirmation_timeout_secs = 60\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.donation.confirmation_timeout_secs, 60);
        fs::remove_file(&path).unwrap_or_default();
    }
}
