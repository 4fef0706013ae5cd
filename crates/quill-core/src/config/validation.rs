//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    if changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty").into());
    }

    if changelog.title.trim().is_empty() {
        return Err(invalid("changelog.title", "title cannot be empty").into());
    }

    if let Some(types) = &changelog.types {
        let mut seen = Vec::with_capacity(types.len());
        for (i, code) in types.iter().enumerate() {
            if !is_valid_code(code) {
                return Err(invalid(
                    format!("changelog.types[{}]", i),
                    format!("'{}' must only contain letters, digits, '_' or '-'", code),
                )
                .into());
            }
            if seen.contains(&code) {
                return Err(invalid(
                    format!("changelog.types[{}]", i),
                    format!("duplicate type '{}'", code),
                )
                .into());
            }
            seen.push(code);
        }
    }

    for code in changelog.labels.keys() {
        if !is_valid_code(code) {
            return Err(invalid(
                format!("changelog.labels.{}", code),
                "type codes must only contain letters, digits, '_' or '-'",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }

    if !config.git.commit_message.contains("{version}") {
        return Err(invalid("git.commit_message", "must contain {version} placeholder").into());
    }

    if !config.git.tag_format.contains("{version}") {
        return Err(invalid("git.tag_format", "must contain {version} placeholder").into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_duplicate_types() {
        let mut config = Config::default();
        config.changelog.types = Some(vec!["feat".to_string(), "feat".to_string()]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_type_code() {
        let mut config = Config::default();
        config.changelog.types = Some(vec!["feat(core)".to_string()]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_invalid_tag_format() {
        let mut config = Config::default();
        config.git.tag_format = "no-placeholder".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_file() {
        let mut config = Config::default();
        config.changelog.file = Default::default();
        assert!(validate_config(&config).is_err());
    }
}
