//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Whether a parsed settings document can be merged as configuration
///
/// Only mappings (and an empty document) are accepted; a bare scalar or
/// sequence is rejected before any merge is attempted.
pub fn is_settings_map(value: &serde_yaml::Value) -> bool {
    value.is_mapping() || value.is_null()
}

fn describe(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Parse a YAML settings document
pub fn parse_yaml_config(content: &str) -> Result<Config> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(ConfigError::YamlError)?;
    if !is_settings_map(&value) {
        return Err(ConfigError::NotAMapping(describe(&value).to_string()).into());
    }
    if value.is_null() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_value(value).map_err(ConfigError::YamlError)?)
}

/// Parse a TOML settings document
///
/// TOML documents are always tables at the top level, so only the nested
/// sections need checking, which deserialization does.
pub fn parse_toml_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content).map_err(ConfigError::TomlError)?)
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io(e),
    })?;

    let config = if format == "TOML" {
        parse_toml_config(&content)?
    } else {
        parse_yaml_config(&content)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `quill.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/quill.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration, falling back to defaults when no file exists
///
/// A file that exists but is invalid is an error rather than a silent
/// fallback.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuillError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.toml");
        std::fs::write(&config_path, "[git]\nremote = \"origin\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("quill.toml");
        let yaml_path = temp.path().join("quill.yaml");
        std::fs::write(&toml_path, "[git]\nremote = \"origin\"").unwrap();
        std::fs::write(&yaml_path, "git:\n  remote: origin").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("quill.toml");
        std::fs::write(&config_path, "[git]\nremote = \"origin\"").unwrap();

        assert_eq!(find_config(temp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".quill.yaml");
        std::fs::write(&config_path, "changelog:\n  title: History\n").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.toml");
        std::fs::write(
            &config_path,
            "[changelog]\ntypes = [\"feat\", \"fix\"]\nignore_types = []\n\n[changelog.labels.fix]\nlabel = \"Bug Fixes\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(
            config.changelog.types,
            Some(vec!["feat".to_string(), "fix".to_string()])
        );
        assert_eq!(
            config.changelog.labels["fix"].label.as_deref(),
            Some("Bug Fixes")
        );
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("quill.yaml");
        std::fs::write(
            &config_path,
            "changelog:\n  file: HISTORY.md\ngit:\n  remote: upstream\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.changelog.file, PathBuf::from("HISTORY.md"));
        assert_eq!(config.git.remote, "upstream");
    }

    #[test]
    fn test_non_mapping_settings_rejected() {
        let result = parse_yaml_config("- feat\n- fix\n");
        assert!(matches!(
            result,
            Err(QuillError::Config(ConfigError::NotAMapping(_)))
        ));

        let result = parse_yaml_config("just a string");
        assert!(matches!(
            result,
            Err(QuillError::Config(ConfigError::NotAMapping(_)))
        ));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = parse_yaml_config("").unwrap();
        assert_eq!(config.git.tag_format, "v{version}");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("quill.toml"));
        assert!(matches!(
            result,
            Err(QuillError::Config(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    fn test_invalid_file_is_an_error_not_a_fallback() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("quill.toml"),
            "[git]\ntag_format = \"release\"\n",
        )
        .unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.changelog.title, "Changelog");
    }
}
