//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for Quill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Git configuration
    pub git: GitConfig,
}

/// Changelog configuration
///
/// Everything here is an override on top of the built-in preset; see
/// [`ChangelogSettings::from_config`](super::ChangelogSettings::from_config)
/// for the merge rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to the target directory
    pub file: PathBuf,

    /// Title rendered as the first line of the file
    pub title: String,

    /// Description rendered below the title
    pub description: String,

    /// Explicit subset of type codes to keep (all preset types when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,

    /// Label and description overrides, keyed by type code
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, TypeOverride>,

    /// Type codes that never appear in the changelog
    pub ignore_types: Vec<String>,

    /// Commit heads to skip, as `/regex/flags` or plain literals
    pub ignore_patterns: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(super::defaults::DEFAULT_CHANGELOG_FILE),
            title: super::defaults::DEFAULT_TITLE.to_string(),
            description: super::defaults::DEFAULT_DESCRIPTION.to_string(),
            types: None,
            labels: BTreeMap::new(),
            ignore_types: super::defaults::default_ignore_types(),
            ignore_patterns: super::defaults::default_ignore_patterns(),
        }
    }
}

/// Override for a single commit type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeOverride {
    /// Heading used in the changelog
    pub label: Option<String>,

    /// Long-form description of the type
    pub description: Option<String>,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote whose URL is used for commit and compare links
    pub remote: String,

    /// Commit message template for release commits
    pub commit_message: String,

    /// Tag format (e.g., "v{version}")
    pub tag_format: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            commit_message: "chore(release): {version}".to_string(),
            tag_format: "v{version}".to_string(),
        }
    }
}

impl GitConfig {
    /// Render the tag name for a version
    pub fn tag_for(&self, version: &str) -> String {
        self.tag_format.replace("{version}", version)
    }

    /// Render the release commit message for a version
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }
}
