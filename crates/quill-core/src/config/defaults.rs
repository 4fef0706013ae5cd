//! Default configuration values

use super::settings::TypeDefinition;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "quill.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "quill.yaml";

/// Default changelog file name
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Default changelog title
pub const DEFAULT_TITLE: &str = "Changelog";

/// Default changelog description
pub const DEFAULT_DESCRIPTION: &str =
    "All notable changes to this project will be documented in this file.";

/// Code of the pseudo-type that collects breaking changes
pub const BREAKING_CHANGES: &str = "breaking_changes";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".quill.toml",
        ".quill.yaml",
    ]
}

/// The pseudo-type rendered first in every release section
pub fn breaking_changes_type() -> TypeDefinition {
    TypeDefinition::new(BREAKING_CHANGES, "Breaking Changes")
        .with_description("Changes that may require consumers to adapt")
}

/// Built-in commit types, in heading order
pub fn preset_types() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition::new("feat", "Features").with_description("New features"),
        TypeDefinition::new("perf", "Performance Features")
            .with_description("Code changes that improve performance"),
        TypeDefinition::new("fix", "Fixes").with_description("Bugs and issues resolution"),
        TypeDefinition::new("refactor", "Refactoring")
            .with_description("Code changes that neither fix a bug nor add a feature"),
        TypeDefinition::new("docs", "Docs").with_description("Documentation changes"),
        TypeDefinition::new("chore", "Chores").with_description("Other changes"),
        TypeDefinition::new("build", "Build")
            .with_description("Changes to the build system or dependencies"),
        TypeDefinition::new("ci", "CI").with_description("Continuous integration changes"),
        TypeDefinition::new("revert", "Reverts").with_description("Reverted commits"),
        TypeDefinition::new("style", "Styles")
            .with_description("Changes that do not affect the meaning of the code"),
        TypeDefinition::new("test", "Tests").with_description("Adding or correcting tests"),
    ]
}

/// Type codes hidden unless a project opts in
pub fn default_ignore_types() -> Vec<String> {
    ["build", "chore", "ci", "docs", "refactor", "revert", "style", "test"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Commit heads skipped by default (the release commits Quill creates itself)
pub fn default_ignore_patterns() -> Vec<String> {
    vec![r"/^chore\(release\):/i".to_string()]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Quill configuration

[changelog]
file = "CHANGELOG.md"
title = "Changelog"
description = "All notable changes to this project will be documented in this file."

# Keep only these commit types (all built-in types when omitted).
# types = ["feat", "perf", "fix"]

# Types that never appear in the changelog.
ignore_types = ["build", "chore", "ci", "docs", "refactor", "revert", "style", "test"]

# Commit heads to skip: "/regex/flags" or a plain string matched whole and case-insensitively.
ignore_patterns = ['/^chore\(release\):/i']

# [changelog.labels.feat]
# label = "New Features"

[git]
remote = "origin"
commit_message = "chore(release): {version}"
tag_format = "v{version}"
"#;
