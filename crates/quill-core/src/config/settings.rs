//! Changelog settings: the type table, ignore rules and output metadata
//!
//! [`ChangelogSettings`] is the mutable form assembled from the preset and a
//! project's [`ChangelogConfig`]. Once assembled it is frozen into
//! [`ChangelogRules`], which is what the classifier, grouping engine and
//! renderer receive.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::defaults::{breaking_changes_type, preset_types, BREAKING_CHANGES};
use super::types::{ChangelogConfig, TypeOverride};

/// A commit type accepted in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Code written in commit heads (e.g. "feat")
    pub code: String,
    /// Heading rendered in the changelog
    pub label: String,
    /// Long-form description
    pub description: Option<String>,
}

impl TypeDefinition {
    /// Create a new type definition
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this is the breaking-changes pseudo-type
    pub fn is_breaking(&self) -> bool {
        self.code == BREAKING_CHANGES
    }

    fn apply(&mut self, patch: &TypeOverride) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}

/// Ordered collection of type definitions
///
/// Order is significant: it is the heading order in the output and the
/// tie-break when several codes match the same commit head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeTable {
    types: Vec<TypeDefinition>,
}

impl TypeTable {
    /// Build a table, keeping the first definition of any repeated code
    pub fn new(types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut table = Self::default();
        for definition in types {
            if table.contains(&definition.code) {
                debug!(code = %definition.code, "dropping duplicate type definition");
                continue;
            }
            table.types.push(definition);
        }
        table
    }

    /// Iterate definitions in table order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    /// Look up a definition by code
    pub fn get(&self, code: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.code == code)
    }

    /// Check whether a code is present
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Codes in table order
    pub fn codes(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.code.as_str()).collect()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn retain(&mut self, keep: impl FnMut(&TypeDefinition) -> bool) {
        self.types.retain(keep);
    }

    /// Move the breaking-changes definition to the front, creating it if absent
    fn ensure_breaking_first(&mut self) {
        let breaking = match self.types.iter().position(TypeDefinition::is_breaking) {
            Some(index) => self.types.remove(index),
            None => breaking_changes_type(),
        };
        self.types.insert(0, breaking);
    }
}

impl<'a> IntoIterator for &'a TypeTable {
    type Item = &'a TypeDefinition;
    type IntoIter = std::slice::Iter<'a, TypeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

/// A compiled ignore rule for commit heads
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    source: String,
    regex: Regex,
}

impl IgnorePattern {
    /// Compile a configured entry
    ///
    /// `/expr/flags` entries are compiled as regular expressions (flags among
    /// `i`, `m`, `s`, `x`). Anything else, including delimited entries that
    /// fail to compile, is matched as a whole, case-insensitive literal.
    pub fn parse(source: &str) -> Option<Self> {
        if let Some(regex) = delimited_regex(source) {
            return Some(Self {
                source: source.to_string(),
                regex,
            });
        }

        match Regex::new(&format!("(?i)^{}$", regex::escape(source))) {
            Ok(regex) => Some(Self {
                source: source.to_string(),
                regex,
            }),
            Err(e) => {
                warn!(pattern = source, error = %e, "dropping ignore pattern");
                None
            }
        }
    }

    /// The entry as it was configured
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Test a commit head against the rule
    pub fn is_match(&self, head: &str) -> bool {
        self.regex.is_match(head)
    }
}

fn delimited_regex(source: &str) -> Option<Regex> {
    let body = source.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (expr, flags) = (&body[..end], &body[end + 1..]);

    if expr.is_empty() || !flags.chars().all(|c| "imsx".contains(c)) {
        return None;
    }

    let pattern = if flags.is_empty() {
        expr.to_string()
    } else {
        format!("(?{}){}", flags, expr)
    };

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern = source, error = %e, "invalid ignore pattern, matching it literally");
            None
        }
    }
}

/// Mutable changelog settings
#[derive(Debug, Clone)]
pub struct ChangelogSettings {
    types: TypeTable,
    ignore_types: Vec<String>,
    ignore_patterns: Vec<IgnorePattern>,
    title: String,
    description: String,
    file: PathBuf,
}

impl Default for ChangelogSettings {
    fn default() -> Self {
        Self::from_config(&ChangelogConfig::default())
    }
}

impl ChangelogSettings {
    /// Merge a project's overrides into the preset
    pub fn from_config(config: &ChangelogConfig) -> Self {
        let mut settings = Self {
            types: merge_types(preset_types(), config.types.as_deref(), &config.labels),
            ignore_types: Vec::new(),
            ignore_patterns: Vec::new(),
            title: config.title.clone(),
            description: config.description.clone(),
            file: config.file.clone(),
        };
        settings.set_ignore_types(config.ignore_types.iter().cloned());
        settings.set_ignore_patterns(&config.ignore_patterns);

        debug!(
            types = ?settings.types.codes(),
            ignore_patterns = settings.ignore_patterns.len(),
            "changelog settings assembled"
        );
        settings
    }

    /// Replace the type table
    ///
    /// Codes currently ignored are filtered out of the new table, and the
    /// breaking-changes pseudo-type is kept at the front.
    pub fn set_types(&mut self, types: impl IntoIterator<Item = TypeDefinition>) {
        self.types = TypeTable::new(types);
        self.drop_ignored_types();
        self.types.ensure_breaking_first();
    }

    /// Replace the ignored type codes and remove them from the type table
    pub fn set_ignore_types(&mut self, codes: impl IntoIterator<Item = String>) {
        self.ignore_types = codes
            .into_iter()
            .filter(|code| {
                if code == BREAKING_CHANGES {
                    warn!("breaking changes cannot be ignored");
                    false
                } else {
                    true
                }
            })
            .collect();
        self.drop_ignored_types();
    }

    /// Replace the ignore patterns
    pub fn set_ignore_patterns<S: AsRef<str>>(&mut self, patterns: &[S]) {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|p| IgnorePattern::parse(p.as_ref()))
            .collect();
    }

    /// Current type table
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Current ignored codes
    pub fn ignore_types(&self) -> &[String] {
        &self.ignore_types
    }

    /// Current ignore patterns
    pub fn ignore_patterns(&self) -> &[IgnorePattern] {
        &self.ignore_patterns
    }

    /// Freeze into the immutable rules used by the pipeline
    pub fn build(self) -> ChangelogRules {
        ChangelogRules {
            types: self.types,
            ignore_patterns: self.ignore_patterns,
            title: self.title,
            description: self.description,
            file: self.file,
        }
    }

    fn drop_ignored_types(&mut self) {
        let ignored = &self.ignore_types;
        self.types.retain(|t| !ignored.contains(&t.code));
    }
}

/// Apply the preset/subset/override merge rule
fn merge_types(
    preset: Vec<TypeDefinition>,
    subset: Option<&[String]>,
    labels: &BTreeMap<String, TypeOverride>,
) -> TypeTable {
    let mut types: Vec<TypeDefinition> = match subset {
        Some(codes) => {
            let mut kept: Vec<_> = preset
                .into_iter()
                .filter(|t| codes.contains(&t.code))
                .collect();
            for code in codes {
                if code != BREAKING_CHANGES && !kept.iter().any(|t| &t.code == code) {
                    kept.push(TypeDefinition::new(code.as_str(), default_label(code)));
                }
            }
            kept
        }
        None => preset,
    };

    types.retain(|t| !t.is_breaking());
    types.insert(0, breaking_changes_type());

    for definition in &mut types {
        if let Some(patch) = labels.get(&definition.code) {
            definition.apply(patch);
        }
    }

    TypeTable::new(types)
}

fn default_label(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Immutable changelog rules
#[derive(Debug, Clone)]
pub struct ChangelogRules {
    types: TypeTable,
    ignore_patterns: Vec<IgnorePattern>,
    title: String,
    description: String,
    file: PathBuf,
}

impl Default for ChangelogRules {
    fn default() -> Self {
        ChangelogSettings::default().build()
    }
}

impl ChangelogRules {
    /// Build rules straight from a config section
    pub fn from_config(config: &ChangelogConfig) -> Self {
        ChangelogSettings::from_config(config).build()
    }

    /// Accepted types in heading order
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Ignore patterns
    pub fn ignore_patterns(&self) -> &[IgnorePattern] {
        &self.ignore_patterns
    }

    /// Whether a commit head matches any ignore pattern
    pub fn is_ignored(&self, head: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.is_match(head))
    }

    /// Changelog title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Changelog description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Changelog file path
    pub fn file(&self) -> &Path {
        &self.file
    }
}
