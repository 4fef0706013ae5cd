//! Conventional-commit classifier
//!
//! Matches commit heads of the form `type(scope)!: description` against the
//! configured type table. Types are tried in table order and the first one
//! that matches wins, so a code that is a prefix of another only loses when
//! it is listed later.

use std::sync::LazyLock;

use quill_core::config::{ChangelogRules, BREAKING_CHANGES};
use quill_git::RawCommit;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::text::{clean_description, normalize_context, split_scope};
use crate::types::ClassifiedCommit;

/// Breaking-change footer in a commit body
static BREAKING_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^BREAKING[ -]CHANGE:").expect("Invalid regex"));

/// Result of classifying a commit head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub type_code: String,
    pub context: Option<String>,
    pub description: String,
    /// The head carried a `!` marker
    pub breaking: bool,
}

struct TypeMatcher {
    code: String,
    /// Whole prefix: code, optional scope, optional `!`/`:`, then whitespace
    prefix: Regex,
    /// The code itself plus any `!`/`:` right after it
    code_only: Regex,
}

impl TypeMatcher {
    fn new(code: &str) -> Option<Self> {
        let escaped = regex::escape(code);
        let prefix = Regex::new(&format!(r"(?i)^{}(?:\([^)]*\))?(!)?:?\s", escaped));
        let code_only = Regex::new(&format!(r"(?i)^{}[!:]*", escaped));

        match (prefix, code_only) {
            (Ok(prefix), Ok(code_only)) => Some(Self {
                code: code.to_string(),
                prefix,
                code_only,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(code, error = %e, "cannot match type code");
                None
            }
        }
    }
}

/// Classifies commit heads against a set of changelog rules
pub struct Classifier<'a> {
    rules: &'a ChangelogRules,
    matchers: Vec<TypeMatcher>,
}

impl<'a> Classifier<'a> {
    /// Build a classifier for the given rules
    pub fn new(rules: &'a ChangelogRules) -> Self {
        let matchers = rules
            .types()
            .iter()
            .filter_map(|t| TypeMatcher::new(&t.code))
            .collect();
        Self { rules, matchers }
    }

    /// Classify a commit head
    ///
    /// Returns `None` when the head is ignored or matches no type.
    pub fn classify(&self, head: &str) -> Option<Classification> {
        if self.rules.is_ignored(head) {
            debug!(head, "commit ignored by pattern");
            return None;
        }

        let Some((matcher, breaking)) = self.matchers.iter().find_map(|m| {
            m.prefix
                .captures(head)
                .map(|caps| (m, caps.get(1).is_some()))
        }) else {
            trace!(head, "no matching type");
            return None;
        };

        let rest = matcher.code_only.replace(head, "");
        let (scope, description) = split_scope(rest.trim_start());

        Some(Classification {
            type_code: matcher.code.clone(),
            context: scope.and_then(normalize_context),
            description: clean_description(description),
            breaking,
        })
    }

    /// Classify a commit, filing breaking changes under their own type
    ///
    /// A commit is breaking when its head has a `!` marker or its body has a
    /// `BREAKING CHANGE:` footer.
    pub fn classify_commit(&self, commit: &RawCommit) -> Option<ClassifiedCommit> {
        let classification = self.classify(&commit.head)?;

        let breaking_footer = commit
            .body
            .as_deref()
            .is_some_and(|body| BREAKING_FOOTER.is_match(body));
        let type_code = if classification.breaking || breaking_footer {
            BREAKING_CHANGES.to_string()
        } else {
            classification.type_code
        };

        trace!(hash = %commit.short_hash, type_code = %type_code, "classified commit");
        Some(ClassifiedCommit {
            commit: commit.clone(),
            type_code,
            context: classification.context,
            description: classification.description,
        })
    }

    /// Classify a batch, dropping commits that do not qualify
    pub fn classify_all<'c>(
        &self,
        commits: impl IntoIterator<Item = &'c RawCommit>,
    ) -> Vec<ClassifiedCommit> {
        commits
            .into_iter()
            .filter_map(|c| self.classify_commit(c))
            .collect()
    }
}
