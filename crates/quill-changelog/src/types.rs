//! Changelog types

use std::collections::BTreeMap;

use quill_core::config::BREAKING_CHANGES;
use quill_git::RawCommit;
use serde::Serialize;

use crate::text::dedup_key;

/// A commit accepted into the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    /// The commit as read from the repository
    pub commit: RawCommit,
    /// Type code it was filed under
    pub type_code: String,
    /// Normalized scope label
    pub context: Option<String>,
    /// Cleaned description
    pub description: String,
}

impl ClassifiedCommit {
    /// Key under which duplicate entries are merged
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            type_code: self.type_code.clone(),
            context: self.context.clone(),
            normalized: dedup_key(&self.description),
        }
    }

    /// Whether the commit was filed under breaking changes
    pub fn is_breaking(&self) -> bool {
        self.type_code == BREAKING_CHANGES
    }

    /// Link to this commit
    pub fn link(&self) -> CommitLink {
        CommitLink {
            short_hash: self.commit.short_hash.clone(),
            hash: self.commit.hash.clone(),
        }
    }
}

/// Identity of a changelog line
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DedupKey {
    pub type_code: String,
    pub context: Option<String>,
    pub normalized: String,
}

/// A commit hash listed on a changelog line
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CommitLink {
    pub short_hash: String,
    pub hash: String,
}

impl CommitLink {
    /// Web URL of the commit under a repository URL
    pub fn url(&self, repo_url: &str) -> String {
        format!("{}/commit/{}", repo_url, self.hash)
    }
}

/// One bullet: a description and every commit that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub description: String,
    pub links: Vec<CommitLink>,
}

/// Entries of one context, keyed by normalized description
pub type ContextEntries = BTreeMap<String, Entry>;

/// All entries filed under one type code
///
/// The contextless bucket is the `None` key, which sorts before every named
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    pub code: String,
    pub contexts: BTreeMap<Option<String>, ContextEntries>,
}

impl TypeGroup {
    /// Create an empty group
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            contexts: BTreeMap::new(),
        }
    }

    /// Whether nothing was filed under this type
    pub fn is_empty(&self) -> bool {
        self.contexts.values().all(|entries| entries.is_empty())
    }

    /// Number of bullets in the group
    pub fn entry_count(&self) -> usize {
        self.contexts.values().map(|entries| entries.len()).sum()
    }
}

/// Classified commits organized for rendering
///
/// Holds one group per configured type, in table order, including empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedChangelog {
    pub groups: Vec<TypeGroup>,
}

impl GroupedChangelog {
    /// Look up a group by type code
    pub fn group(&self, code: &str) -> Option<&TypeGroup> {
        self.groups.iter().find(|g| g.code == code)
    }

    /// Whether every group is empty
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(TypeGroup::is_empty)
    }

    /// Total number of bullets
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(TypeGroup::entry_count).sum()
    }

    /// Whether anything was filed under the given type
    pub fn has_entries(&self, code: &str) -> bool {
        self.group(code).is_some_and(|g| !g.is_empty())
    }
}
