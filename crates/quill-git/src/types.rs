//! Git types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of hex characters shown for abbreviated hashes
pub const SHORT_HASH_LEN: usize = 6;

/// A commit as read from the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Commit hash (full)
    pub hash: String,
    /// Abbreviated hash
    pub short_hash: String,
    /// First line of the message
    pub head: String,
    /// Remaining lines of the message
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl RawCommit {
    /// Create a new RawCommit
    pub fn new(
        hash: impl Into<String>,
        head: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(SHORT_HASH_LEN).collect();

        Self {
            hash,
            short_hash,
            head: head.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }

    /// Set the commit body; an empty body is stored as `None`
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        self
    }
}

/// Which commits to read
///
/// `since` excludes everything reachable from that revision (usually the
/// previous tag). Dates are inclusive and compared in UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRange {
    /// Revision whose history is excluded
    pub since: Option<String>,
    /// Earliest commit date to include
    pub from_date: Option<NaiveDate>,
    /// Latest commit date to include
    pub to_date: Option<NaiveDate>,
}

impl CommitRange {
    /// Every commit reachable from HEAD
    pub fn all() -> Self {
        Self::default()
    }

    /// Commits after a revision
    pub fn since(revision: impl Into<String>) -> Self {
        Self {
            since: Some(revision.into()),
            ..Self::default()
        }
    }

    /// Restrict to a date window
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }

    /// Whether a timestamp falls inside the date window
    pub fn contains_date(&self, timestamp: &DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        self.from_date.map_or(true, |from| date >= from) && self.to_date.map_or(true, |to| date <= to)
    }
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Extracted version from tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            message: None,
            version,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Extract version from a tag name
fn extract_version(tag: &str) -> Option<String> {
    // Handle common tag formats: v1.0.0, 1.0.0, package@1.0.0, package-v1.0.0
    let tag = tag.strip_prefix('v').unwrap_or(tag);

    if let Some(pos) = tag.rfind('@') {
        let version_part = &tag[pos + 1..];
        let version = version_part.strip_prefix('v').unwrap_or(version_part);
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if let Some(pos) = tag.rfind("-v") {
        let version = &tag[pos + 2..];
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if looks_like_version(tag) {
        return Some(tag.to_string());
    }

    None
}

/// Check if a string looks like a semantic version
fn looks_like_version(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    parts[0].parse::<u64>().is_ok()
}
