//! Version-control provider interface
//!
//! The changelog workflow only needs a handful of read operations from the
//! repository. They are gathered here so the workflow can run against any
//! source of commits, including in-memory fakes in tests.

use chrono::{DateTime, Utc};

use crate::repository::{GitRepo, Result};
use crate::types::{CommitRange, RawCommit, TagInfo};

/// Read access to a repository's history
pub trait VersionControl {
    /// Commits selected by the range, newest first
    fn commits(&self, range: &CommitRange) -> Result<Vec<RawCommit>>;

    /// Hash of the first commit in history
    fn first_commit(&self) -> Result<String>;

    /// Most recent version tag
    fn latest_tag(&self) -> Result<Option<TagInfo>>;

    /// Date of a commit
    fn commit_date(&self, revision: &str) -> Result<DateTime<Utc>>;

    /// Browsable URL of a remote, used to build commit and compare links
    fn web_url(&self, remote: &str) -> Result<Option<String>>;
}

impl VersionControl for GitRepo {
    fn commits(&self, range: &CommitRange) -> Result<Vec<RawCommit>> {
        self.commits_in_range(range)
    }

    fn first_commit(&self) -> Result<String> {
        self.first_commit_hash()
    }

    fn latest_tag(&self) -> Result<Option<TagInfo>> {
        self.find_latest_tag()
    }

    fn commit_date(&self, revision: &str) -> Result<DateTime<Utc>> {
        self.commit_time(revision)
    }

    fn web_url(&self, remote: &str) -> Result<Option<String>> {
        self.remote_web_url(remote)
    }
}
