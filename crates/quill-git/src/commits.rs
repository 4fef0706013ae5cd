//! Commit history operations

use chrono::{DateTime, TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::{CommitRange, RawCommit};
use quill_core::error::GitError;

impl GitRepo {
    /// Get the commits selected by a range, newest first
    #[instrument(skip(self), fields(since = ?range.since))]
    pub fn commits_in_range(&self, range: &CommitRange) -> Result<Vec<RawCommit>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        if let Some(since) = &range.since {
            let since_oid = self.repo.revparse_single(since)?.peel_to_commit()?.id();
            revwalk.hide(since_oid)?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let info = commit_to_raw(&commit);
            if range.contains_date(&info.timestamp) {
                commits.push(info);
            }
        }

        debug!(count = commits.len(), "read commits");
        Ok(commits)
    }

    /// Hash of the root commit of the current branch
    pub fn first_commit_hash(&self) -> Result<String> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head.id())?;

        match revwalk.next() {
            Some(oid) => Ok(oid?.to_string()),
            None => Err(GitError::NoCommits),
        }
    }

    /// Commit timestamp for a revision
    pub fn commit_time(&self, revision: &str) -> Result<DateTime<Utc>> {
        let commit = self.repo.revparse_single(revision)?.peel_to_commit()?;
        Ok(commit_to_raw(&commit).timestamp)
    }

}

/// Convert a git2 Commit to RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>) -> RawCommit {
    let hash = commit.id().to_string();
    let author = commit.author();

    let head = commit.summary().unwrap_or("(no message)").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    RawCommit::new(
        hash,
        head,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_body(commit.body().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_at, init_repo};
    use chrono::NaiveDate;

    #[test]
    fn test_commits_newest_first() {
        let (temp, repo) = init_repo();
        commit_at(&temp, "Initial commit", 1_700_000_000);
        commit_at(&temp, "feat: add file\n\nLonger body", 1_700_000_100);

        let commits = repo.commits_in_range(&CommitRange::all()).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].head, "feat: add file");
        assert_eq!(commits[0].body.as_deref(), Some("Longer body"));
        assert_eq!(commits[1].head, "Initial commit");
    }

    #[test]
    fn test_commits_since_revision() {
        let (temp, repo) = init_repo();
        let first = commit_at(&temp, "Initial commit", 1_700_000_000);
        commit_at(&temp, "fix: second", 1_700_000_100);

        let commits = repo
            .commits_in_range(&CommitRange::since(first.to_string()))
            .unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].head, "fix: second");
    }

    #[test]
    fn test_commits_in_date_window() {
        let (temp, repo) = init_repo();
        // 2023-11-14 and 2023-11-20
        commit_at(&temp, "feat: old", 1_699_920_000);
        commit_at(&temp, "feat: new", 1_700_438_400);

        let range = CommitRange::all().with_dates(NaiveDate::from_ymd_opt(2023, 11, 15), None);
        let commits = repo.commits_in_range(&range).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].head, "feat: new");
    }

    #[test]
    fn test_first_commit_and_time() {
        let (temp, repo) = init_repo();
        let first = commit_at(&temp, "Initial commit", 1_700_000_000);
        commit_at(&temp, "feat: more", 1_700_000_100);

        assert_eq!(repo.first_commit_hash().unwrap(), first.to_string());
        assert_eq!(
            repo.commit_time(&first.to_string()).unwrap().timestamp(),
            1_700_000_000
        );
    }

    #[test]
    fn test_empty_repository() {
        let (_temp, repo) = init_repo();
        assert!(matches!(
            repo.commits_in_range(&CommitRange::all()),
            Err(GitError::NoCommits)
        ));
    }
}
