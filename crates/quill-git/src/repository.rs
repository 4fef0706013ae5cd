//! Repository handle

use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::{debug, instrument};

use quill_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// An open git repository
pub struct GitRepo {
    pub(crate) repo: Repository,
}

impl GitRepo {
    /// Open the repository containing `start_path`, searching upwards
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepository(start_path.to_path_buf()),
            _ => GitError::OpenFailed(e.to_string()),
        })?;
        debug!(git_dir = %repo.path().display(), "opened repository");
        Ok(Self { repo })
    }

    /// Working directory, which release commits are staged from
    pub(crate) fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or(GitError::BareRepository)
    }

    /// The commit HEAD points to
    ///
    /// A branch without commits yet is reported as [`GitError::NoCommits`].
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        match self.repo.head() {
            Ok(head) => Ok(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Err(GitError::NoCommits),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_at, init_repo};
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_nested_dir() {
        let (temp, _) = init_repo();
        let nested = temp.path().join("docs").join("release");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = GitRepo::discover(&nested).unwrap();
        assert_eq!(
            repo.workdir().unwrap().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_plain_dir_is_not_a_repository() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::discover(temp.path());
        assert!(matches!(result, Err(GitError::NotARepository(_))));
    }

    #[test]
    fn test_head_commit() {
        let (temp, repo) = init_repo();
        assert!(matches!(repo.head_commit(), Err(GitError::NoCommits)));

        let oid = commit_at(&temp, "feat: first", 1_700_000_000);
        assert_eq!(repo.head_commit().unwrap().id(), oid);
    }
}
