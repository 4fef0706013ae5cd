//! Release commits

use std::path::Path;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use quill_core::error::GitError;

impl GitRepo {
    /// Stage the given files and commit them on HEAD
    ///
    /// Paths may be absolute or relative to the working directory; either way
    /// they must live inside it. Returns the new commit hash.
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub fn commit_paths(&self, paths: &[&Path], message: &str) -> Result<String> {
        let workdir = self
            .workdir()?
            .canonicalize()
            .map_err(|_| GitError::BareRepository)?;

        let mut index = self.repo.index()?;
        index.read(false)?;
        for path in paths {
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                workdir.join(path)
            };
            let absolute = absolute
                .canonicalize()
                .map_err(|_| GitError::PathOutsideWorkdir(path.to_path_buf()))?;
            let relative = absolute
                .strip_prefix(&workdir)
                .map_err(|_| GitError::PathOutsideWorkdir(path.to_path_buf()))?;
            index.add_path(relative)?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let sig = self.repo.signature()?;

        let parent = match self.head_commit() {
            Ok(commit) => Some(commit),
            Err(GitError::NoCommits) => None,
            Err(e) => return Err(e),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!(hash = %oid, message, "created release commit");
        Ok(oid.to_string())
    }
}
