//! Repository fixtures shared by the unit tests

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

use crate::repository::GitRepo;

pub(crate) fn init_repo() -> (TempDir, GitRepo) {
    let temp = TempDir::new().unwrap();
    Repository::init(temp.path()).unwrap();
    let repo = GitRepo::discover(temp.path()).unwrap();
    (temp, repo)
}

/// Commit a change to `file.txt` with a fixed timestamp
pub(crate) fn commit_at(temp: &TempDir, message: &str, seconds: i64) -> Oid {
    let repo = Repository::open(temp.path()).unwrap();
    let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap();

    std::fs::write(temp.path().join("file.txt"), format!("{}\n{}", message, seconds)).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("file.txt")).unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
