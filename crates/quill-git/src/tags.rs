//! Tag operations

use semver::Version;
use tracing::{debug, info, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use quill_core::error::GitError;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                let mut tag_info = TagInfo::new(&name, tag.target_id().to_string());
                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg);
                }
                tags.push(tag_info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Find the latest tag by semantic version
    #[instrument(skip(self))]
    pub fn find_latest_tag(&self) -> Result<Option<TagInfo>> {
        let mut versioned_tags: Vec<_> = self
            .tags()?
            .into_iter()
            .filter_map(|t| {
                t.version
                    .as_ref()
                    .and_then(|v| Version::parse(v).ok())
                    .map(|v| (t, v))
            })
            .collect();

        versioned_tags.sort_by(|a, b| b.1.cmp(&a.1));

        let result = versioned_tags.into_iter().next().map(|(t, _)| t);
        debug!(latest = ?result.as_ref().map(|t| &t.name), "found latest tag");
        Ok(result)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Create a tag on HEAD, annotated when a message is given
    #[instrument(skip(self), fields(annotated = message.is_some()))]
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        if self.find_tag(name)?.is_some() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;

        if let Some(msg) = message {
            let sig = self.repo.signature()?;
            self.repo.tag(name, head.as_object(), &sig, msg, false)?;
        } else {
            self.repo.tag_lightweight(name, head.as_object(), false)?;
        }

        info!(name, annotated = message.is_some(), "created tag");
        Ok(TagInfo::new(name, head.id().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_at, init_repo};
    use git2::Repository;

    fn tag(temp: &tempfile::TempDir, oid: git2::Oid, name: &str) {
        let repo = Repository::open(temp.path()).unwrap();
        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight(name, commit.as_object(), false).unwrap();
    }

    #[test]
    fn test_list_tags() {
        let (temp, repo) = init_repo();
        let oid = commit_at(&temp, "Initial commit", 1_700_000_000);
        tag(&temp, oid, "v1.0.0");

        let tags = repo.tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v1.0.0");
    }

    #[test]
    fn test_find_latest_tag_uses_semver_order() {
        let (temp, repo) = init_repo();
        let first = commit_at(&temp, "Initial commit", 1_700_000_000);
        tag(&temp, first, "v1.10.0");
        let second = commit_at(&temp, "fix: patch", 1_700_000_100);
        tag(&temp, second, "v1.9.0");
        tag(&temp, second, "nightly");

        let latest = repo.find_latest_tag().unwrap().unwrap();
        assert_eq!(latest.name, "v1.10.0");
        assert_eq!(latest.version.as_deref(), Some("1.10.0"));
    }

    #[test]
    fn test_no_tags() {
        let (temp, repo) = init_repo();
        commit_at(&temp, "Initial commit", 1_700_000_000);
        assert!(repo.find_latest_tag().unwrap().is_none());
    }

    #[test]
    fn test_tag_already_exists() {
        let (temp, repo) = init_repo();
        let oid = commit_at(&temp, "Initial commit", 1_700_000_000);
        tag(&temp, oid, "v1.0.0");

        let result = repo.create_tag("v1.0.0", None);
        assert!(matches!(result, Err(GitError::TagExists(_))));
    }

    #[test]
    fn test_create_lightweight_tag() {
        let (temp, repo) = init_repo();
        let oid = commit_at(&temp, "Initial commit", 1_700_000_000);

        let created = repo.create_tag("v0.1.0", None).unwrap();
        assert_eq!(created.commit_hash, oid.to_string());
        assert!(repo.find_tag("v0.1.0").unwrap().is_some());
    }
}
