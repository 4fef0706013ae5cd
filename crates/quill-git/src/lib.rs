//! Quill Git - Git operations for changelog generation
//!
//! This crate reads commit history and tags, resolves remote web URLs for
//! links, and creates the release commit and tag.

mod commits;
mod provider;
mod release;
mod remote;
mod repository;
mod tags;
pub mod types;

#[cfg(test)]
mod test_support;

pub use provider::VersionControl;
pub use remote::web_url_from_remote;
pub use repository::{GitRepo, Result};
pub use types::{CommitRange, RawCommit, TagInfo, SHORT_HASH_LEN};
