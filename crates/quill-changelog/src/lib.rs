//! Quill Changelog - Changelog generation from conventional commits
//!
//! Commits are classified by type and scope, merged into deduplicated
//! entries, rendered as a Markdown release section and prepended to the
//! changelog file below its header.

pub mod classifier;
pub mod file;
pub mod grouping;
pub mod renderer;
pub mod text;
pub mod types;
pub mod workflow;

pub use classifier::{Classification, Classifier};
pub use file::ChangelogFile;
pub use grouping::group;
pub use renderer::{MarkdownRenderer, ReleaseContext};
pub use types::{ClassifiedCommit, CommitLink, DedupKey, Entry, GroupedChangelog, TypeGroup};
pub use workflow::{ChangelogWorkflow, ReleasePlan, ReleaseRequest};
