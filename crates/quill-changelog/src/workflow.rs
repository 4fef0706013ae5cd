//! Changelog generation workflow
//!
//! Reads the commits since the previous release, works out the next version
//! and renders the new section. Writing it out is a separate step so callers
//! can preview a release first.

use chrono::NaiveDate;
use quill_core::config::{ChangelogRules, GitConfig, BREAKING_CHANGES};
use quill_core::error::Result;
use quill_git::{CommitRange, VersionControl};
use quill_strategies::{next_version, BumpFlags, BumpType, INITIAL_VERSION};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::classifier::Classifier;
use crate::file::ChangelogFile;
use crate::grouping::group;
use crate::renderer::{MarkdownRenderer, ReleaseContext};
use crate::types::{ClassifiedCommit, GroupedChangelog};

/// Type code whose presence makes a minor release
const FEATURE_TYPE: &str = "feat";

/// What the caller asked for
#[derive(Debug, Clone, Default)]
pub struct ReleaseRequest {
    /// Explicit version, overriding any computed one
    pub version: Option<String>,
    /// Requested bump levels
    pub bump: BumpFlags,
    /// Earliest commit date to include
    pub from_date: Option<NaiveDate>,
    /// Latest commit date to include, also used as the release date
    pub to_date: Option<NaiveDate>,
    /// Treat the release as the first one: take the whole history
    pub first_release: bool,
}

/// A computed release, ready to be written
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    pub release: ReleaseContext,
    /// Version of the latest tag, if any
    pub previous_version: Option<String>,
    /// Date of the commit the release is compared against
    pub previous_date: Option<NaiveDate>,
    /// Level applied to the previous version
    pub bump: BumpType,
    /// Commits read from the repository
    pub commit_count: usize,
    #[serde(skip)]
    pub grouped: GroupedChangelog,
    /// Rendered Markdown section
    pub section: String,
}

impl ReleasePlan {
    /// Whether the release carries a breaking change
    pub fn has_breaking_changes(&self) -> bool {
        self.grouped.has_entries(BREAKING_CHANGES)
    }
}

/// Orchestrates a changelog run over a version-control provider
pub struct ChangelogWorkflow<'a, V: VersionControl> {
    vcs: &'a V,
    rules: &'a ChangelogRules,
    git: &'a GitConfig,
}

impl<'a, V: VersionControl> ChangelogWorkflow<'a, V> {
    /// Create a workflow
    pub fn new(vcs: &'a V, rules: &'a ChangelogRules, git: &'a GitConfig) -> Self {
        Self { vcs, rules, git }
    }

    /// Compute the next release without touching any file
    #[instrument(skip_all, fields(first_release = request.first_release))]
    pub fn plan(&self, request: &ReleaseRequest, today: NaiveDate) -> Result<ReleasePlan> {
        let latest = self.vcs.latest_tag()?;
        let previous_version = latest.as_ref().and_then(|t| t.version.clone());

        let (range, previous_ref) = match &latest {
            Some(tag) if !request.first_release => (CommitRange::since(&tag.name), tag.name.clone()),
            _ => (CommitRange::all(), self.vcs.first_commit()?),
        };
        let range = range.with_dates(request.from_date, request.to_date);
        let previous_date = match self.vcs.commit_date(&previous_ref) {
            Ok(date) => Some(date.date_naive()),
            Err(e) => {
                warn!(revision = %previous_ref, error = %e, "cannot read commit date");
                None
            }
        };

        let commits = self.vcs.commits(&range)?;
        info!(count = commits.len(), since = %previous_ref, "read commits");

        let classified = Classifier::new(self.rules).classify_all(&commits);
        debug!(classified = classified.len(), "commits classified");
        if classified.is_empty() {
            warn!("no commits qualify for the changelog");
        }

        let (version, bump) = self.resolve_version(request, previous_version.as_deref(), &classified);
        let grouped = group(&classified, self.rules.types());

        let release = ReleaseContext {
            tag: self.git.tag_for(&version),
            version,
            previous_ref,
            repo_url: self.vcs.web_url(&self.git.remote)?,
            date: request.to_date.unwrap_or(today),
        };
        let section = MarkdownRenderer::new().render(&grouped, self.rules.types(), &release);

        info!(version = %release.version, %bump, "release planned");
        Ok(ReleasePlan {
            release,
            previous_version,
            previous_date,
            bump,
            commit_count: commits.len(),
            grouped,
            section,
        })
    }

    /// Prepend a planned section to the changelog file
    ///
    /// Returns the full new file content.
    pub fn apply(&self, plan: &ReleasePlan, file: &ChangelogFile) -> Result<String> {
        file.prepend(&plan.section)
    }

    fn resolve_version(
        &self,
        request: &ReleaseRequest,
        previous: Option<&str>,
        classified: &[ClassifiedCommit],
    ) -> (String, BumpType) {
        if request.first_release {
            let version = match (request.version.as_deref(), previous) {
                (Some(explicit), _) => next_version(None, BumpFlags::default(), Some(explicit)),
                (None, Some(previous)) => previous.to_string(),
                (None, None) => INITIAL_VERSION.to_string(),
            };
            return (version, BumpType::None);
        }

        let flags = if request.bump.any() || previous.is_none() {
            request.bump
        } else {
            let inferred = BumpType::from_changes(
                classified.iter().any(ClassifiedCommit::is_breaking),
                classified.iter().any(|c| c.type_code == FEATURE_TYPE),
            );
            debug!(%inferred, "inferred bump level");
            BumpFlags::from_bump(inferred)
        };

        let bump = if request.version.is_some() {
            BumpType::None
        } else {
            flags.level()
        };
        (next_version(previous, flags, request.version.as_deref()), bump)
    }
}
