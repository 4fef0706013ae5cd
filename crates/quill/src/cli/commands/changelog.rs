//! Changelog command

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use quill_changelog::{ChangelogFile, ChangelogWorkflow, ReleasePlan};
use quill_core::config::{load_config_or_default, ChangelogRules, Config};
use quill_core::error::GitError;
use quill_git::GitRepo;

use crate::cli::args::ReleaseArgs;
use crate::cli::{output, target_dir, Cli, OutputFormat};

/// Generate the changelog section for the next release
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Commit the changelog and tag the release
    #[arg(long)]
    pub commit: bool,

    /// Print the new section instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            path = ?self.path,
            commit = self.commit,
            dry_run = self.dry_run,
            "executing changelog command"
        );
        let dir = target_dir(self.path.as_deref())?;
        let (config, _) = load_config_or_default(&dir)?;

        let rules = ChangelogRules::from_config(&config.changelog);
        let repo = GitRepo::discover(&dir)?;
        let workflow = ChangelogWorkflow::new(&repo, &rules, &config.git);
        let plan = workflow.plan(&self.release.to_request(), chrono::Local::now().date_naive())?;

        if self.dry_run {
            return self.output_preview(&plan, cli);
        }

        let file = ChangelogFile::new(
            changelog_path(&dir, rules.file()),
            rules.title(),
            rules.description(),
        );
        let committed = publish(&workflow, &repo, &config, &plan, &file, self.commit)?;

        self.output_result(&plan, file.path(), committed.as_deref(), cli)
    }

    fn output_preview(&self, plan: &ReleasePlan, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
            OutputFormat::Text => print!("{}", plan.section),
        }
        Ok(())
    }

    fn output_result(
        &self,
        plan: &ReleasePlan,
        path: &Path,
        commit: Option<&str>,
        cli: &Cli,
    ) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "path": path,
                    "version": plan.release.version,
                    "tag": plan.release.tag,
                    "commits": plan.commit_count,
                    "entries": plan.grouped.entry_count(),
                    "release_commit": commit,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                if plan.grouped.is_empty() {
                    output::warning("No commits qualified for the changelog");
                }
                output::success(format_args!(
                    "Changelog for {} written to {}",
                    output::version(&plan.release.version),
                    output::path(path)
                ));
                if let Some(hash) = commit {
                    output::note(format_args!(
                        "Committed {} and tagged {}",
                        output::short_hash(hash),
                        output::tag(&plan.release.tag)
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Changelog location; relative paths are taken from the project directory
fn changelog_path(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

/// Write the release section, then commit and tag it when asked to
///
/// The tag is checked before anything is written so that an existing tag
/// leaves both the changelog and the history untouched. Returns the release
/// commit hash when one was made.
fn publish(
    workflow: &ChangelogWorkflow<'_, GitRepo>,
    repo: &GitRepo,
    config: &Config,
    plan: &ReleasePlan,
    file: &ChangelogFile,
    commit: bool,
) -> anyhow::Result<Option<String>> {
    let tag = &plan.release.tag;
    if commit && repo.find_tag(tag)?.is_some() {
        return Err(GitError::TagExists(tag.clone()).into());
    }

    workflow.apply(plan, file)?;
    if !commit {
        return Ok(None);
    }

    let message = config.git.commit_message_for(&plan.release.version);
    let hash = repo
        .commit_paths(&[file.path()], &message)
        .with_context(|| format!("Failed to commit {}", file.path().display()))?;
    repo.create_tag(tag, Some(&message))
        .with_context(|| format!("Failed to create tag {}", tag))?;

    info!(hash = %hash, tag = %tag, "release committed");
    Ok(Some(hash))
}
