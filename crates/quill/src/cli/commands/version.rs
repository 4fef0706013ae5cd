//! Version command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use quill_changelog::{ChangelogWorkflow, ReleasePlan};
use quill_core::config::{load_config_or_default, ChangelogRules};
use quill_git::{GitRepo, VersionControl};

use crate::cli::args::ReleaseArgs;
use crate::cli::{output, target_dir, Cli, OutputFormat};

/// Calculate the next version
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Show current version only
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(path = ?self.path, current = self.current, "executing version command");
        let dir = target_dir(self.path.as_deref())?;
        let (config, _) = load_config_or_default(&dir)?;

        let repo = GitRepo::discover(&dir)?;

        if self.current {
            let current = repo.latest_tag()?.and_then(|t| t.version);
            return self.output_current(current.as_deref(), cli);
        }

        let rules = ChangelogRules::from_config(&config.changelog);
        let plan = ChangelogWorkflow::new(&repo, &rules, &config.git)
            .plan(&self.release.to_request(), chrono::Local::now().date_naive())?;

        self.output_result(&plan, cli)
    }

    fn output_current(&self, version: Option<&str>, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": version
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => match version {
                Some(version) => println!("{}", version),
                None => output::warning("No version tag found"),
            },
        }
        Ok(())
    }

    fn output_result(&self, plan: &ReleasePlan, cli: &Cli) -> anyhow::Result<()> {
        let next = &plan.release.version;
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": plan.previous_version,
                    "next": next,
                    "tag": plan.release.tag,
                    "bump_type": plan.bump.to_string(),
                    "breaking": plan.has_breaking_changes(),
                    "commits": plan.commit_count
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", next);
                    return Ok(());
                }

                let current = plan.previous_version.as_deref().unwrap_or("none");
                println!("{}", output::title("Version Calculation"));
                println!();
                println!("{}", output::field("Current version", style(current).cyan()));
                println!("{}", output::field("Next version", output::version(next)));
                println!("{}", output::field("Tag", output::tag(&plan.release.tag)));
                println!("{}", output::field("Bump type", style(plan.bump).yellow()));
                println!("{}", output::field("Commits analyzed", plan.commit_count));
                if let Some(date) = plan.previous_date {
                    println!("{}", output::field("Since", date.format("%Y-%m-%d")));
                }
            }
        }
        Ok(())
    }
}
