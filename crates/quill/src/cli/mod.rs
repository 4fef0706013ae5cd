//! CLI definition and command handling

pub mod args;
pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use commands::{ChangelogCommand, CompletionsCommand, InitCommand, VersionCommand};

/// Quill - Changelog generator for conventional commits
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init(InitCommand),

    /// Calculate the next version
    Version(VersionCommand),

    /// Generate the changelog section for the next release
    Changelog(ChangelogCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            debug!(dir = %dir.display(), "changing working directory");
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

/// Resolve an optional target directory against the current one
pub fn target_dir(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match path {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_changelog_flags() {
        let cli = Cli::try_parse_from([
            "quill",
            "changelog",
            "some/dir",
            "--set-version",
            "3.0.0",
            "--minor",
            "--from-date",
            "2024-01-01",
            "--commit",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Changelog(cmd) = cli.command else {
            panic!("expected changelog command");
        };
        assert_eq!(cmd.path.as_deref(), Some(Path::new("some/dir")));
        assert_eq!(cmd.release.set_version.as_deref(), Some("3.0.0"));
        assert!(cmd.release.minor);
        assert!(cmd.commit);
        assert!(!cmd.dry_run);
    }

    #[test]
    fn test_rejects_bad_date() {
        let result = Cli::try_parse_from(["quill", "version", "--to-date", "yesterday"]);
        assert!(result.is_err());
    }
}
