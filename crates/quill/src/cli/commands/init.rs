//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use quill_core::config::{find_config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli};

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        write_config(&config_path, self.force)?;

        if !cli.quiet {
            if let Some(other) = find_config(&cwd).filter(|found| found != &config_path) {
                output::warning(format_args!(
                    "{} takes precedence over the new file",
                    output::path(&other)
                ));
            }
            output::success(format_args!(
                "Created configuration at {}",
                output::path(&config_path)
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to choose commit types and labels", config_path.display());
            println!("  2. Run {} to preview the next release", style("quill changelog --dry-run").cyan());
        }

        Ok(())
    }
}

fn write_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(())
}
