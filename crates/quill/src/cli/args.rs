//! Arguments shared by commands that compute a release

use chrono::NaiveDate;
use clap::Args;

use quill_changelog::ReleaseRequest;
use quill_core::error::ChangelogError;
use quill_strategies::BumpFlags;

/// How the next release is chosen
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Use this version instead of computing one
    #[arg(long = "set-version", value_name = "VERSION")]
    pub set_version: Option<String>,

    /// Bump the major version
    #[arg(long)]
    pub major: bool,

    /// Bump the minor version
    #[arg(long)]
    pub minor: bool,

    /// Bump the patch version
    #[arg(long)]
    pub patch: bool,

    /// Only include commits from this date on
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub from_date: Option<NaiveDate>,

    /// Only include commits up to this date, which is also the release date
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub to_date: Option<NaiveDate>,

    /// Include the whole history and keep the current version
    #[arg(long)]
    pub first_release: bool,
}

impl ReleaseArgs {
    /// The workflow request these arguments describe
    pub fn to_request(&self) -> ReleaseRequest {
        ReleaseRequest {
            version: self.set_version.clone(),
            bump: BumpFlags {
                major: self.major,
                minor: self.minor,
                patch: self.patch,
            },
            from_date: self.from_date,
            to_date: self.to_date,
            first_release: self.first_release,
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ChangelogError::InvalidDate(value.to_string()).to_string())
}
