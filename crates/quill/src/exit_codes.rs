//! Exit codes for the CLI

use quill_core::error::{ConfigError, GitError, QuillError};

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Changelog file error
pub const CHANGELOG_ERROR: u8 = 5;

/// Exit code for an error, based on the first library error in its chain
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<QuillError>() {
            return match e {
                QuillError::Config(_) => CONFIG_ERROR,
                QuillError::Git(_) => GIT_ERROR,
                QuillError::Version(_) => VERSION_ERROR,
                QuillError::Changelog(_) | QuillError::Io(_) => CHANGELOG_ERROR,
                QuillError::Other(_) => ERROR,
            };
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
    }
    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let config: anyhow::Error = QuillError::from(ConfigError::NotAMapping("a list".into())).into();
        assert_eq!(for_error(&config), CONFIG_ERROR);

        let git: anyhow::Error = GitError::NoCommits.into();
        assert_eq!(for_error(&git.context("reading history")), GIT_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }
}
