//! SemVer version strategy

use quill_core::error::{Result, VersionError};

use crate::types::{BumpType, VersionComponents};

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
#[derive(Debug, Default)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }

    /// Parse a version string, tolerating a leading `v`
    pub fn parse(&self, version: &str) -> Result<VersionComponents> {
        let version = version.trim();
        let version = version.strip_prefix('v').unwrap_or(version);

        let v = semver::Version::parse(version)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()))?;

        Ok(VersionComponents {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: if v.pre.is_empty() {
                None
            } else {
                Some(v.pre.to_string())
            },
            build: if v.build.is_empty() {
                None
            } else {
                Some(v.build.to_string())
            },
        })
    }

    /// Format version components into a string
    pub fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    /// Bump the version according to the bump type
    pub fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> VersionComponents {
        let mut result = current.clone();

        match bump_type {
            BumpType::Major => {
                result.major += 1;
                result.minor = 0;
                result.patch = 0;
                result.prerelease = None;
            }
            BumpType::Minor => {
                result.minor += 1;
                result.patch = 0;
                result.prerelease = None;
            }
            BumpType::Patch => {
                // A prerelease is released as-is rather than skipped over
                if result.prerelease.is_some() {
                    result.prerelease = None;
                } else {
                    result.patch += 1;
                }
            }
            BumpType::None => {}
        }

        result.build = None;
        result
    }
}
