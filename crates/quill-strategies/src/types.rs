//! Version strategy types

use serde::{Deserialize, Serialize};

/// Version components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComponents {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Pre-release identifier
    pub prerelease: Option<String>,
    /// Build metadata
    pub build: Option<String>,
}

impl VersionComponents {
    /// Create new version components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Convert to string representation
    pub fn to_version_string(&self) -> String {
        let mut v = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            v.push('-');
            v.push_str(pre);
        }

        if let Some(build) = &self.build {
            v.push('+');
            v.push_str(build);
        }

        v
    }
}

impl std::fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_version_string())
    }
}

/// Type of version bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Major version bump (breaking changes)
    Major,
    /// Minor version bump (new features)
    Minor,
    /// Patch version bump (bug fixes)
    Patch,
    /// No bump needed
    None,
}

impl BumpType {
    /// Infer the bump level from what a release contains
    ///
    /// Breaking changes give a major bump, features a minor one, anything
    /// else a patch.
    pub fn from_changes(has_breaking: bool, has_feature: bool) -> Self {
        if has_breaking {
            Self::Major
        } else if has_feature {
            Self::Minor
        } else {
            Self::Patch
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Requested bump levels, as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpFlags {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
}

impl BumpFlags {
    /// Flags requesting a single level
    pub fn from_bump(bump: BumpType) -> Self {
        Self {
            major: bump == BumpType::Major,
            minor: bump == BumpType::Minor,
            patch: bump == BumpType::Patch,
        }
    }

    /// The honored level: major beats minor beats patch
    pub fn level(&self) -> BumpType {
        if self.major {
            BumpType::Major
        } else if self.minor {
            BumpType::Minor
        } else if self.patch {
            BumpType::Patch
        } else {
            BumpType::None
        }
    }

    /// Whether any level was requested
    pub fn any(&self) -> bool {
        self.level() != BumpType::None
    }
}
