//! Next-version policy

use tracing::{debug, warn};

use crate::semver::SemVerStrategy;
use crate::types::{BumpFlags, BumpType};

/// Version used when there is nothing to bump from
pub const INITIAL_VERSION: &str = "1.0.0";

/// Bump `previous` by the highest requested level
///
/// Without a previous version, without any level, or when the previous
/// version does not parse, the result is [`INITIAL_VERSION`].
pub fn bump(previous: Option<&str>, flags: BumpFlags) -> String {
    let level = flags.level();
    let Some(previous) = previous else {
        debug!("no previous version");
        return INITIAL_VERSION.to_string();
    };
    if level == BumpType::None {
        debug!(previous, "no bump level requested");
        return INITIAL_VERSION.to_string();
    }

    let strategy = SemVerStrategy::new();
    match strategy.parse(previous) {
        Ok(current) => {
            let next = strategy.format(&strategy.bump(&current, level));
            debug!(previous, %level, next = %next, "bumped version");
            next
        }
        Err(e) => {
            warn!(previous, error = %e, "previous version is not semver");
            INITIAL_VERSION.to_string()
        }
    }
}

/// Version of the next release
///
/// An explicit version always wins, with any leading `v` removed.
pub fn next_version(
    previous: Option<&str>,
    flags: BumpFlags,
    override_version: Option<&str>,
) -> String {
    match override_version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(version) => version.strip_prefix('v').unwrap_or(version).to_string(),
        None => bump(previous, flags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(bump: BumpType) -> BumpFlags {
        BumpFlags::from_bump(bump)
    }

    #[test]
    fn test_bump_each_level() {
        assert_eq!(bump(Some("1.2.3"), flags(BumpType::Major)), "2.0.0");
        assert_eq!(bump(Some("1.2.3"), flags(BumpType::Minor)), "1.3.0");
        assert_eq!(bump(Some("1.2.3"), flags(BumpType::Patch)), "1.2.4");
    }

    #[test]
    fn test_highest_level_wins() {
        let all = BumpFlags {
            major: true,
            minor: true,
            patch: true,
        };
        assert_eq!(bump(Some("1.2.3"), all), "2.0.0");
    }

    #[test]
    fn test_fallback_to_initial() {
        assert_eq!(bump(Some("1.2.3"), BumpFlags::default()), "1.0.0");
        assert_eq!(bump(None, flags(BumpType::Major)), "1.0.0");
        assert_eq!(bump(Some("not-a-version"), flags(BumpType::Patch)), "1.0.0");
    }

    #[test]
    fn test_previous_with_prefix() {
        assert_eq!(bump(Some("v0.9.1"), flags(BumpType::Minor)), "0.10.0");
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(
            next_version(Some("1.2.3"), flags(BumpType::Major), Some("5.0.0")),
            "5.0.0"
        );
        assert_eq!(next_version(None, BumpFlags::default(), Some("v3.1.0")), "3.1.0");
        assert_eq!(
            next_version(Some("1.2.3"), flags(BumpType::Patch), Some("  ")),
            "1.2.4"
        );
    }
}
