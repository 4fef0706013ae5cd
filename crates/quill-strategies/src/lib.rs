//! Quill Strategies - Version calculation for releases
//!
//! Parses and bumps semantic versions, and decides the version of the next
//! release from the previous one and the requested bump level.

mod bump;
mod semver;
pub mod types;

pub use bump::{bump, next_version, INITIAL_VERSION};
pub use semver::SemVerStrategy;
pub use types::{BumpFlags, BumpType, VersionComponents};
