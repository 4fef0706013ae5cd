//! Quill Core - Configuration and error types for changelog generation
//!
//! This crate provides the error taxonomy shared by every Quill crate and the
//! configuration system (file discovery, loading and validation).

pub mod config;
pub mod error;

pub use error::{ChangelogError, ConfigError, GitError, QuillError, Result, VersionError};
