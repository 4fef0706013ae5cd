//! Terminal reporting for quill commands
//!
//! Status lines go to stdout with a one-character marker; failures go to
//! stderr. Colors are dropped by `console` when the stream is not a terminal.

use std::fmt::Display;
use std::path::Path;

use console::{style, StyledObject};

use quill_git::SHORT_HASH_LEN;

/// Width of the label column in [`field`] lines
const LABEL_WIDTH: usize = 18;

pub fn success(message: impl Display) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn warning(message: impl Display) {
    println!("{} {}", style("!").yellow().bold(), message);
}

pub fn note(message: impl Display) {
    println!("{} {}", style("→").blue(), message);
}

/// Report a failure on stderr
pub fn error(message: impl Display) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Section title above a block of [`field`] lines
pub fn title(text: &str) -> StyledObject<&str> {
    style(text).bold()
}

/// An indented `label: value` line with the values aligned
pub fn field(label: &str, value: impl Display) -> String {
    format!("  {:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH)
}

pub fn version(version: &str) -> StyledObject<&str> {
    style(version).green().bold()
}

pub fn tag(tag: &str) -> StyledObject<&str> {
    style(tag).yellow()
}

pub fn path(path: &Path) -> StyledObject<std::path::Display<'_>> {
    style(path.display()).cyan()
}

/// Commit hash abbreviated the same way changelog links are
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
