//! The changelog file on disk

use std::io::Write;
use std::path::{Path, PathBuf};

use quill_core::error::{ChangelogError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::renderer::MarkdownRenderer;

/// A changelog file with a fixed header followed by release sections
#[derive(Debug, Clone)]
pub struct ChangelogFile {
    path: PathBuf,
    header: String,
}

impl ChangelogFile {
    /// Describe a changelog file and its header
    pub fn new(path: impl Into<PathBuf>, title: &str, description: &str) -> Self {
        Self {
            path: path.into(),
            header: MarkdownRenderer::header(title, description),
        }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The header block written at the top of the file
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Current content; a missing file reads as empty
    pub fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no existing changelog");
                Ok(String::new())
            }
            Err(source) => Err(ChangelogError::ReadFailed {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    /// Content with a leading header removed
    pub fn strip_header<'c>(&self, content: &'c str) -> &'c str {
        content.strip_prefix(self.header.as_str()).unwrap_or(content)
    }

    /// Full file content with a new section placed above the existing ones
    pub fn merge(&self, existing: &str, section: &str) -> String {
        let history = self.strip_header(existing);
        let mut content = String::with_capacity(self.header.len() + section.len() + history.len());
        content.push_str(&self.header);
        content.push_str(section);
        content.push_str(history);
        content
    }

    /// Replace the file content in one step
    ///
    /// The content goes to a temporary file next to the target, which is then
    /// renamed over it. On failure the previous file is left untouched.
    #[instrument(skip(self, content), fields(path = %self.path.display(), bytes = content.len()))]
    pub fn write(&self, content: &str) -> Result<()> {
        let write_failed = |source: std::io::Error| ChangelogError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_failed)?;
        temp.write_all(content.as_bytes()).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;
        temp.persist(&self.path)
            .map_err(|e| write_failed(e.error))?;

        info!("changelog written");
        Ok(())
    }

    /// Read, merge a new section and write back
    ///
    /// Returns the full new content.
    pub fn prepend(&self, section: &str) -> Result<String> {
        let existing = self.read()?;
        let content = self.merge(&existing, section);
        self.write(&content)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::error::QuillError;
    use tempfile::TempDir;

    const SECTION_ONE: &str = "## 1.0.0 (2024-01-01)\n\n### Features\n\n* First\n\n---\n\n";
    const SECTION_TWO: &str = "## 1.1.0 (2024-02-01)\n\n### Fixes\n\n* Second\n\n---\n\n";

    fn changelog(temp: &TempDir) -> ChangelogFile {
        ChangelogFile::new(temp.path().join("CHANGELOG.md"), "Changelog", "All changes.")
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        assert_eq!(changelog(&temp).read().unwrap(), "");
    }

    #[test]
    fn test_prepend_keeps_history_and_single_header() {
        let temp = TempDir::new().unwrap();
        let file = changelog(&temp);

        file.prepend(SECTION_ONE).unwrap();
        let content = file.prepend(SECTION_TWO).unwrap();

        assert_eq!(
            content,
            format!("# Changelog\n\nAll changes.\n\n{}{}", SECTION_TWO, SECTION_ONE)
        );
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), content);
        assert_eq!(content.matches("# Changelog").count(), 1);
    }

    #[test]
    fn test_foreign_content_kept_below() {
        let temp = TempDir::new().unwrap();
        let file = changelog(&temp);
        std::fs::write(file.path(), "Hand-written notes\n").unwrap();

        let content = file.prepend(SECTION_ONE).unwrap();
        assert!(content.ends_with("---\n\nHand-written notes\n"));
    }

    #[test]
    fn test_missing_directory_fails_without_writing() {
        let temp = TempDir::new().unwrap();
        let file = ChangelogFile::new(temp.path().join("missing/CHANGELOG.md"), "Changelog", "x");

        let result = file.write("content");
        assert!(matches!(
            result,
            Err(QuillError::Changelog(ChangelogError::WriteFailed { .. }))
        ));
        assert!(!file.path().exists());
    }

    #[test]
    fn test_strip_header_only_at_start() {
        let temp = TempDir::new().unwrap();
        let file = changelog(&temp);
        let content = format!("intro\n{}", file.header());

        assert_eq!(file.strip_header(&content), content);
    }
}
