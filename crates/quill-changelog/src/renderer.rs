//! Markdown rendering of a release section

use chrono::NaiveDate;
use quill_core::config::TypeTable;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::types::{CommitLink, Entry, GroupedChangelog};

/// What a rendered section describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseContext {
    /// Version being released
    pub version: String,
    /// Tag or revision the release is compared against
    pub previous_ref: String,
    /// Tag the release will get
    pub tag: String,
    /// Web URL of the repository, when links can be built
    pub repo_url: Option<String>,
    /// Release date
    pub date: NaiveDate,
}

/// Markdown renderer
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self
    }

    /// The fixed block at the top of the changelog file
    pub fn header(title: &str, description: &str) -> String {
        format!("# {}\n\n{}\n\n", title, description)
    }

    /// Render one release section, terminated by a horizontal rule
    #[instrument(skip_all, fields(version = %release.version))]
    pub fn render(
        &self,
        grouped: &GroupedChangelog,
        types: &TypeTable,
        release: &ReleaseContext,
    ) -> String {
        let mut output = String::new();
        let repo_url = release.repo_url.as_deref();

        let date = release.date.format("%Y-%m-%d");
        match repo_url {
            Some(url) => output.push_str(&format!(
                "## [{}]({}/compare/{}...{}) ({})\n\n",
                release.version, url, release.previous_ref, release.tag, date
            )),
            None => output.push_str(&format!("## {} ({})\n\n", release.version, date)),
        }

        for definition in types {
            let Some(group) = grouped.group(&definition.code) else {
                continue;
            };
            if group.is_empty() {
                continue;
            }

            output.push_str(&format!("### {}\n\n", definition.label));

            for (context, entries) in &group.contexts {
                if entries.is_empty() {
                    continue;
                }
                if let Some(context) = context.as_deref().filter(|c| !c.is_empty()) {
                    output.push_str(&format!("##### {}\n\n", context));
                }
                for entry in entries.values() {
                    output.push_str(&render_entry(entry, repo_url));
                    output.push('\n');
                }
                output.push('\n');
            }
        }

        output.push_str("---\n\n");

        debug!(output_len = output.len(), "release section rendered");
        output
    }
}

fn render_entry(entry: &Entry, repo_url: Option<&str>) -> String {
    if entry.links.is_empty() {
        return format!("* {}", entry.description);
    }

    let links: Vec<String> = entry
        .links
        .iter()
        .map(|link| render_link(link, repo_url))
        .collect();
    format!("* {} ({})", entry.description, links.join(", "))
}

fn render_link(link: &CommitLink, repo_url: Option<&str>) -> String {
    match repo_url {
        Some(url) => format!("[{}]({})", link.short_hash, link.url(url)),
        None => link.short_hash.clone(),
    }
}
