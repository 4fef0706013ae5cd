//! Grouping and deduplication of classified commits

use quill_core::config::TypeTable;
use tracing::{debug, instrument};

use crate::types::{ClassifiedCommit, Entry, GroupedChangelog, TypeGroup};

/// Organize classified commits into type, context and description buckets
///
/// Every configured type gets a group, in table order, even when empty.
/// Commits whose normalized description, type and context agree collapse
/// into one entry; the last description seen for the entry is kept and its
/// links are ordered by full hash.
#[instrument(skip_all, fields(commits = classified.len()))]
pub fn group(classified: &[ClassifiedCommit], types: &TypeTable) -> GroupedChangelog {
    let mut groups: Vec<TypeGroup> = types.iter().map(|t| TypeGroup::new(&t.code)).collect();

    for commit in classified {
        let Some(group) = groups.iter_mut().find(|g| g.code == commit.type_code) else {
            debug!(
                hash = %commit.commit.short_hash,
                type_code = %commit.type_code,
                "type not in table, skipping"
            );
            continue;
        };

        let key = commit.dedup_key();
        let entry = group
            .contexts
            .entry(key.context)
            .or_default()
            .entry(key.normalized)
            .or_insert_with(|| Entry {
                description: String::new(),
                links: Vec::new(),
            });

        entry.description = commit.description.clone();
        entry.links.push(commit.link());
    }

    for entries in groups.iter_mut().flat_map(|g| g.contexts.values_mut()) {
        for entry in entries.values_mut() {
            entry.links.sort_by(|a, b| a.hash.cmp(&b.hash));
            entry.links.dedup_by(|a, b| a.hash == b.hash);
        }
    }

    let grouped = GroupedChangelog { groups };
    debug!(entries = grouped.entry_count(), "commits grouped");
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quill_core::config::{ChangelogRules, BREAKING_CHANGES};
    use quill_git::RawCommit;

    fn classified(hash: &str, code: &str, context: Option<&str>, description: &str) -> ClassifiedCommit {
        ClassifiedCommit {
            commit: RawCommit::new(
                hash,
                format!("{}: {}", code, description),
                "Test",
                "test@example.com",
                Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            ),
            type_code: code.to_string(),
            context: context.map(str::to_string),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_one_group_per_type_in_table_order() {
        let rules = ChangelogRules::default();
        let grouped = group(&[], rules.types());

        let codes: Vec<_> = grouped.groups.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(codes, rules.types().codes());
        assert_eq!(codes[0], BREAKING_CHANGES);
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_duplicates_merge_with_sorted_links() {
        let rules = ChangelogRules::default();
        let commits = vec![
            classified("ffff000011112222", "fix", Some("Parser"), "Handle empty input"),
            classified("0000aaaa11112222", "fix", Some("Parser"), "handle empty input!"),
            classified("9999bbbb11112222", "fix", Some("Parser"), "Handle Empty Input."),
        ];

        let grouped = group(&commits, rules.types());
        let fixes = grouped.group("fix").unwrap();
        let entries = &fixes.contexts[&Some("Parser".to_string())];
        assert_eq!(entries.len(), 1);

        let entry = &entries["handleemptyinput"];
        assert_eq!(entry.description, "Handle Empty Input.");
        let hashes: Vec<_> = entry.links.iter().map(|l| l.hash.as_str()).collect();
        assert_eq!(hashes, ["0000aaaa11112222", "9999bbbb11112222", "ffff000011112222"]);
    }

    #[test]
    fn test_same_description_in_other_context_stays_separate() {
        let rules = ChangelogRules::default();
        let commits = vec![
            classified("aaaa", "feat", Some("Cli"), "Add flag"),
            classified("bbbb", "feat", None, "Add flag"),
            classified("cccc", "fix", None, "Add flag"),
        ];

        let grouped = group(&commits, rules.types());
        let features = grouped.group("feat").unwrap();
        let contexts: Vec<_> = features.contexts.keys().cloned().collect();
        assert_eq!(contexts, [None, Some("Cli".to_string())]);
        assert_eq!(features.entry_count(), 2);
        assert!(grouped.has_entries("fix"));
    }

    #[test]
    fn test_entries_sorted_by_key() {
        let rules = ChangelogRules::default();
        let commits = vec![
            classified("aaaa", "feat", None, "Zebra support"),
            classified("bbbb", "feat", None, "Alpha support"),
        ];

        let grouped = group(&commits, rules.types());
        let entries = &grouped.group("feat").unwrap().contexts[&None];
        let descriptions: Vec<_> = entries.values().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["Alpha support", "Zebra support"]);
    }

    #[test]
    fn test_unknown_type_skipped() {
        let rules = ChangelogRules::default();
        let commits = vec![classified("aaaa", "chore", None, "Bump deps")];

        let grouped = group(&commits, rules.types());
        assert!(grouped.is_empty());
        assert!(grouped.group("chore").is_none());
    }

    #[test]
    fn test_repeated_commit_listed_once() {
        let rules = ChangelogRules::default();
        let commit = classified("aaaa", "fix", None, "Fix crash");
        let grouped = group(&[commit.clone(), commit], rules.types());

        let entries = &grouped.group("fix").unwrap().contexts[&None];
        assert_eq!(entries["fixcrash"].links.len(), 1);
    }
}
