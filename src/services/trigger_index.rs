//! Merged token lookup over the built-in and custom catalogs.
//!
//! Built-in entries are indexed first and custom entries after, so a custom
//! entry that reuses a built-in token takes that token over. That is the whole
//! override mechanism; there is no separate precedence rule.

use std::collections::{BTreeMap, HashSet};

use crate::bang::BangEntry;

/// Lowercase token -> winning entry.
#[derive(Debug, Clone, Default)]
pub struct TriggerIndex {
    tokens: BTreeMap<String, BangEntry>,
}

impl TriggerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from both catalogs, custom last.
    pub fn build(builtin: &[BangEntry], custom: &[BangEntry]) -> Self {
        let mut index = Self::new();
        index.extend(builtin);
        index.extend(custom);
        index
    }

    /// Map every token of every entry; later mappings overwrite earlier ones.
    pub fn extend(&mut self, entries: &[BangEntry]) {
        for entry in entries {
            for token in entry.all_triggers() {
                self.tokens.insert(token.to_lowercase(), entry.clone());
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, token: &str) -> Option<&BangEntry> {
        self.tokens.get(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Reachable entries, one per case-folded primary trigger, sorted by it.
    ///
    /// The entry that owns its primary token wins. When no entry does (the
    /// primary token was taken over), the first one seen in token order is kept.
    pub fn entries(&self) -> Vec<BangEntry> {
        let mut seen = HashSet::new();
        let mut entries: Vec<BangEntry> = self
            .tokens
            .values()
            .filter(|entry| seen.insert(entry.key()))
            .map(|entry| {
                let key = entry.key();
                match self.tokens.get(&key) {
                    Some(owner) if owner.key() == key => owner,
                    _ => entry,
                }
            })
            .cloned()
            .collect();

        entries.sort_by_key(BangEntry::key);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(trigger: &str, extras: &[&str], url: &str, custom: bool) -> BangEntry {
        BangEntry {
            trigger: trigger.to_string(),
            name: trigger.to_uppercase(),
            category: None,
            sub_category: None,
            url_template: url.to_string(),
            domain: "example.com".to_string(),
            additional_triggers: Some(extras.iter().map(|s| s.to_string()).collect()),
            is_custom: custom.then_some(true),
        }
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let builtin = vec![entry("g", &["go"], "https://google/%s", false)];
        let custom = vec![entry("g", &["go"], "https://custom/%s", true)];

        let index = TriggerIndex::build(&builtin, &custom);
        let entries = index.entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].trigger, "g");
        assert_eq!(entries[0].url_template, "https://custom/%s");
        assert_eq!(index.get("GO").unwrap().url_template, "https://custom/%s");
    }

    #[test]
    fn test_partial_override_keeps_both_entries_reachable() {
        // The custom entry steals "go" only; "g" still points at the built-in.
        let builtin = vec![entry("g", &["go"], "https://google/%s", false)];
        let custom = vec![entry("mine", &["go"], "https://custom/%s", true)];

        let index = TriggerIndex::build(&builtin, &custom);
        assert_eq!(index.get("g").unwrap().url_template, "https://google/%s");
        assert_eq!(index.get("go").unwrap().trigger, "mine");

        let triggers: Vec<_> = index.entries().into_iter().map(|e| e.trigger).collect();
        assert_eq!(triggers, vec!["g", "mine"]);
    }

    #[test]
    fn test_override_without_aliases_keeps_custom_entry() {
        // "youtube" sorts before "yt" and still points at the built-in.
        let builtin = vec![entry("yt", &["youtube"], "https://youtube/%s", false)];
        let custom = vec![entry("yt", &[], "https://custom/%s", true)];

        let index = TriggerIndex::build(&builtin, &custom);
        assert_eq!(index.get("youtube").unwrap().url_template, "https://youtube/%s");

        let entries = index.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url_template, "https://custom/%s");
    }

    #[test]
    fn test_fully_shadowed_builtin_disappears() {
        let builtin = vec![entry("yt", &[], "https://youtube/%s", false)];
        let custom = vec![entry("video", &["yt"], "https://custom/%s", true)];

        let entries = TriggerIndex::build(&builtin, &custom).entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].trigger, "video");
    }

    #[test]
    fn test_entries_sorted_case_insensitively() {
        let builtin = vec![
            entry("b", &[], "https://b/%s", false),
            entry("C", &[], "https://c/%s", false),
            entry("a", &["aa", "aaa"], "https://a/%s", false),
        ];

        let triggers: Vec<_> = TriggerIndex::build(&builtin, &[])
            .entries()
            .into_iter()
            .map(|e| e.trigger)
            .collect();
        assert_eq!(triggers, vec!["a", "b", "C"]);
    }

    #[test]
    fn test_later_builtin_wins_token() {
        let builtin = vec![
            entry("first", &["dup"], "https://first/%s", false),
            entry("second", &["dup"], "https://second/%s", false),
        ];

        let index = TriggerIndex::build(&builtin, &[]);
        assert_eq!(index.get("dup").unwrap().trigger, "second");
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_empty_index() {
        let index = TriggerIndex::new();
        assert!(index.is_empty());
        assert!(index.get("w").is_none());
        assert!(index.entries().is_empty());
    }
}
