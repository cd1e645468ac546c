//! Bang entries and parse results.
//!
//! Both catalogs share one compact JSON schema:
//!
//! ```json
//! {"t": "w", "s": "Wikipedia", "c": "Reference", "sc": "Encyclopedia",
//!  "u": "https://en.wikipedia.org/wiki/%s", "d": "en.wikipedia.org",
//!  "ts": ["wiki"], "ic": true}
//! ```

use serde::{Deserialize, Serialize};

/// A trigger (plus aliases) bound to a URL template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BangEntry {
    #[serde(rename = "t")]
    pub trigger: String,

    #[serde(rename = "s")]
    pub name: String,

    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "sc", default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    #[serde(rename = "u")]
    pub url_template: String,

    #[serde(rename = "d")]
    pub domain: String,

    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub additional_triggers: Option<Vec<String>>,

    /// `None` means built-in.
    #[serde(rename = "ic", default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
}

impl BangEntry {
    /// Primary trigger first, then the additional ones in order.
    pub fn all_triggers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.trigger.as_str()).chain(
            self.additional_triggers
                .iter()
                .flatten()
                .map(String::as_str),
        )
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom.unwrap_or(false)
    }

    /// Case-folded primary trigger, the key entries are deduplicated and sorted by.
    pub fn key(&self) -> String {
        self.trigger.to_lowercase()
    }
}

// Entries are identified by their primary trigger only.
impl PartialEq for BangEntry {
    fn eq(&self, other: &Self) -> bool {
        self.trigger == other.trigger
    }
}

impl Eq for BangEntry {}

/// A bang found in a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BangMatch {
    pub bang: BangEntry,
    /// The query with the `!token` removed and whitespace trimmed.
    pub query: String,
    /// The token as typed, without the `!`.
    pub matched_trigger: String,
}

/// Raw fields from the entry-editing form.
#[derive(Debug, Clone, Default)]
pub struct BangDraft {
    pub trigger: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub url_template: String,
    pub domain: String,
    /// Comma separated.
    pub additional_triggers: String,
}

impl BangDraft {
    /// Normalize the form input into a custom entry.
    ///
    /// This only cleans up whitespace and casing; rule checks happen in
    /// [`crate::services::validator::validate`].
    pub fn into_entry(self) -> BangEntry {
        let extras: Vec<String> = self
            .additional_triggers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        BangEntry {
            trigger: self.trigger.trim().to_lowercase(),
            name: self.name.trim().to_string(),
            category: non_empty(&self.category),
            sub_category: non_empty(&self.sub_category),
            url_template: self.url_template.trim().to_string(),
            domain: self.domain.trim().to_string(),
            additional_triggers: if extras.is_empty() { None } else { Some(extras) },
            is_custom: Some(true),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
