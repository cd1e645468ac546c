//! Bang detection in free-text queries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bang::{BangEntry, BangMatch};
use crate::services::redirect;
use crate::services::trigger_index::TriggerIndex;

static BANG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!([A-Za-z0-9]+)").expect("bang pattern is a valid regex")
});

/// Resolves `!token`s in search queries against a trigger index.
#[derive(Debug, Clone, Default)]
pub struct BangParser {
    index: TriggerIndex,
}

impl BangParser {
    pub fn new(index: TriggerIndex) -> Self {
        Self { index }
    }

    /// Build a parser straight from the two catalogs.
    pub fn from_catalogs(builtin: &[BangEntry], custom: &[BangEntry]) -> Self {
        Self::new(TriggerIndex::build(builtin, custom))
    }

    /// Find the first `!token` in `query` and resolve it.
    ///
    /// Only the first token is considered: if it is not a known trigger the
    /// query has no bang, even when a later token would match.
    pub fn parse_bang(&self, query: &str) -> Option<BangMatch> {
        let caps = BANG_PATTERN.captures(query)?;
        let whole = caps.get(0)?;
        let token = caps.get(1)?.as_str();

        let bang = self.index.get(token)?;

        Some(BangMatch {
            bang: bang.clone(),
            query: join_around(&query[..whole.start()], &query[whole.end()..]),
            matched_trigger: token.to_string(),
        })
    }

    /// Parse and build the destination URL in one go.
    pub fn resolve(&self, query: &str) -> Option<(BangMatch, String)> {
        let bang_match = self.parse_bang(query)?;
        let url = redirect::build_redirect(&bang_match);
        Some((bang_match, url))
    }
}

/// Join the text on either side of a removed token.
///
/// The outer ends are trimmed and the whitespace at the seam collapses to a
/// single space, so `"weather !w today"` becomes `"weather today"`. Whitespace
/// away from the seam is kept as typed.
fn join_around(before: &str, after: &str) -> String {
    let before = before.trim();
    let after = after.trim();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> BangParser {
        let builtin: Vec<BangEntry> = serde_json::from_value(serde_json::json!([
            {"t": "w", "s": "Wikipedia", "u": "https://en.wikipedia.org/wiki/{{{s}}}",
             "d": "en.wikipedia.org", "ts": ["wiki"]},
            {"t": "gh", "s": "GitHub", "u": "https://github.com/search?q=%s", "d": "github.com"}
        ]))
        .unwrap();
        BangParser::from_catalogs(&builtin, &[])
    }

    #[test]
    fn test_bang_in_middle() {
        let m = parser().parse_bang("weather !w today").unwrap();
        assert_eq!(m.matched_trigger, "w");
        assert_eq!(m.query, "weather today");
        assert_eq!(m.bang.trigger, "w");
    }

    #[test]
    fn test_bang_at_start() {
        let m = parser().parse_bang("!w rust language").unwrap();
        assert_eq!(m.query, "rust language");
    }

    #[test]
    fn test_bang_at_end() {
        let m = parser().parse_bang("rust language !gh").unwrap();
        assert_eq!(m.query, "rust language");
        assert_eq!(m.bang.trigger, "gh");
    }

    #[test]
    fn test_only_bang_gives_empty_query() {
        let m = parser().parse_bang("!w").unwrap();
        assert_eq!(m.query, "");
    }

    #[test]
    fn test_unknown_first_bang_stops_scanning() {
        assert!(parser().parse_bang("!zzz hello").is_none());
        assert!(parser().parse_bang("!zzz hello !w").is_none());
    }

    #[test]
    fn test_no_bang() {
        assert!(parser().parse_bang("plain query").is_none());
        assert!(parser().parse_bang("wow! such query").is_none());
        assert!(parser().parse_bang("").is_none());
    }

    #[test]
    fn test_matched_trigger_keeps_casing() {
        let m = parser().parse_bang("Rust !WIKI").unwrap();
        assert_eq!(m.matched_trigger, "WIKI");
        assert_eq!(m.bang.trigger, "w");
        assert_eq!(m.query, "Rust");
    }

    #[test]
    fn test_token_stops_at_non_alphanumeric() {
        let m = parser().parse_bang("!w-foo").unwrap();
        assert_eq!(m.matched_trigger, "w");
        assert_eq!(m.query, "-foo");
    }

    #[test]
    fn test_glued_bang_keeps_surrounding_text() {
        let m = parser().parse_bang("foo!w bar").unwrap();
        assert_eq!(m.query, "foo bar");

        let m = parser().parse_bang("  spaced   !gh  ").unwrap();
        assert_eq!(m.query, "spaced");
    }

    #[test]
    fn test_seam_whitespace_collapses_to_one_space() {
        assert_eq!(parser().parse_bang("a\t!w\tb").unwrap().query, "a b");
        assert_eq!(parser().parse_bang("a   !w   b").unwrap().query, "a b");
        assert_eq!(parser().parse_bang("a  b !w c\td").unwrap().query, "a  b c\td");
    }

    #[test]
    fn test_resolve_builds_url() {
        let (m, url) = parser().resolve("Foo Bar !w").unwrap();
        assert_eq!(m.query, "Foo Bar");
        assert_eq!(url, "https://en.wikipedia.org/wiki/Foo%20Bar");
    }
}
