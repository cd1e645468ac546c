//! Destination URL construction.

use crate::bang::BangMatch;

/// Placeholder used by the Kagi catalog format.
pub const KAGI_PLACEHOLDER: &str = "{{{s}}}";

/// Placeholder used by the built-in and custom catalogs.
pub const PLACEHOLDER: &str = "%s";

/// Substitute the escaped residual query into the entry's URL template.
///
/// `{{{s}}}` is preferred when present; otherwise `%s` is replaced. Every
/// occurrence of the chosen placeholder is replaced.
pub fn build_redirect(bang_match: &BangMatch) -> String {
    fill_template(&bang_match.bang.url_template, &bang_match.query)
}

/// Template substitution without a parse result, e.g. for previews.
pub fn fill_template(template: &str, query: &str) -> String {
    let encoded = urlencoding::encode(query);
    if template.contains(KAGI_PLACEHOLDER) {
        template.replace(KAGI_PLACEHOLDER, &encoded)
    } else {
        template.replace(PLACEHOLDER, &encoded)
    }
}
