//! Search engine detection and query extraction for navigated URLs.

use url::Url;

/// Search engines whose result pages can carry a bang query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    Google,
    DuckDuckGo,
    Bing,
    Yahoo,
    Ecosia,
    Startpage,
    Unknown,
}

/// Hostname markers, checked in order. The first match wins.
const HOST_MARKERS: &[(&str, SearchEngine)] = &[
    ("google.", SearchEngine::Google),
    ("duckduckgo.com", SearchEngine::DuckDuckGo),
    ("bing.com", SearchEngine::Bing),
    ("yahoo.com", SearchEngine::Yahoo),
    ("search.yahoo.", SearchEngine::Yahoo),
    ("ecosia.org", SearchEngine::Ecosia),
    ("startpage.com", SearchEngine::Startpage),
];

impl SearchEngine {
    /// Query parameter holding the search text.
    pub fn query_param(self) -> Option<&'static str> {
        match self {
            SearchEngine::Google
            | SearchEngine::DuckDuckGo
            | SearchEngine::Bing
            | SearchEngine::Ecosia => Some("q"),
            SearchEngine::Yahoo => Some("p"),
            SearchEngine::Startpage => Some("query"),
            SearchEngine::Unknown => None,
        }
    }

    /// Parameter/value pair the browser's built-in search integration adds.
    ///
    /// `None` means the engine has no known marker.
    pub fn integration_marker(self) -> Option<(&'static str, &'static str)> {
        match self {
            SearchEngine::Google => Some(("client", "safari")),
            SearchEngine::DuckDuckGo => Some(("t", "safari")),
            SearchEngine::Bing => Some(("PC", "APPL")),
            _ => None,
        }
    }
}

/// Classify a URL by its lowercased host.
pub fn detect_engine(url: &Url) -> SearchEngine {
    let Some(host) = url.host_str() else {
        return SearchEngine::Unknown;
    };
    let host = host.to_lowercase();

    HOST_MARKERS
        .iter()
        .find(|(marker, _)| host.contains(marker))
        .map(|(_, engine)| *engine)
        .unwrap_or(SearchEngine::Unknown)
}

/// Whether the navigation came from the browser's own search field.
///
/// Engines without a marker are treated as integrated.
pub fn is_native_integration(url: &Url, engine: SearchEngine) -> bool {
    match engine.integration_marker() {
        Some((name, value)) => url.query_pairs().any(|(k, v)| k == name && v == value),
        None => true,
    }
}

/// Pull the literal search text out of the engine's query parameter.
pub fn extract_query(url: &Url, engine: SearchEngine) -> Option<String> {
    let param = engine.query_param()?;
    url.query_pairs()
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
}

/// A navigated URL that looks like an integrated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNavigation {
    pub engine: SearchEngine,
    pub query: String,
}

/// Detect, check the integration marker and extract the query.
///
/// Returns `None` for unknown engines, organic navigations and URLs without a query.
pub fn classify(url: &str) -> Option<SearchNavigation> {
    let url = Url::parse(url).ok()?;
    let engine = detect_engine(&url);
    if engine == SearchEngine::Unknown || !is_native_integration(&url, engine) {
        return None;
    }
    let query = extract_query(&url, engine)?;
    Some(SearchNavigation { engine, query })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_detect_engines() {
        let cases = [
            ("https://www.google.com/search?q=x", SearchEngine::Google),
            ("https://www.google.co.uk/search?q=x", SearchEngine::Google),
            ("https://duckduckgo.com/?q=x", SearchEngine::DuckDuckGo),
            ("https://www.bing.com/search?q=x", SearchEngine::Bing),
            ("https://search.yahoo.com/search?p=x", SearchEngine::Yahoo),
            ("https://search.yahoo.co.jp/search?p=x", SearchEngine::Yahoo),
            ("https://www.ecosia.org/search?q=x", SearchEngine::Ecosia),
            ("https://www.startpage.com/do/search?query=x", SearchEngine::Startpage),
            ("https://example.com/?q=x", SearchEngine::Unknown),
        ];

        for (input, expected) in cases {
            assert_eq!(detect_engine(&url(input)), expected, "{input}");
        }
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(
            detect_engine(&url("https://WWW.BING.COM/search?q=x")),
            SearchEngine::Bing
        );
    }

    #[test]
    fn test_hostless_url_is_unknown() {
        assert_eq!(detect_engine(&url("mailto:someone@example.com")), SearchEngine::Unknown);
    }

    #[test]
    fn test_google_integration_marker() {
        let with = url("https://www.google.com/search?q=foo&client=safari");
        assert_eq!(detect_engine(&with), SearchEngine::Google);
        assert!(is_native_integration(&with, SearchEngine::Google));
        assert_eq!(extract_query(&with, SearchEngine::Google).as_deref(), Some("foo"));

        let without = url("https://www.google.com/search?q=foo");
        assert!(!is_native_integration(&without, SearchEngine::Google));
    }

    #[test]
    fn test_other_markers() {
        assert!(is_native_integration(
            &url("https://duckduckgo.com/?q=x&t=safari"),
            SearchEngine::DuckDuckGo
        ));
        assert!(!is_native_integration(
            &url("https://duckduckgo.com/?q=x&t=h_"),
            SearchEngine::DuckDuckGo
        ));
        assert!(is_native_integration(
            &url("https://www.bing.com/search?q=x&PC=APPL"),
            SearchEngine::Bing
        ));
        assert!(!is_native_integration(
            &url("https://www.bing.com/search?q=x&pc=appl"),
            SearchEngine::Bing
        ));
    }

    #[test]
    fn test_engines_without_marker_are_permissive() {
        let u = url("https://www.ecosia.org/search?q=x");
        assert!(is_native_integration(&u, SearchEngine::Ecosia));
        assert!(is_native_integration(&u, SearchEngine::Yahoo));
        assert!(is_native_integration(&u, SearchEngine::Startpage));
        assert!(is_native_integration(&u, SearchEngine::Unknown));
    }

    #[test]
    fn test_extract_query_params() {
        assert_eq!(
            extract_query(&url("https://search.yahoo.com/search?p=hello+world"), SearchEngine::Yahoo)
                .as_deref(),
            Some("hello world")
        );
        assert_eq!(
            extract_query(
                &url("https://www.startpage.com/do/search?query=%21w%20rust"),
                SearchEngine::Startpage
            )
            .as_deref(),
            Some("!w rust")
        );
        assert_eq!(
            extract_query(&url("https://www.bing.com/search?form=x"), SearchEngine::Bing),
            None
        );
        assert_eq!(
            extract_query(&url("https://example.com/?q=x"), SearchEngine::Unknown),
            None
        );
    }

    #[test]
    fn test_classify() {
        let nav = classify("https://www.google.com/search?q=%21w+rust&client=safari").unwrap();
        assert_eq!(nav.engine, SearchEngine::Google);
        assert_eq!(nav.query, "!w rust");

        assert!(classify("https://www.google.com/search?q=rust").is_none());
        assert!(classify("https://example.com/?q=rust").is_none());
        assert!(classify("not a url").is_none());
        assert!(classify("https://www.ecosia.org/search").is_none());
    }
}
