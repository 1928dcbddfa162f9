//! Login URL extraction
//!
//! Tool output announcing the login URL is free text, often markdown, and
//! URLs sometimes arrive broken across a line boundary. This module finds
//! the first well-formed HTTP(S) URL: a markdown link `[label](url)` wins
//! over a bare URL, and line-broken URLs are rejoined before matching.

use regex::Regex;
use std::sync::LazyLock;

/// Markdown link `[label](url)`; the label may span lines
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[.*?\]\((https?://[^\s)]+)\)").expect("markdown link pattern is valid")
});

/// A URL split by a line break: head, break, continuation
static BROKEN_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https?://[^\s)\]]+)\s*\n\s*([^\s)\]]+)").expect("broken URL pattern is valid")
});

/// A bare URL
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)\]]+").expect("bare URL pattern is valid"));

/// Extract the first HTTP(S) login URL from tool output
///
/// Handles both markdown-link and plain-text formats, robust to line breaks.
/// Returns `None` when the text contains no URL.
///
/// # Example
///
/// ```
/// use crew_portfolio::extract_login_url;
///
/// let output = "Click [here](https://kite.example/connect/login) to continue";
/// assert_eq!(
///     extract_login_url(output).as_deref(),
///     Some("https://kite.example/connect/login"),
/// );
/// ```
pub fn extract_login_url(text: &str) -> Option<String> {
    // Markdown link form wins
    if let Some(captures) = MARKDOWN_LINK.captures(text) {
        return Some(captures[1].replace('\n', ""));
    }

    // Rejoin URLs broken by line breaks, then take the first bare URL
    let rejoined = BROKEN_URL.replace_all(text, "${1}${2}");
    BARE_URL.find(&rejoined).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_link_returns_inner_url_exactly() {
        let text = "Please open [Login to Kite](https://kite.zerodha.com/connect/login?v=3) now";
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://kite.zerodha.com/connect/login?v=3"),
        );
    }

    #[test]
    fn test_markdown_link_preferred_over_bare_url() {
        let text = "See https://example.com/other and [login](https://kite.example/login)";
        // The markdown form wins even when a bare URL appears earlier
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://kite.example/login"),
        );
    }

    #[test]
    fn test_bare_url() {
        let text = "Open this URL to authenticate: https://kite.example/connect/login?api_key=abc";
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://kite.example/connect/login?api_key=abc"),
        );
    }

    #[test]
    fn test_bare_url_broken_across_line_boundary() {
        let text = "Visit https://kite.example/connect/\nlogin?api_key=abc to continue";
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://kite.example/connect/login?api_key=abc"),
        );
    }

    #[test]
    fn test_line_break_inside_markdown_link() {
        let text = "Click [here](https://x.test/a\nb)";
        assert_eq!(extract_login_url(text).as_deref(), Some("https://x.test/ab"));
    }

    #[test]
    fn test_no_url_returns_none() {
        assert_eq!(extract_login_url("No link in this output."), None);
        assert_eq!(extract_login_url(""), None);
    }

    #[test]
    fn test_first_of_multiple_bare_urls() {
        let text = "https://first.example/a then https://second.example/b";
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://first.example/a"),
        );
    }

    #[test]
    fn test_url_terminated_by_bracket() {
        let text = "URL in brackets [https://kite.example/login] here";
        assert_eq!(
            extract_login_url(text).as_deref(),
            Some("https://kite.example/login"),
        );
    }
}
