//! Bare URL detection for plain text.
//!
//! Runs of plain text are scanned with a permissive URL pattern that
//! accepts scheme-prefixed URLs (`http://…`, `mailto:…`), `www.` hosts and
//! `host.tld/path` forms. Balanced parentheses are allowed inside a URL;
//! trailing punctuation is not. Each match becomes an anchor whose `href`
//! and label are the matched text, unchanged apart from entity encoding.

use std::sync::LazyLock;

use regex::Regex;

use crate::html::escape_into;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:[a-z][\w-]+:(?:/{1,3}|[a-z0-9%])|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\((?:[^\s()<>]+|\([^\s()<>]+\))*\))+(?:\((?:[^\s()<>]+|\([^\s()<>]+\))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#,
    )
    .expect("URL pattern is valid")
});

/// Append `text` to `out`, escaped, with bare URLs wrapped in anchors.
///
/// Matches the [`TextProcessor`](crate::html::TextProcessor) signature so
/// it can be installed on an [`HtmlWriter`](crate::html::HtmlWriter).
pub fn auto_link_into(text: &str, out: &mut String) {
    let mut last = 0;
    for m in URL_PATTERN.find_iter(text) {
        escape_into(out, &text[last..m.start()]);
        out.push_str("<a href=\"");
        escape_into(out, m.as_str());
        out.push_str("\">");
        escape_into(out, m.as_str());
        out.push_str("</a>");
        last = m.end();
    }
    escape_into(out, &text[last..]);
}

/// Escape `text` and link any bare URLs in it.
///
/// ```rust
/// use syntaq_core::autolink::auto_link;
///
/// assert_eq!(
///     auto_link("see http://example.com."),
///     r#"see <a href="http://example.com">http://example.com</a>."#
/// );
/// ```
pub fn auto_link(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    auto_link_into(text, &mut out);
    out
}
