//! HTML emission with a tag-nesting stack.
//!
//! [`HtmlWriter`] appends fragments to a single output buffer and tracks
//! which tags are currently open. Closing a tag that has open descendants
//! closes those descendants first, so the output stays properly nested as
//! long as every close targets a tag that is actually open.
//!
//! Plain text may be *deferred*: when the writer has a [`TextProcessor`],
//! deferred text is accumulated and handed to the processor as one run just
//! before the next structural write. The inline renderer uses this to run
//! the auto-linker over whole runs of text instead of individual tokens.

use std::borrow::Cow;

use crate::error::HtmlError;

/// Post-processor for deferred text. Receives the raw accumulated text and
/// appends finished (already escaped) HTML to the output.
pub type TextProcessor = fn(&str, &mut String);

/// An attribute name and optional value. Attributes without a value are
/// omitted from the output.
pub type Attribute<'a> = (&'a str, Option<&'a str>);

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

#[inline(always)]
fn entity(b: u8) -> Option<&'static str> {
    match b {
        b'&' => Some("&amp;"),
        b'\'' => Some("&apos;"),
        b'"' => Some("&quot;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    }
}

/// Replace `& ' " < >` with named HTML entities.
///
/// Each character is replaced independently, so the output of one
/// replacement is never re-escaped within the same call. Calling this twice
/// on the same text does double-encode.
///
/// ```rust
/// use syntaq_core::html::escape;
///
/// assert_eq!(escape("a < b & 'c'"), "a &lt; b &amp; &apos;c&apos;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|b| entity(b).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    escape_into(&mut out, text);
    Cow::Owned(out)
}

/// Append `text` to `out` with entities replaced (see [`escape`]).
pub fn escape_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(replacement) = entity(b) {
            // All entity bytes are ASCII, so `i` is always a char boundary.
            out.push_str(&text[start..i]);
            out.push_str(replacement);
            start = i + 1;
        }
    }
    out.push_str(&text[start..]);
}

/// Incremental HTML builder.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    html: String,
    stack: Vec<&'static str>,
    pending: String,
    processor: Option<TextProcessor>,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that routes deferred text through `processor`.
    pub fn with_processor(processor: TextProcessor) -> Self {
        Self {
            processor: Some(processor),
            ..Self::default()
        }
    }

    /// Currently open tags, outermost first.
    pub fn stack(&self) -> &[&'static str] {
        &self.stack
    }

    /// Check whether `tag` is open anywhere on the stack.
    pub fn is_open(&self, tag: &str) -> bool {
        self.stack.iter().any(|t| *t == tag)
    }

    /// HTML written so far, excluding any deferred text not yet flushed.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        match self.processor {
            Some(process) => process(&self.pending, &mut self.html),
            None => escape_into(&mut self.html, &self.pending),
        }
        self.pending.clear();
    }

    /// Write entity-encoded text immediately.
    pub fn write_text(&mut self, text: &str) {
        self.flush();
        escape_into(&mut self.html, text);
    }

    /// Write text through the post-processor, if one is configured.
    ///
    /// The text is buffered until the next structural write or [`close`],
    /// so consecutive deferred writes are processed as a single run.
    ///
    /// [`close`]: HtmlWriter::close
    pub fn write_deferred(&mut self, text: &str) {
        if self.processor.is_some() {
            self.pending.push_str(text);
        } else {
            self.write_text(text);
        }
    }

    /// Write already-safe HTML verbatim.
    pub fn write_html(&mut self, html: &str) {
        self.flush();
        self.html.push_str(html);
    }

    fn write_start_tag(&mut self, tag: &str, attributes: &[Attribute<'_>]) {
        self.flush();
        self.html.push('<');
        self.html.push_str(tag);
        if !attributes.is_empty() {
            let mut present: Vec<(&str, &str)> = attributes
                .iter()
                .filter_map(|&(name, value)| value.map(|v| (name, v)))
                .collect();
            present.sort_unstable_by_key(|&(name, _)| name);
            for (name, value) in present {
                self.html.push(' ');
                self.html.push_str(name);
                self.html.push_str("=\"");
                escape_into(&mut self.html, value);
                self.html.push('"');
            }
        }
        self.html.push('>');
    }

    /// Write a start tag and push it onto the open-tag stack.
    ///
    /// Attributes are written in name order with values entity-encoded.
    pub fn open_tag(&mut self, tag: &'static str, attributes: &[Attribute<'_>]) {
        self.write_start_tag(tag, attributes);
        self.stack.push(tag);
    }

    /// Write a start tag that is never closed (e.g. `<br>`, `<img>`).
    pub fn void_tag(&mut self, tag: &str, attributes: &[Attribute<'_>]) {
        self.write_start_tag(tag, attributes);
    }

    /// Close the innermost open tag, or every tag down to and including
    /// the nearest open `tag`.
    pub fn close_tag(&mut self, tag: Option<&str>) -> Result<(), HtmlError> {
        let Some(&innermost) = self.stack.last() else {
            return Err(HtmlError::EmptyStack);
        };
        let target = tag.unwrap_or(innermost);
        let index = self
            .stack
            .iter()
            .rposition(|t| *t == target)
            .ok_or_else(|| HtmlError::unopened_tag(target))?;

        self.flush();
        while self.stack.len() > index {
            if let Some(open) = self.stack.pop() {
                self.html.push_str("</");
                self.html.push_str(open);
                self.html.push('>');
            }
        }
        Ok(())
    }

    /// Write a complete element with either text or HTML content.
    ///
    /// Void elements written without content get no closing tag.
    pub fn element(
        &mut self,
        tag: &'static str,
        attributes: &[Attribute<'_>],
        text: Option<&str>,
        html: Option<&str>,
    ) -> Result<(), HtmlError> {
        if text.is_some() && html.is_some() {
            return Err(HtmlError::conflicting_content(tag));
        }
        if text.is_none() && html.is_none() && VOID_ELEMENTS.contains(&tag) {
            self.void_tag(tag, attributes);
            return Ok(());
        }
        self.open_tag(tag, attributes);
        if let Some(text) = text {
            self.write_text(text);
        }
        if let Some(html) = html {
            self.write_html(html);
        }
        self.close_tag(Some(tag))
    }

    /// Flush deferred text and close every open tag, innermost first.
    pub fn close(&mut self) {
        self.flush();
        while let Some(open) = self.stack.pop() {
            self.html.push_str("</");
            self.html.push_str(open);
            self.html.push('>');
        }
    }

    /// Close everything and return the finished HTML.
    pub fn finish(mut self) -> String {
        self.close();
        self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(text: &str, out: &mut String) {
        escape_into(out, &text.to_uppercase());
    }

    #[test]
    fn test_escape_all_entities() {
        assert_eq!(escape(r#"&'"<>"#), "&amp;&apos;&quot;&lt;&gt;");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_passes_non_ascii_through() {
        assert_eq!(escape("café <ß>"), "café &lt;ß&gt;");
        assert!(matches!(escape("naïve"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_attributes_sorted_and_absent_values_omitted() {
        let mut out = HtmlWriter::new();
        out.void_tag(
            "img",
            &[("src", Some("a.png")), ("title", None), ("alt", Some("x & y"))],
        );
        assert_eq!(out.finish(), r#"<img alt="x &amp; y" src="a.png">"#);
    }

    #[test]
    fn test_close_tag_auto_closes_descendants() {
        let mut out = HtmlWriter::new();
        out.open_tag("p", &[]);
        out.open_tag("strong", &[]);
        out.open_tag("em", &[]);
        out.write_text("x");
        out.close_tag(Some("strong")).unwrap();
        assert_eq!(out.stack(), ["p"]);
        assert_eq!(out.finish(), "<p><strong><em>x</em></strong></p>");
    }

    #[test]
    fn test_close_tag_errors() {
        let mut out = HtmlWriter::new();
        assert_eq!(out.close_tag(None), Err(HtmlError::EmptyStack));
        assert_eq!(out.close_tag(Some("a")), Err(HtmlError::EmptyStack));
        out.open_tag("em", &[]);
        assert_eq!(out.close_tag(Some("a")), Err(HtmlError::unopened_tag("a")));
        assert_eq!(out.stack(), ["em"]);
    }

    #[test]
    fn test_element_content_variants() {
        let mut out = HtmlWriter::new();
        out.element("code", &[], Some("1 < 2"), None).unwrap();
        out.element("li", &[], None, Some("<b>x</b>")).unwrap();
        out.element("code", &[], None, None).unwrap();
        out.element("hr", &[], None, None).unwrap();
        assert_eq!(
            out.finish(),
            "<code>1 &lt; 2</code><li><b>x</b></li><code></code><hr>"
        );
    }

    #[test]
    fn test_element_rejects_both_contents() {
        let mut out = HtmlWriter::new();
        let err = out.element("p", &[], Some("a"), Some("b")).unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(out.finish(), "");
    }

    #[test]
    fn test_deferred_text_is_processed_as_one_run() {
        let mut out = HtmlWriter::with_processor(shout);
        out.write_deferred("ab");
        out.write_deferred("c<");
        out.write_text("d<");
        out.write_deferred("e");
        out.open_tag("em", &[]);
        out.write_deferred("f");
        assert_eq!(out.finish(), "ABC&lt;d&lt;E<em>F</em>");
    }

    #[test]
    fn test_deferred_without_processor_escapes_immediately() {
        let mut out = HtmlWriter::new();
        out.write_deferred("a&b");
        assert_eq!(out.as_str(), "a&amp;b");
    }
}
