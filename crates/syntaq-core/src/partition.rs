//! Marker-table tokenizer.
//!
//! A [`Partitioner`] splits text into slices at occurrences of a fixed set
//! of marker strings. Markers are tried in declaration order at each
//! position, so a longer marker must be declared before a shorter one that
//! shares its prefix (`{{{` before `{{`).
//!
//! An escape marker makes the marker immediately following it literal: the
//! pair is emitted as a single token (`~**`) which consumers recognise with
//! [`Partitioner::unescape`]. An escape not followed by a marker is just
//! text.
//!
//! Tokens are borrowed slices of the input and their concatenation is
//! always exactly the input.

/// Tokenizer configured with an escape marker and a marker table.
#[derive(Debug, Clone)]
pub struct Partitioner<'m> {
    escape: &'m str,
    markers: Vec<&'m str>,
    /// Lead bytes of the escape and every marker.
    leads: [bool; 256],
}

impl<'m> Partitioner<'m> {
    /// Create a partitioner. An empty `escape` disables escaping; empty
    /// markers are ignored.
    pub fn new(escape: &'m str, markers: &[&'m str]) -> Self {
        let markers: Vec<&'m str> = markers.iter().copied().filter(|m| !m.is_empty()).collect();
        let mut leads = [false; 256];
        for marker in markers.iter().chain(std::iter::once(&escape)) {
            if let Some(&b) = marker.as_bytes().first() {
                leads[b as usize] = true;
            }
        }
        Self {
            escape,
            markers,
            leads,
        }
    }

    /// Check whether `token` is exactly one of the configured markers.
    pub fn is_marker(&self, token: &str) -> bool {
        self.markers.contains(&token)
    }

    /// If `token` is an escaped marker, return the marker it escapes.
    ///
    /// ```rust
    /// use syntaq_core::partition::Partitioner;
    ///
    /// let p = Partitioner::new("~", &["**"]);
    /// assert_eq!(p.unescape("~**"), Some("**"));
    /// assert_eq!(p.unescape("~~"), Some("~"));
    /// assert_eq!(p.unescape("~foo"), None);
    /// ```
    pub fn unescape<'t>(&self, token: &'t str) -> Option<&'t str> {
        if self.escape.is_empty() {
            return None;
        }
        let rest = token.strip_prefix(self.escape)?;
        (rest == self.escape || self.is_marker(rest)).then_some(rest)
    }

    /// Length of the token (marker or escaped marker) starting at the
    /// beginning of `rest`, if any.
    fn match_at(&self, rest: &str) -> Option<usize> {
        if !self.escape.is_empty() && rest.starts_with(self.escape) {
            let after = &rest[self.escape.len()..];
            return std::iter::once(&self.escape)
                .chain(self.markers.iter())
                .find(|m| after.starts_with(**m))
                .map(|m| self.escape.len() + m.len());
        }
        self.markers
            .iter()
            .find(|m| rest.starts_with(**m))
            .map(|m| m.len())
    }

    /// Lazily split `text` into tokens.
    ///
    /// ```rust
    /// use syntaq_core::partition::Partitioner;
    ///
    /// let p = Partitioner::new("~", &["**"]);
    /// let tokens: Vec<_> = p.partition("foo~**bar**").collect();
    /// assert_eq!(tokens, ["foo", "~**", "bar", "**"]);
    /// ```
    pub fn partition<'p, 't>(&'p self, text: &'t str) -> Tokens<'p, 'm, 't> {
        Tokens {
            partitioner: self,
            text,
            literal_start: 0,
            pos: 0,
            queued: None,
        }
    }
}

/// Iterator over the tokens of one text, created by
/// [`Partitioner::partition`].
#[derive(Debug, Clone)]
pub struct Tokens<'p, 'm, 't> {
    partitioner: &'p Partitioner<'m>,
    text: &'t str,
    literal_start: usize,
    pos: usize,
    /// A matched marker waiting behind the literal text that preceded it.
    queued: Option<&'t str>,
}

impl<'t> Iterator for Tokens<'_, '_, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if let Some(token) = self.queued.take() {
            return Some(token);
        }

        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            // Lead bytes of markers are never UTF-8 continuation bytes, so a
            // hit here is always on a char boundary.
            if !self.partitioner.leads[bytes[self.pos] as usize] {
                self.pos += 1;
                continue;
            }
            let Some(len) = self.partitioner.match_at(&self.text[self.pos..]) else {
                self.pos += 1;
                continue;
            };

            let marker = &self.text[self.pos..self.pos + len];
            let literal = &self.text[self.literal_start..self.pos];
            self.pos += len;
            self.literal_start = self.pos;
            if literal.is_empty() {
                return Some(marker);
            }
            self.queued = Some(marker);
            return Some(literal);
        }

        if self.literal_start < bytes.len() {
            let literal = &self.text[self.literal_start..];
            self.literal_start = bytes.len();
            return Some(literal);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens<'t>(p: &Partitioner<'_>, text: &'t str) -> Vec<&'t str> {
        p.partition(text).collect()
    }

    #[test]
    fn test_no_markers_present() {
        let p = Partitioner::new("~", &["**"]);
        assert_eq!(tokens(&p, "foo bar"), ["foo bar"]);
        assert!(tokens(&p, "").is_empty());
    }

    #[test]
    fn test_marker_at_start_and_end() {
        let p = Partitioner::new("~", &["**"]);
        assert_eq!(tokens(&p, "**foo bar"), ["**", "foo bar"]);
        assert_eq!(tokens(&p, "foo bar**"), ["foo bar", "**"]);
    }

    #[test]
    fn test_escaped_marker_is_one_token() {
        let p = Partitioner::new("~", &["**"]);
        assert_eq!(tokens(&p, "foo~**bar"), ["foo", "~**", "bar"]);
    }

    #[test]
    fn test_escape_before_non_marker_is_text() {
        let p = Partitioner::new("~", &["**"]);
        assert_eq!(tokens(&p, "foo~bar"), ["foo~bar"]);
        assert_eq!(tokens(&p, "foo~"), ["foo~"]);
    }

    #[test]
    fn test_escaped_escape() {
        let p = Partitioner::new("~", &["|"]);
        assert_eq!(tokens(&p, "a~~|b"), ["a", "~~", "|", "b"]);
        assert_eq!(tokens(&p, "a~~~|b"), ["a", "~~", "~|", "b"]);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let long_first = Partitioner::new("~", &["{{{", "{{"]);
        assert_eq!(tokens(&long_first, "{{{x"), ["{{{", "x"]);
        let short_first = Partitioner::new("~", &["{{", "{{{"]);
        assert_eq!(tokens(&short_first, "{{{x"), ["{{", "{x"]);
    }

    #[test]
    fn test_partition_is_restartable() {
        let p = Partitioner::new("~", &["//"]);
        assert_eq!(tokens(&p, "a//b"), ["a", "//", "b"]);
        assert_eq!(tokens(&p, "//"), ["//"]);
    }

    #[test]
    fn test_without_escape() {
        let p = Partitioner::new("", &["|"]);
        assert_eq!(tokens(&p, "a~|b"), ["a~", "|", "b"]);
        assert_eq!(p.unescape("~|"), None);
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let tables: [&[&str]; 3] = [
            &["**", "//", "[[", "]]", "|"],
            &["é", "ß", "~"],
            &["a", "aa", "aaa"],
        ];
        let inputs = [
            "",
            "~",
            "~~~",
            "plain text",
            "**bold** //em// [[link|label]] ~**x~",
            "naïve café ~é ßß ~ß",
            "aaaaaaa~aa~",
            "日本語 **テキスト** ~//",
        ];
        for markers in tables {
            let p = Partitioner::new("~", markers);
            for input in inputs {
                assert_eq!(tokens(&p, input).concat(), input, "markers {markers:?}");
            }
        }
    }
}
