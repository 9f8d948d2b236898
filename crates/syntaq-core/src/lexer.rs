//! Line reader for the block parser.
//!
//! Splits input into physical lines with `memchr` (SIMD on supported
//! platforms). Each line is available both without its terminator, for
//! marker matching, and verbatim, for the contents of fenced blocks.

use memchr::memchr;

use crate::span::Span;

/// A single physical line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text without `\n` or `\r\n`.
    pub text: &'a str,
    /// The line exactly as it appears in the input, terminator included.
    pub raw: &'a str,
    /// Byte span of `raw` in the input.
    pub span: Span,
}

impl<'a> Line<'a> {
    #[inline(always)]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }
}

/// Iterator over the lines of an input string.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Consume and return the next line.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let bytes = self.input.as_bytes();
        if self.offset >= bytes.len() {
            return None;
        }

        let start = self.offset;
        let (text_end, end) = match memchr(b'\n', &bytes[start..]) {
            Some(pos) => {
                let newline = start + pos;
                let text_end = if newline > start && bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                };
                (text_end, newline + 1)
            }
            None => (bytes.len(), bytes.len()),
        };
        self.offset = end;

        // `\r` and `\n` are ASCII, so both cut points are char boundaries.
        Some(Line {
            text: &self.input[start..text_end],
            raw: &self.input[start..end],
            span: Span::new(start as u32, end as u32),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.next_line()
    }
}
