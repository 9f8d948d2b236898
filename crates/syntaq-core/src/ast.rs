//! Block-level document structure.
//!
//! The parser groups input lines into [`Block`]s. Blocks borrow their text
//! from the input; inline markup inside them is left unparsed until the
//! document is rendered.

use crate::span::Span;
use crate::table::TableRow;

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    /// Content blocks in document order.
    pub blocks: Vec<Block<'a>>,
    /// Text of the highest-ranking heading (lowest level, first wins).
    pub title: Option<&'a str>,
    /// Source span covering the entire input.
    pub span: Span,
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<'a> {
    /// Consecutive plain lines, joined with spaces when rendered.
    Paragraph(Paragraph<'a>),
    /// `=` to `======` heading.
    Heading(Heading<'a>),
    /// `----` rule.
    HorizontalRule(Span),
    /// Run of `#`/`*` items with compatible signatures.
    List(List<'a>),
    /// `{{{` … `}}}` block, written escaped.
    Preformatted(Fenced<'a>),
    /// ```` ``` ```` … ```` ``` ```` block, one numbered item per line.
    Code(Fenced<'a>),
    /// `"""` … `"""` block, each line inline-rendered.
    Quote(Fenced<'a>),
    /// Consecutive `|` rows.
    Table(Table<'a>),
}

/// Block categories, as reported by [`Block::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    HorizontalRule,
    OrderedList,
    UnorderedList,
    Preformatted,
    CodeBlock,
    Quote,
    Table,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::HorizontalRule => "horizontal_rule",
            BlockKind::OrderedList => "ordered_list",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::Preformatted => "preformatted",
            BlockKind::CodeBlock => "code_block",
            BlockKind::Quote => "quote",
            BlockKind::Table => "table",
        }
    }
}

impl Block<'_> {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Heading(_) => BlockKind::Heading,
            Block::HorizontalRule(_) => BlockKind::HorizontalRule,
            Block::List(list) if list.is_ordered() => BlockKind::OrderedList,
            Block::List(_) => BlockKind::UnorderedList,
            Block::Preformatted(_) => BlockKind::Preformatted,
            Block::Code(_) => BlockKind::CodeBlock,
            Block::Quote(_) => BlockKind::Quote,
            Block::Table(_) => BlockKind::Table,
        }
    }

    /// Byte range of the source lines this block was built from.
    pub fn span(&self) -> Span {
        match self {
            Block::Paragraph(p) => p.span,
            Block::Heading(h) => h.span,
            Block::HorizontalRule(span) => *span,
            Block::List(l) => l.span,
            Block::Preformatted(f) | Block::Code(f) | Block::Quote(f) => f.span,
            Block::Table(t) => t.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    /// Source lines with trailing whitespace removed.
    pub lines: Vec<&'a str>,
    pub span: Span,
}

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A single-line heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Heading level (1-6).
    pub level: u8,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Heading<'a> {
    /// Parse a line starting with `=`.
    ///
    /// Only the first six `=` count towards the level; any further ones
    /// stay at the start of the text. Trailing `=` and surrounding
    /// whitespace are removed.
    ///
    /// ```rust
    /// use syntaq_core::ast::Heading;
    /// use syntaq_core::span::Span;
    ///
    /// let h = Heading::parse("== E=mc^2 ==", Span::default()).unwrap();
    /// assert_eq!((h.level, h.text), (2, "E=mc^2"));
    ///
    /// let h = Heading::parse("======= foo =======", Span::default()).unwrap();
    /// assert_eq!((h.level, h.text), (6, "= foo"));
    /// ```
    pub fn parse(line: &'a str, span: Span) -> Option<Self> {
        let markers = line.bytes().take_while(|&b| b == b'=').count();
        if markers == 0 {
            return None;
        }
        let level = markers.min(HEADING_TAGS.len());
        let text = line[level..].trim().trim_end_matches('=').trim_end();
        Some(Self {
            level: level as u8,
            text,
            span,
        })
    }

    pub fn tag(&self) -> &'static str {
        HEADING_TAGS[usize::from(self.level.clamp(1, 6)) - 1]
    }
}

/// A list block. Items are kept flat; nesting comes from their signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<'a> {
    pub items: Vec<ListItem<'a>>,
    pub span: Span,
}

impl List<'_> {
    /// Whether the outermost list is ordered (`#`).
    pub fn is_ordered(&self) -> bool {
        self.items.first().is_some_and(|item| item.is_ordered_at(0))
    }
}

/// One list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
    /// The leading run of `#` and `*` characters, e.g. `*#`.
    pub signature: &'a str,
    /// Item text after the signature, trimmed.
    pub content: &'a str,
}

impl<'a> ListItem<'a> {
    /// Parse a left-trimmed line starting with `#` or `*`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let depth = line.bytes().take_while(|&b| b == b'#' || b == b'*').count();
        if depth == 0 {
            return None;
        }
        Some(Self {
            signature: &line[..depth],
            content: line[depth..].trim(),
        })
    }

    /// Nesting depth (the signature length).
    pub fn level(&self) -> usize {
        self.signature.len()
    }

    /// Whether the list at `depth` (0-based) is ordered.
    pub fn is_ordered_at(&self, depth: usize) -> bool {
        self.signature.as_bytes().get(depth) == Some(&b'#')
    }

    pub fn list_tag(&self, depth: usize) -> &'static str {
        if self.is_ordered_at(depth) {
            "ol"
        } else {
            "ul"
        }
    }

    /// Two items belong to the same list when the shorter signature is a
    /// prefix of the longer one.
    pub fn compatible(&self, other: &ListItem<'_>) -> bool {
        let common = self.level().min(other.level());
        self.signature[..common] == other.signature[..common]
    }
}

/// Contents of a fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fenced<'a> {
    /// Class names given after the opening fence.
    pub classes: Vec<&'a str>,
    /// Lines between the fences, verbatim including line terminators.
    pub lines: Vec<&'a str>,
    /// Span including both fence lines.
    pub span: Span,
}

impl Fenced<'_> {
    /// Value for a `class` attribute, if any classes were given.
    pub fn class_attr(&self) -> Option<String> {
        (!self.classes.is_empty()).then(|| self.classes.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    pub rows: Vec<TableRow<'a>>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(line: &str) -> (u8, &str) {
        let h = Heading::parse(line, Span::default()).unwrap();
        (h.level, h.text)
    }

    #[test]
    fn test_heading_levels_and_trimming() {
        assert_eq!(heading("=foo"), (1, "foo"));
        assert_eq!(heading("= foo ="), (1, "foo"));
        assert_eq!(heading("=== foo ======"), (3, "foo"));
        assert_eq!(heading("====== foo ==="), (6, "foo"));
        assert_eq!(heading("="), (1, ""));
        assert!(Heading::parse("foo", Span::default()).is_none());
    }

    #[test]
    fn test_heading_overflow_keeps_excess_markers() {
        assert_eq!(heading("======= foo"), (6, "= foo"));
        assert_eq!(heading("======== foo"), (6, "== foo"));
        assert_eq!(heading("=========="), (6, ""));
    }

    #[test]
    fn test_heading_tag() {
        let h = Heading::parse("==== x", Span::default()).unwrap();
        assert_eq!(h.tag(), "h4");
    }

    #[test]
    fn test_list_item_signature() {
        let item = ListItem::parse("*#* foo ").unwrap();
        assert_eq!(item.signature, "*#*");
        assert_eq!(item.level(), 3);
        assert_eq!(item.content, "foo");
        assert_eq!(item.list_tag(0), "ul");
        assert_eq!(item.list_tag(1), "ol");
        assert!(ListItem::parse("foo").is_none());
    }

    #[test]
    fn test_list_item_compatibility() {
        let a = ListItem::parse("* a").unwrap();
        let b = ListItem::parse("*# b").unwrap();
        let c = ListItem::parse("# c").unwrap();
        let d = ListItem::parse("** d").unwrap();
        assert!(a.compatible(&b));
        assert!(b.compatible(&a));
        assert!(a.compatible(&d));
        assert!(!a.compatible(&c));
        assert!(!b.compatible(&d));
    }

    #[test]
    fn test_fenced_class_attr() {
        let mut fenced = Fenced {
            classes: vec![],
            lines: vec![],
            span: Span::default(),
        };
        assert_eq!(fenced.class_attr(), None);
        fenced.classes = vec!["bar", "baz"];
        assert_eq!(fenced.class_attr().as_deref(), Some("bar baz"));
    }
}
