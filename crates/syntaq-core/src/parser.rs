//! Line-oriented block parser.
//!
//! Each input line either extends the block currently being built or
//! seals it and starts a new one. Lines inside a fenced block are taken
//! verbatim until the closing fence; everything else has trailing
//! whitespace removed before it is classified.
//!
//! Classification order for a line outside a fence:
//!
//! 1. `=` in column 0: heading (a single-line block)
//! 2. `----`: horizontal rule
//! 3. `#` or `*` after leading whitespace: list item
//! 4. `{{{`, ```` ``` ````, `"""`: opening fence, optionally with class names
//! 5. `|`: table row
//! 6. blank: ends the current block
//! 7. anything else: paragraph line

use crate::ast::{Block, Document, Fenced, Heading, List, ListItem, Paragraph, Table};
use crate::lexer::{Lexer, Line};
use crate::span::Span;
use crate::table::TableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceKind {
    Preformatted,
    Code,
    Quote,
}

impl FenceKind {
    const ALL: [FenceKind; 3] = [FenceKind::Preformatted, FenceKind::Code, FenceKind::Quote];

    fn marker(self) -> &'static str {
        match self {
            FenceKind::Preformatted => "{{{",
            FenceKind::Code => "```",
            FenceKind::Quote => "\"\"\"",
        }
    }

    fn closing(self) -> &'static str {
        match self {
            FenceKind::Preformatted => "}}}",
            other => other.marker(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FenceKind::Preformatted => "preformatted",
            FenceKind::Code => "code",
            FenceKind::Quote => "quote",
        }
    }

    /// Match an opening fence and return its class names.
    fn open(line: &str) -> Option<(Self, Vec<&str>)> {
        FenceKind::ALL.into_iter().find_map(|kind| {
            let marker = kind.marker();
            line.starts_with(marker).then(|| {
                let fill = marker.chars().next().unwrap_or_default();
                (kind, line.trim_start_matches(fill).split_whitespace().collect())
            })
        })
    }

    fn seal(self, fenced: Fenced<'_>) -> Block<'_> {
        match self {
            FenceKind::Preformatted => Block::Preformatted(fenced),
            FenceKind::Code => Block::Code(fenced),
            FenceKind::Quote => Block::Quote(fenced),
        }
    }
}

/// The block under construction.
#[derive(Debug, Default)]
enum Open<'a> {
    #[default]
    Nothing,
    Paragraph(Paragraph<'a>),
    List(List<'a>),
    Fenced(FenceKind, Fenced<'a>),
    Table(Table<'a>),
}

struct Builder<'a> {
    blocks: Vec<Block<'a>>,
    open: Open<'a>,
    title: Option<(&'a str, u8)>,
}

impl<'a> Builder<'a> {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            open: Open::Nothing,
            title: None,
        }
    }

    /// Finish the open block, if any, and append it to the document.
    fn seal(&mut self) {
        let block = match std::mem::take(&mut self.open) {
            Open::Nothing => return,
            Open::Paragraph(p) => Block::Paragraph(p),
            Open::List(l) => Block::List(l),
            Open::Fenced(kind, f) => kind.seal(f),
            Open::Table(t) => Block::Table(t),
        };
        self.push(block);
    }

    fn push(&mut self, block: Block<'a>) {
        let span = block.span();
        log::debug!(
            "sealed {} block at {}..{}",
            block.kind().as_str(),
            span.start,
            span.end
        );
        self.blocks.push(block);
    }

    fn heading(&mut self, heading: Heading<'a>) {
        self.seal();
        match self.title {
            Some((text, level)) if !text.is_empty() && heading.level >= level => {}
            _ => self.title = Some((heading.text, heading.level)),
        }
        self.push(Block::Heading(heading));
    }

    fn list_item(&mut self, item: ListItem<'a>, span: Span) {
        if let Open::List(list) = &mut self.open {
            if list.items[0].compatible(&item) {
                list.items.push(item);
                list.span = list.span.merge(span);
                return;
            }
        }
        self.seal();
        self.open = Open::List(List {
            items: vec![item],
            span,
        });
    }

    fn table_row(&mut self, row: TableRow<'a>, span: Span) {
        if let Open::Table(table) = &mut self.open {
            table.rows.push(row);
            table.span = table.span.merge(span);
            return;
        }
        self.seal();
        self.open = Open::Table(Table {
            rows: vec![row],
            span,
        });
    }

    fn paragraph_line(&mut self, text: &'a str, span: Span) {
        if let Open::Paragraph(paragraph) = &mut self.open {
            paragraph.lines.push(text);
            paragraph.span = paragraph.span.merge(span);
            return;
        }
        self.seal();
        self.open = Open::Paragraph(Paragraph {
            lines: vec![text],
            span,
        });
    }

    /// Feed a line to an open fence. Returns `false` when no fence is open.
    fn fenced_line(&mut self, line: &Line<'a>) -> bool {
        let Open::Fenced(kind, fenced) = &mut self.open else {
            return false;
        };
        fenced.span = fenced.span.merge(line.span);
        if line.starts_with(kind.closing()) {
            self.seal();
        } else {
            fenced.lines.push(line.raw);
        }
        true
    }

    fn line(&mut self, line: Line<'a>) {
        if self.fenced_line(&line) {
            return;
        }

        let text = line.text.trim_end();
        if let Some(heading) = Heading::parse(text, line.span) {
            self.heading(heading);
        } else if text.starts_with("----") {
            self.seal();
            self.push(Block::HorizontalRule(line.span));
        } else if let Some(item) = ListItem::parse(text.trim_start()) {
            self.list_item(item, line.span);
        } else if let Some((kind, classes)) = FenceKind::open(text) {
            self.seal();
            log::trace!("opened {} fence at {}", kind.name(), line.span.start);
            self.open = Open::Fenced(
                kind,
                Fenced {
                    classes,
                    lines: Vec::new(),
                    span: line.span,
                },
            );
        } else if text.starts_with('|') {
            self.table_row(TableRow::parse(text), line.span);
        } else if text.is_empty() {
            self.seal();
        } else {
            self.paragraph_line(text, line.span);
        }
    }

    fn finish(mut self, input: &'a str) -> Document<'a> {
        if let Open::Fenced(kind, _) = &self.open {
            log::trace!("{} fence left open at end of input", kind.name());
        }
        self.seal();
        Document {
            blocks: self.blocks,
            title: self.title.map(|(text, _)| text),
            span: Span::new(0, input.len() as u32),
        }
    }
}

/// Block parser. Parsing never fails: every input produces a document.
///
/// ```rust
/// use syntaq_core::{Block, Parser};
///
/// let doc = Parser::new().parse("= Title\n\nSome //text//.\n");
/// assert_eq!(doc.title, Some("Title"));
/// assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn parse<'a>(&self, input: &'a str) -> Document<'a> {
        let mut builder = Builder::new();
        for line in Lexer::new(input) {
            builder.line(line);
        }
        builder.finish(input)
    }
}
