//! Table row parsing.
//!
//! A row is a line starting with `|`. Cells are separated by unescaped
//! `|` characters that are not inside a code span, link, image or inline
//! preformatted span, so `|[[a|b]]|` is a single cell. One trailing `|` is
//! optional.
//!
//! A cell starting with `=` is a header cell. Whitespace at the edges of a
//! cell sets its alignment: padding on both sides centres it, padding on
//! the right only aligns left and padding on the left only aligns right.

use std::sync::LazyLock;

use crate::error::HtmlError;
use crate::html::HtmlWriter;
use crate::inline::{
    render_inline, CODE, ESCAPE, IMAGE_END, IMAGE_START, LINK_END, LINK_START, PRE_END,
    PRE_START, SEPARATOR,
};
use crate::options::RenderOptions;
use crate::partition::Partitioner;

const TABLE_MARKERS: &[&str] = &[
    SEPARATOR,
    CODE,
    LINK_START,
    LINK_END,
    PRE_START,
    PRE_END,
    IMAGE_START,
    IMAGE_END,
];

static TABLE: LazyLock<Partitioner<'static>> =
    LazyLock::new(|| Partitioner::new(ESCAPE, TABLE_MARKERS));

/// Closing marker for a token that opens a span a separator cannot split.
fn bracket_end(token: &str) -> Option<&'static str> {
    match token {
        CODE => Some(CODE),
        LINK_START => Some(LINK_END),
        IMAGE_START => Some(IMAGE_END),
        PRE_START => Some(PRE_END),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Data,
}

impl CellKind {
    fn tag(self) -> &'static str {
        match self {
            CellKind::Header => "th",
            CellKind::Data => "td",
        }
    }
}

/// Horizontal alignment inferred from cell padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_padding(left: bool, right: bool) -> Option<Self> {
        match (left, right) {
            (true, true) => Some(Align::Center),
            (false, true) => Some(Align::Left),
            (true, false) => Some(Align::Right),
            (false, false) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
        }
    }

    fn style(self) -> &'static str {
        match self {
            Align::Left => "text-align:left",
            Align::Right => "text-align:right",
            Align::Center => "text-align:center",
        }
    }
}

/// One table cell. `content` is trimmed and still holds inline markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell<'a> {
    pub kind: CellKind,
    pub align: Option<Align>,
    pub content: &'a str,
}

impl<'a> TableCell<'a> {
    fn parse(raw: &'a str) -> Self {
        let (kind, content) = match raw.strip_prefix('=') {
            Some(rest) => (CellKind::Header, rest),
            None => (CellKind::Data, raw),
        };
        let is_space = |c: char| c.is_ascii_whitespace();
        let align = Align::from_padding(content.starts_with(is_space), content.ends_with(is_space));
        Self {
            kind,
            align,
            content: content.trim_matches(is_space),
        }
    }
}

/// A parsed table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow<'a> {
    pub cells: Vec<TableCell<'a>>,
}

impl<'a> TableRow<'a> {
    /// Split a `|`-delimited line into cells.
    ///
    /// ```rust
    /// use syntaq_core::table::{CellKind, TableRow};
    ///
    /// let row = TableRow::parse("|=name|``a|b``|");
    /// assert_eq!(row.cells.len(), 2);
    /// assert_eq!(row.cells[0].kind, CellKind::Header);
    /// assert_eq!(row.cells[1].content, "``a|b``");
    /// ```
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end();
        let line = line.strip_suffix(SEPARATOR).unwrap_or(line);
        let tokens: Vec<&str> = TABLE.partition(line).collect();

        let mut cells = Vec::new();
        let mut start: Option<usize> = None;
        let mut offset = 0;
        let mut iter = tokens.iter();
        while let Some(&token) = iter.next() {
            if token == SEPARATOR {
                if let Some(s) = start {
                    cells.push(TableCell::parse(&line[s..offset]));
                }
                offset += token.len();
                start = Some(offset);
                continue;
            }
            start.get_or_insert(offset);
            offset += token.len();
            if let Some(end) = bracket_end(token) {
                for &inner in iter.by_ref() {
                    offset += inner.len();
                    if inner == end {
                        break;
                    }
                }
            }
        }
        if let Some(s) = start {
            cells.push(TableCell::parse(&line[s..offset]));
        }

        Self { cells }
    }

    /// Write this row as a `<tr>` element.
    pub fn write_html(&self, out: &mut HtmlWriter, options: &RenderOptions) -> Result<(), HtmlError> {
        out.open_tag("tr", &[]);
        for cell in &self.cells {
            let content = render_inline(cell.content, options)?;
            let style = cell.align.map(Align::style);
            out.element(cell.kind.tag(), &[("style", style)], None, Some(&content))?;
        }
        out.close_tag(Some("tr"))
    }

    /// Render this row as a standalone `<tr>` fragment.
    pub fn to_html(&self, options: &RenderOptions) -> Result<String, HtmlError> {
        let mut out = HtmlWriter::new();
        self.write_html(&mut out, options)?;
        Ok(out.finish())
    }
}
