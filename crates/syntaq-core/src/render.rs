//! HTML generation for parsed documents.

use crate::ast::{Block, Document, Fenced, List};
use crate::error::HtmlError;
use crate::html::HtmlWriter;
use crate::inline::render_inline;
use crate::options::RenderOptions;

impl Document<'_> {
    /// Render with default options.
    pub fn to_html(&self) -> Result<String, HtmlError> {
        self.to_html_with(&RenderOptions::default())
    }

    /// Render every block in order into a single HTML fragment.
    pub fn to_html_with(&self, options: &RenderOptions) -> Result<String, HtmlError> {
        let mut out = HtmlWriter::new();
        for block in &self.blocks {
            write_block(&mut out, block, options)?;
        }
        Ok(out.finish())
    }
}

fn write_block(out: &mut HtmlWriter, block: &Block<'_>, options: &RenderOptions) -> Result<(), HtmlError> {
    match block {
        Block::Paragraph(p) => {
            let html = render_inline(&p.lines.join(" "), options)?;
            out.element("p", &[], None, Some(&html))
        }
        Block::Heading(h) => out.element(h.tag(), &[], Some(h.text), None),
        Block::HorizontalRule(_) => out.element("hr", &[], None, None),
        Block::List(list) => write_list(out, list, options),
        Block::Preformatted(fenced) => {
            let class = fenced.class_attr();
            out.open_tag("pre", &[("class", class.as_deref())]);
            for line in &fenced.lines {
                out.write_text(line);
            }
            out.close_tag(Some("pre"))
        }
        Block::Code(fenced) => write_code(out, fenced),
        Block::Quote(fenced) => {
            out.open_tag("blockquote", &[]);
            for line in &fenced.lines {
                out.write_html(&render_inline(line, options)?);
            }
            out.close_tag(Some("blockquote"))
        }
        Block::Table(table) => {
            out.open_tag("table", &[]);
            for row in &table.rows {
                row.write_html(out, options)?;
            }
            out.close_tag(Some("table"))
        }
    }
}

/// `<pre><ol><li><code>…</code></li>…</ol></pre>`, one item per line.
fn write_code(out: &mut HtmlWriter, fenced: &Fenced<'_>) -> Result<(), HtmlError> {
    let class = fenced.class_attr();
    out.open_tag("pre", &[("class", class.as_deref())]);
    out.open_tag("ol", &[]);
    for line in &fenced.lines {
        out.open_tag("li", &[]);
        out.element("code", &[], Some(line), None)?;
        out.close_tag(Some("li"))?;
    }
    out.close_tag(Some("pre"))
}

// Nested lists are opened directly inside their parent list, not inside
// the preceding item.
fn write_list(out: &mut HtmlWriter, list: &List<'_>, options: &RenderOptions) -> Result<(), HtmlError> {
    let mut depth = 0;
    for item in &list.items {
        while depth > item.level() {
            out.close_tag(None)?;
            depth -= 1;
        }
        while depth < item.level() {
            out.open_tag(item.list_tag(depth), &[]);
            depth += 1;
        }
        let html = render_inline(item.content, options)?;
        out.element("li", &[], None, Some(&html))?;
    }
    while depth > 0 {
        out.close_tag(None)?;
        depth -= 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn html(input: &str) -> String {
        Parser::new().parse(input).to_html().unwrap()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(html(""), "");
        assert_eq!(html("\n\n  \n"), "");
    }

    #[test]
    fn test_list_depth_changes() {
        assert_eq!(html("** foo\n* bar"), "<ul><ul><li>foo</li></ul><li>bar</li></ul>");
        assert_eq!(
            html("# foo\n#* bar\n# baz"),
            "<ol><li>foo</li><ul><li>bar</li></ul><li>baz</li></ol>"
        );
    }

    #[test]
    fn test_code_block_lines_keep_terminators() {
        assert_eq!(
            html("```\nfoo\nbar\n```"),
            "<pre><ol><li><code>foo\n</code></li><li><code>bar\n</code></li></ol></pre>"
        );
    }

    #[test]
    fn test_quote_lines_rendered_inline() {
        assert_eq!(html("\"\"\"\n**foo**\n\"\"\""), "<blockquote><strong>foo</strong>\n</blockquote>");
    }
}
