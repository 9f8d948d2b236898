//! Inline markup renderer.
//!
//! Renders one span of text (a paragraph, list item, table cell or quote
//! line) to HTML. Markup is never rejected: unbalanced toggles are closed
//! when the span ends, unterminated brackets run to the end of the span and
//! stray closing brackets are written as text.
//!
//! | markup              | output                      |
//! |---------------------|-----------------------------|
//! | `**x**`             | `<strong>x</strong>`        |
//! | `//x//`             | `<em>x</em>`                |
//! | `^^x^^` / `,,x,,`   | `<sup>x</sup>` / `<sub>x</sub>` |
//! | `""x""`             | `<q>x</q>`                  |
//! | ``` ``x`` ```       | `<code>x</code>`            |
//! | `{{src\|alt}}`      | `<img alt="alt" src="src">` |
//! | `{{{x}}}`           | `x`, escaped, uninterpreted |
//! | `[[href\|label]]`   | `<a href="href">label</a>`  |
//! | `\\`, `-->`, `<--`  | `<br>`, `&rarr;`, `&larr;`  |
//!
//! `~` before a marker makes that one marker literal.

use std::sync::LazyLock;

use crate::autolink::auto_link_into;
use crate::error::HtmlError;
use crate::html::HtmlWriter;
use crate::options::RenderOptions;
use crate::partition::{Partitioner, Tokens};

pub const ESCAPE: &str = "~";

pub(crate) const CODE: &str = "``";
pub(crate) const IMAGE_START: &str = "{{";
pub(crate) const IMAGE_END: &str = "}}";
pub(crate) const PRE_START: &str = "{{{";
pub(crate) const PRE_END: &str = "}}}";
pub(crate) const LINK_START: &str = "[[";
pub(crate) const LINK_END: &str = "]]";
pub(crate) const SEPARATOR: &str = "|";

/// Inline marker table, longest first where prefixes are shared.
///
/// URL schemes are markers only so that the `//` inside them is not read
/// as emphasis; they render as ordinary text. The block quote fence is
/// listed so that `"""` is not read as a `""` toggle.
const INLINE_MARKERS: &[&str] = &[
    "http://",
    "https://",
    "ftp://",
    "mailto:",
    "\"\"\"",
    PRE_START,
    PRE_END,
    "<--",
    "-->",
    "\\\\",
    IMAGE_START,
    IMAGE_END,
    CODE,
    "\"\"",
    "**",
    "//",
    "^^",
    ",,",
    LINK_START,
    LINK_END,
    SEPARATOR,
];

static INLINE: LazyLock<Partitioner<'static>> =
    LazyLock::new(|| Partitioner::new(ESCAPE, INLINE_MARKERS));

/// Meaning of an inline token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    /// Replaced by fixed HTML.
    Simple(&'static str),
    /// Opens the tag, or closes it (and anything opened inside it) when it
    /// is already open.
    Toggle(&'static str),
    /// Everything up to `end` is literal content for `kind`.
    Bracket { end: &'static str, kind: BracketKind },
    LinkStart,
    LinkEnd,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Code,
    Image,
    Preformatted,
}

fn classify(token: &str) -> Markup {
    match token {
        "\\\\" => Markup::Simple("<br>"),
        "-->" => Markup::Simple("&rarr;"),
        "<--" => Markup::Simple("&larr;"),
        "**" => Markup::Toggle("strong"),
        "//" => Markup::Toggle("em"),
        "^^" => Markup::Toggle("sup"),
        ",," => Markup::Toggle("sub"),
        "\"\"" => Markup::Toggle("q"),
        CODE => Markup::Bracket {
            end: CODE,
            kind: BracketKind::Code,
        },
        IMAGE_START => Markup::Bracket {
            end: IMAGE_END,
            kind: BracketKind::Image,
        },
        PRE_START => Markup::Bracket {
            end: PRE_END,
            kind: BracketKind::Preformatted,
        },
        LINK_START => Markup::LinkStart,
        LINK_END => Markup::LinkEnd,
        _ => Markup::Text,
    }
}

impl BracketKind {
    fn write(self, out: &mut HtmlWriter, content: &str) -> Result<(), HtmlError> {
        match self {
            BracketKind::Code => out.element("code", &[], Some(content), None),
            BracketKind::Image => {
                let (src, alt) = content.split_once('|').unwrap_or((content, ""));
                let alt = (!alt.is_empty()).then_some(alt);
                out.element("img", &[("src", Some(src)), ("alt", alt)], None, None)
            }
            BracketKind::Preformatted => {
                out.write_text(content);
                Ok(())
            }
        }
    }
}

/// Consume tokens up to and including the first one accepted by `is_end`.
///
/// Returns the literal text of the consumed tokens (escapes resolved) and
/// the terminating token, or `None` when the input ran out first.
fn collect_until<'t>(
    tokens: &mut Tokens<'_, '_, 't>,
    is_end: impl Fn(&str) -> bool,
) -> (String, Option<&'t str>) {
    let mut content = String::new();
    for token in tokens {
        if is_end(token) {
            return (content, Some(token));
        }
        content.push_str(INLINE.unescape(token).unwrap_or(token));
    }
    (content, None)
}

/// Render inline markup into `out`, leaving any tags it opened open.
pub fn render_into(out: &mut HtmlWriter, text: &str) -> Result<(), HtmlError> {
    let mut tokens = INLINE.partition(text);
    while let Some(token) = tokens.next() {
        if let Some(literal) = INLINE.unescape(token) {
            out.write_text(literal);
            continue;
        }
        match classify(token) {
            Markup::Simple(html) => out.write_html(html),
            Markup::Toggle(tag) => {
                if out.is_open(tag) {
                    if out.stack().last() != Some(&tag) {
                        log::trace!("closing <{tag}> auto-closes {:?}", out.stack());
                    }
                    out.close_tag(Some(tag))?;
                } else {
                    out.open_tag(tag, &[]);
                }
            }
            Markup::Bracket { end, kind } => {
                let (content, _) = collect_until(&mut tokens, |t| t == end);
                kind.write(out, &content)?;
            }
            Markup::LinkStart => {
                let (href, terminator) =
                    collect_until(&mut tokens, |t| t == SEPARATOR || t == LINK_END);
                out.open_tag("a", &[("href", Some(&href))]);
                if terminator != Some(SEPARATOR) {
                    out.write_text(&href);
                    out.close_tag(Some("a"))?;
                }
            }
            Markup::LinkEnd => {
                if out.is_open("a") {
                    out.close_tag(Some("a"))?;
                } else {
                    log::trace!("stray {LINK_END} written as text");
                    out.write_text(token);
                }
            }
            Markup::Text => out.write_deferred(token),
        }
    }
    Ok(())
}

/// Render a span of inline markup to a self-contained HTML fragment.
///
/// ```rust
/// use syntaq_core::inline::render_inline;
/// use syntaq_core::RenderOptions;
///
/// let html = render_inline("**bold //both**", &RenderOptions::default()).unwrap();
/// assert_eq!(html, "<strong>bold <em>both</em></strong>");
/// ```
pub fn render_inline(text: &str, options: &RenderOptions) -> Result<String, HtmlError> {
    let mut out = if options.auto_link {
        HtmlWriter::with_processor(auto_link_into)
    } else {
        HtmlWriter::new()
    };
    render_into(&mut out, text)?;
    Ok(out.finish())
}
