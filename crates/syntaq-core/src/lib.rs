//! # Syntaq Core
//!
//! A converter from Syntaq, a compact wiki-style markup language, to HTML.
//!
//! Conversion runs in two stages. The [`Parser`] groups input lines into
//! blocks (paragraphs, headings, lists, fenced blocks, tables) without
//! looking inside them. Rendering then walks the blocks and expands inline
//! markup (`**strong**`, `//emphasis//`, links, images, code) in each one.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = syntaq_core::render("= Hello\n\nThis is **bold**.").unwrap();
//! assert_eq!(html, "<h1>Hello</h1><p>This is <strong>bold</strong>.</p>");
//! ```
//!
//! ## Working with blocks
//!
//! ```rust
//! use syntaq_core::{Parser, RenderOptions};
//!
//! let doc = Parser::new().parse("== Notes\n* one\n* two\n");
//! assert_eq!(doc.title, Some("Notes"));
//! assert_eq!(doc.blocks.len(), 2);
//!
//! let options = RenderOptions::new().with_auto_link(false);
//! let html = doc.to_html_with(&options).unwrap();
//! assert_eq!(html, "<h2>Notes</h2><ul><li>one</li><li>two</li></ul>");
//! ```
//!
//! ## Escapes
//!
//! A `~` before any markup token makes it literal; `~~` is a literal `~`.
//! A `~` before anything else is kept as is.

pub mod ast;
pub mod autolink;
pub mod error;
pub mod html;
pub mod inline;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod partition;
mod render;
pub mod span;
pub mod table;

pub use ast::{Block, BlockKind, Document};
pub use error::{HtmlError, HtmlErrorKind};
pub use options::RenderOptions;
pub use parser::Parser;

/// Convert markup to an HTML fragment with default options.
pub fn render(markup: &str) -> Result<String, HtmlError> {
    render_with(markup, &RenderOptions::default())
}

/// Convert markup to an HTML fragment.
pub fn render_with(markup: &str, options: &RenderOptions) -> Result<String, HtmlError> {
    Parser::new().parse(markup).to_html_with(options)
}
