//! Syntaq CLI - Render Syntaq wiki markup to HTML
//!
//! Usage:
//!   syntaq [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   render    Print the HTML fragment (default)
//!   blocks    List the parsed blocks
//!   stats     Show document statistics

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use serde::Serialize;
use syntaq_core::ast::Fenced;
use syntaq_core::html::escape;
use syntaq_core::{Block, Document, Parser, RenderOptions};

/// Syntaq - wiki markup to HTML converter.
#[derive(ClapParser)]
#[command(name = "syntaq", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML fragment (default).
    Render(RenderArgs),
    /// List the parsed blocks.
    Blocks(BlocksArgs),
    /// Show document statistics.
    Stats(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Input file, or `-` for standard input.
    file: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Wrap the fragment in a complete HTML document.
    #[arg(short, long)]
    standalone: bool,

    /// Do not turn bare URLs into links.
    #[arg(long)]
    no_autolink: bool,
}

#[derive(Args)]
struct BlocksArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output in JSON format.
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Render(args)) => cmd_render(&args),
        Some(Command::Blocks(args)) => cmd_blocks(&args),
        Some(Command::Stats(args)) => cmd_stats(&args),
        None => cmd_render(&cli.render),
    }
}

fn read_input(args: &InputArgs) -> Result<String> {
    match args.file.as_deref() {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read standard input")?;
    Ok(input)
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(args: &RenderArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let doc = Parser::new().parse(&input);
    log::info!("parsed {} blocks", doc.blocks.len());

    let options = RenderOptions::new().with_auto_link(!args.no_autolink);
    let body = doc.to_html_with(&options).context("failed to render HTML")?;

    if args.standalone {
        println!("{}", standalone_page(doc.title, &body));
    } else {
        println!("{body}");
    }
    Ok(())
}

fn standalone_page(title: Option<&str>, body: &str) -> String {
    let title = escape(title.unwrap_or_default());
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>{body}</body></html>"
    )
}

// =============================================================================
// Blocks Command
// =============================================================================

fn cmd_blocks(args: &BlocksArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let doc = Parser::new().parse(&input);

    if args.json {
        let json = serde_json::to_string_pretty(&convert_document(&doc))
            .context("failed to serialize blocks")?;
        println!("{json}");
    } else {
        print_document_summary(&doc);
    }
    Ok(())
}

fn print_document_summary(doc: &Document) {
    if let Some(title) = doc.title {
        println!("Title: {title}");
    }
    println!("Blocks: {}", doc.blocks.len());
    for (i, block) in doc.blocks.iter().enumerate() {
        let span = block.span();
        println!(
            "  {:>3}. {:<16} {:>6}..{:<6} {}",
            i + 1,
            block.kind().as_str(),
            span.start,
            span.end,
            describe_block(block)
        );
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => truncate(&p.lines.join(" "), 40),
        Block::Heading(h) => format!("h{}: {}", h.level, truncate(h.text, 36)),
        Block::HorizontalRule(_) => String::new(),
        Block::List(l) => format!("{} items", l.items.len()),
        Block::Preformatted(f) | Block::Code(f) | Block::Quote(f) => describe_fenced(f),
        Block::Table(t) => format!("{} rows", t.rows.len()),
    }
}

fn describe_fenced(fenced: &Fenced) -> String {
    match fenced.class_attr() {
        Some(classes) => format!("{} lines [{classes}]", fenced.lines.len()),
        None => format!("{} lines", fenced.lines.len()),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(args: &InputArgs) -> Result<()> {
    let input = read_input(args)?;
    let doc = Parser::new().parse(&input);
    let stats = DocumentStats::from_document(&doc, &input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Title:        {}", doc.title.unwrap_or("(none)"));
    println!();
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Lists:          {}", stats.lists);
    println!("  List items:     {}", stats.list_items);
    println!("  Fenced blocks:  {}", stats.fenced);
    println!("  Tables:         {}", stats.tables);
    println!("  Rules:          {}", stats.rules);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

#[derive(Default)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    fenced: usize,
    tables: usize,
    rules: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: doc.blocks.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            ..Self::default()
        };
        for block in &doc.blocks {
            match block {
                Block::Heading(_) => stats.headings += 1,
                Block::Paragraph(_) => stats.paragraphs += 1,
                Block::List(l) => {
                    stats.lists += 1;
                    stats.list_items += l.items.len();
                }
                Block::Preformatted(_) | Block::Code(_) | Block::Quote(_) => stats.fenced += 1,
                Block::Table(_) => stats.tables += 1,
                Block::HorizontalRule(_) => stats.rules += 1,
            }
        }
        stats
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: Option<&'a str>,
    blocks: Vec<JsonBlock<'a>>,
}

#[derive(Serialize)]
struct JsonSpan {
    start: u32,
    end: u32,
}

#[derive(Serialize)]
struct JsonBlock<'a> {
    kind: &'static str,
    span: JsonSpan,
    #[serde(flatten)]
    content: JsonContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonContent<'a> {
    Lines {
        lines: Vec<&'a str>,
    },
    Heading {
        level: u8,
        text: &'a str,
    },
    Rule {},
    List {
        items: Vec<JsonListItem<'a>>,
    },
    Fenced {
        classes: Vec<&'a str>,
        lines: Vec<&'a str>,
    },
    Table {
        rows: Vec<Vec<JsonCell<'a>>>,
    },
}

#[derive(Serialize)]
struct JsonListItem<'a> {
    signature: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    header: bool,
    align: Option<&'static str>,
    content: &'a str,
}

fn convert_document<'a>(doc: &'a Document) -> JsonDocument<'a> {
    JsonDocument {
        title: doc.title,
        blocks: doc.blocks.iter().map(convert_block).collect(),
    }
}

fn convert_block<'a>(block: &'a Block) -> JsonBlock<'a> {
    let content = match block {
        Block::Paragraph(p) => JsonContent::Lines {
            lines: p.lines.clone(),
        },
        Block::Heading(h) => JsonContent::Heading {
            level: h.level,
            text: h.text,
        },
        Block::HorizontalRule(_) => JsonContent::Rule {},
        Block::List(l) => JsonContent::List {
            items: l
                .items
                .iter()
                .map(|item| JsonListItem {
                    signature: item.signature,
                    content: item.content,
                })
                .collect(),
        },
        Block::Preformatted(f) | Block::Code(f) | Block::Quote(f) => JsonContent::Fenced {
            classes: f.classes.clone(),
            lines: f.lines.clone(),
        },
        Block::Table(t) => JsonContent::Table {
            rows: t
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| JsonCell {
                            header: cell.kind == syntaq_core::table::CellKind::Header,
                            align: cell.align.map(|a| a.as_str()),
                            content: cell.content,
                        })
                        .collect()
                })
                .collect(),
        },
    };
    let span = block.span();
    JsonBlock {
        kind: block.kind().as_str(),
        span: JsonSpan {
            start: span.start,
            end: span.end,
        },
        content,
    }
}
