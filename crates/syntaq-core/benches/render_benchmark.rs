//! Benchmarks comparing Syntaq rendering vs pulldown-cmark (Markdown)
//!
//! Run with: cargo bench -p syntaq-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulldown_cmark::{html::push_html, Options, Parser as MdParser};
use syntaq_core::inline::render_inline;
use syntaq_core::{render, render_with, Parser, RenderOptions};

const SYNTAQ_SAMPLE: &str = r#"= Introduction

This is a paragraph with //emphasis//, **strong text**, and ``inline code``.
It demonstrates the basic capabilities of the format.

== Lists

* First item with some content
* Second item with more content
* Third item concluding the list

# Step one of the process
# Step two continues
## A nested step
# Step three completes

== Code Example

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

== Table

|=Name   |=Speed  |=Memory|
|Fast    |100ms   |10MB   |
|Medium  |500ms   |50MB   |
|Slow    |1000ms  |100MB  |

== Quote

"""
The best code is no code at all.
Every line of code you write is a **liability**.
"""

See [[https://example.com/docs|the docs]] or http://example.com/faq for more.

----

End of document.
"#;

/// Equivalent Markdown content (as close as possible)
const MARKDOWN_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, and `inline code`.
It demonstrates the basic capabilities of the format.

## Lists

- First item with some content
- Second item with more content
- Third item concluding the list

1. Step one of the process
2. Step two continues
   1. A nested step
3. Step three completes

## Code Example

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

## Table

| Name    | Speed   | Memory |
| ------- | ------- | ------ |
| Fast    | 100ms   | 10MB   |
| Medium  | 500ms   | 50MB   |
| Slow    | 1000ms  | 100MB  |

## Quote

> The best code is no code at all.
> Every line of code you write is a **liability**.

See [the docs](https://example.com/docs) or <http://example.com/faq> for more.

---

End of document.
"#;

fn markdown_html(input: &str) -> String {
    let mut html = String::with_capacity(input.len() * 3 / 2);
    push_html(&mut html, MdParser::new_ext(input, Options::all()));
    html
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    group.throughput(Throughput::Bytes(SYNTAQ_SAMPLE.len() as u64));

    group.bench_function("syntaq", |b| {
        b.iter(|| black_box(render(black_box(SYNTAQ_SAMPLE)).unwrap().len()))
    });

    let no_links = RenderOptions::new().with_auto_link(false);
    group.bench_function("syntaq_no_autolink", |b| {
        b.iter(|| black_box(render_with(black_box(SYNTAQ_SAMPLE), &no_links).unwrap().len()))
    });

    group.bench_function("syntaq_blocks_only", |b| {
        b.iter(|| {
            let doc = Parser::new().parse(black_box(SYNTAQ_SAMPLE));
            black_box(doc.blocks.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| black_box(markdown_html(black_box(MARKDOWN_SAMPLE)).len()))
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let syntaq_content: String = SYNTAQ_SAMPLE.repeat(*size);
        let markdown_content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(syntaq_content.len() as u64));

        group.bench_with_input(BenchmarkId::new("syntaq", size), &syntaq_content, |b, content| {
            b.iter(|| black_box(render(black_box(content)).unwrap().len()))
        });

        group.throughput(Throughput::Bytes(markdown_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("markdown", size),
            &markdown_content,
            |b, content| b.iter(|| black_box(markdown_html(black_box(content)).len())),
        );
    }

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let syntaq_inline =
        "This has //emphasis//, **strong**, ``code``, [[https://example.com|link]], and ^^sup^^.";
    let markdown_inline =
        "This has *emphasis*, **strong**, `code`, [link](https://example.com), and <sup>sup</sup>.";
    let options = RenderOptions::default();

    group.bench_function("syntaq_inline", |b| {
        b.iter(|| black_box(render_inline(black_box(syntaq_inline), &options).unwrap().len()))
    });

    group.bench_function("markdown_inline", |b| {
        b.iter(|| black_box(markdown_html(black_box(markdown_inline)).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_scaling, bench_inline);
criterion_main!(benches);
