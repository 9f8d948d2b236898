//! Rendering speed on damaged and pathological inputs.
//!
//! Unbalanced markup should cost no more than the same amount of
//! well-formed markup: tokenizing is one forward scan and brackets never
//! look past the end of their span.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use syntaq_core::render;

const SEED: u64 = 0x5eed;
const VARIANT_COUNT: usize = 12;

const BASE: &str = r#"= Report

Intro with **bold**, //emphasis// and [[http://example.com|a //link//]].

* one
** two
*# three

|=a|=b|
|``x|y``|{{img.png|alt}}|

{{{ text
raw **text**
}}}
"#;

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn choose(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }
}

/// Delete one closing marker at random, leaving its span open.
fn mutate(input: &str, rng: &mut Lcg) -> String {
    const CLOSERS: [&str; 5] = ["]]", "}}}", "}}", "**", "//"];
    let mut out = input.to_string();
    for _ in 0..3 {
        let closer = CLOSERS[rng.choose(CLOSERS.len())];
        if let Some(pos) = out.rfind(closer) {
            out.replace_range(pos..pos + closer.len(), "");
        }
    }
    out
}

fn pathological_inputs() -> Vec<(&'static str, String)> {
    let mut rng = Lcg::new(SEED);
    let mutated: String = (0..VARIANT_COUNT)
        .map(|_| mutate(BASE, &mut rng))
        .collect::<Vec<_>>()
        .join("\n");
    vec![
        ("well_formed", BASE.repeat(VARIANT_COUNT)),
        ("mutated", mutated),
        ("unclosed_links", "[[a ".repeat(4_000)),
        ("unclosed_toggles", "**//^^,,".repeat(2_000)),
        ("escape_storm", "~".repeat(16_000)),
        ("deep_list", format!("{} x\n", "*#".repeat(1_000))),
        ("wide_table", format!("{}\n", "|``a|b``".repeat(2_000))),
        ("long_paragraph", "word http://example.com/path ".repeat(1_000)),
    ]
}

fn bench_robustness(c: &mut Criterion) {
    let mut group = c.benchmark_group("robustness");

    for (name, input) in pathological_inputs() {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("render", name), &input, |b, input| {
            b.iter(|| black_box(render(black_box(input)).unwrap().len()))
        });
    }

    group.finish();
}

criterion_group!(robustness, bench_robustness);
criterion_main!(robustness);
