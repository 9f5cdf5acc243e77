//! Benchmarks for summary parsing and report rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic summaries shaped like model replies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sumreport::render::{self, pdf, RenderOptions};
use sumreport::PdfOptions;

/// Creates a synthetic summary with the given number of sections.
fn create_test_summary(section_count: usize) -> String {
    let mut text = String::from("Summary of the quarterly earnings call.\n\n");

    for s in 1..=section_count {
        text.push_str(&format!("{}. SECTION {}\n", s, s));
        text.push_str("A. Key Points:\n");
        for i in 0..5 {
            text.push_str(&format!("● Point {} covering demand, pricing and margins\n", i));
        }
        text.push_str("“We executed well this quarter.” — Jane Doe, CFO\n");
        text.push_str(&format!("Revenue grew {}% to ${}.2B\n\n", s * 3, s));
        text.push_str("B. Discussion\n");
        text.push_str("Management described the outlook as steady with some caution.\n\n\n");
    }

    text
}

/// Benchmark parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [1, 10, 100].iter() {
        let text = create_test_summary(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| sumreport::parse(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark the text renderers.
fn bench_rendering(c: &mut Criterion) {
    let doc = sumreport::parse(&create_test_summary(20));
    let options = RenderOptions::default();

    c.bench_function("render_html", |b| {
        b.iter(|| render::to_html(black_box(&doc), &options).unwrap());
    });

    c.bench_function("render_markdown", |b| {
        b.iter(|| render::to_markdown(black_box(&doc), &options).unwrap());
    });
}

/// Benchmark pagination and PDF serialization.
fn bench_pdf(c: &mut Criterion) {
    let doc = sumreport::parse(&create_test_summary(20));
    let options = PdfOptions::default();

    c.bench_function("paginate", |b| {
        b.iter(|| pdf::paginate(black_box(&doc), &options).unwrap());
    });

    c.bench_function("render_pdf", |b| {
        b.iter(|| pdf::to_pdf(black_box(&doc), &options).unwrap());
    });
}

criterion_group!(benches, bench_parsing, bench_rendering, bench_pdf);
criterion_main!(benches);
