//! Benchmarks for docpreview rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic CSV data and exercise the
//! classifier and fallback paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docpreview::{DocumentFamily, Previewer, RawDocument};

/// Creates a CSV document with a header and `rows` mixed-type data rows.
fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut content = String::from("id,name,email,joined,score,homepage\n");
    for i in 0..rows {
        content.push_str(&format!(
            "{},User {},user{}@example.com,2024-{:02}-{:02},{}.{},https://example.com/u/{}\n",
            i,
            i,
            i,
            i % 12 + 1,
            i % 28 + 1,
            i * 7,
            i % 100,
            i
        ));
    }
    content.into_bytes()
}

/// Benchmark cell classification.
fn bench_classify(c: &mut Criterion) {
    let samples = [
        "12345.67",
        "someone@example.com",
        "https://www.example.com/path",
        "12/31/2024",
        "plain words in a cell",
    ];

    c.bench_function("classify_mixed", |b| {
        b.iter(|| {
            for sample in &samples {
                black_box(docpreview::classify(black_box(sample)));
            }
        });
    });
}

/// Benchmark CSV rendering at various sizes.
fn bench_csv_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_rendering");
    let previewer = Previewer::new();

    for rows in [100, 1_000, 5_000].iter() {
        let data = create_test_csv(*rows);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| {
                let _ = previewer.render(black_box(&data), "bench.csv", "html");
            });
        });
    }

    group.finish();
}

/// Benchmark the text-preview fallback path.
fn bench_text_fallback(c: &mut Criterion) {
    let data = create_test_csv(500);

    c.bench_function("text_extraction", |b| {
        b.iter(|| docpreview::parser::extract_text(black_box(&data), DocumentFamily::Delimited));
    });

    // Plain text saved as .docx fails the primary walker.
    c.bench_function("docx_text_fallback", |b| {
        b.iter(|| {
            let _ = docpreview::render(black_box(&data), "mislabelled.docx", "html");
        });
    });
}

/// Benchmark parallel batch rendering.
fn bench_batch(c: &mut Criterion) {
    let docs: Vec<RawDocument> = (0..16)
        .map(|i| RawDocument::new(create_test_csv(250), format!("part{}.csv", i)))
        .collect();

    c.bench_function("batch_16_docs", |b| {
        b.iter(|| docpreview::render_batch(black_box(&docs), "html"));
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_csv_rendering,
    bench_text_fallback,
    bench_batch,
);
criterion_main!(benches);
