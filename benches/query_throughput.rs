//! Query evaluation throughput benchmarks
//!
//! Measures path resolution and full-text scanning over records of varying
//! size (10, 100, 1000 keywords).
//!
//! Run benchmarks: `cargo bench --bench query_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use metacat::{CompiledPath, Document, NamespaceRegistry, matches_text, query_spatial};
use std::hint::black_box;

/// A Dublin Core record with `keywords` subject elements.
fn generate_record(keywords: usize) -> String {
    let subjects: String = (0..keywords)
        .map(|i| format!("<dc:subject>keyword {}</dc:subject>", i))
        .collect();
    format!(
        r#"<csw:Record xmlns:csw="http://www.opengis.net/cat/csw/2.0.2" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:identifier>rec</dc:identifier><dc:title>Benchmark record</dc:title>{}</csw:Record>"#,
        subjects
    )
}

fn bench_path_resolution(c: &mut Criterion) {
    metacat::init_logging();
    let registry = NamespaceRegistry::default();
    let mut group = c.benchmark_group("path_resolution");

    for size in [10, 100, 1000] {
        let doc = match Document::parse(&generate_record(size)) {
            Ok(doc) => doc,
            Err(e) => panic!("benchmark record does not parse: {e}"),
        };
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("joined", size), &doc, |b, doc| {
            b.iter(|| {
                let path = CompiledPath::compile("dc:subject", &registry).ok();
                black_box(path.and_then(|p| p.resolve(doc).ok()))
            })
        });

        group.bench_with_input(BenchmarkId::new("predicate", size), &doc, |b, doc| {
            b.iter(|| {
                let path = CompiledPath::compile("dc:subject[. = 'keyword 7']", &registry).ok();
                black_box(path.and_then(|p| p.resolve(doc).ok()))
            })
        });
    }
    group.finish();
}

fn bench_fulltext(c: &mut Criterion) {
    let mut group = c.benchmark_group("fulltext");
    for size in [10, 100, 1000] {
        let doc = match Document::parse(&generate_record(size)) {
            Ok(doc) => doc,
            Err(e) => panic!("benchmark record does not parse: {e}"),
        };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("miss", size), &doc, |b, doc| {
            b.iter(|| black_box(matches_text(doc, "no such term")))
        });
    }
    group.finish();
}

fn bench_spatial(c: &mut Criterion) {
    let a = "POLYGON((0.00 0.00, 0.00 10.00, 10.00 10.00, 10.00 0.00, 0.00 0.00))";
    let b = "ENVELOPE(5, 15, 15, 5)";
    c.bench_function("spatial/intersects", |bench| {
        bench.iter(|| black_box(query_spatial(Some(a), Some(b), "intersects", None)))
    });
}

criterion_group!(benches, bench_path_resolution, bench_fulltext, bench_spatial);
criterion_main!(benches);
