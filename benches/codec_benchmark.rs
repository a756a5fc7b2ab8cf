//! Benchmark for the YAML column codec.
//!
//! Measures the performance of:
//! 1. Expanding `\xHH` literals in clean and in escaped text
//! 2. Encoding text and structured values with both encoders
//! 3. Decoding current and legacy rows

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use unobtrusive_yaml_column::{EncoderKind, TextColumnCodec, Value, expand_hex_literals};

/// Paragraph of German text, as written by the application
fn clean_text() -> String {
    "Schöne Grüße aus München, wir freuen uns über Ihre Rückmeldung.\n".repeat(20)
}

/// The same paragraph as an older engine escaped it
fn escaped_text() -> String {
    clean_text()
        .replace('ö', r"\xC3\xB6")
        .replace('ü', r"\xC3\xBC")
        .replace('ß', r"\xC3\x9F")
}

/// Translation table with a few dozen keys
fn structured_value() -> Value {
    let mut source = String::new();
    for i in 0..50 {
        source.push_str(&format!("key_{i}: Übersetzung Nummer {i}\n"));
    }
    serde_yaml::from_str(&source).unwrap()
}

fn benchmark_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_hex_literals");

    for (name, text) in [("clean", clean_text()), ("escaped", escaped_text())] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| expand_hex_literals(black_box(text)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let text = Value::from(escaped_text());
    let structured = structured_value();

    for encoder in [EncoderKind::Compact, EncoderKind::Standard] {
        let codec = TextColumnCodec::new().with_encoder(encoder);
        group.bench_with_input(
            BenchmarkId::new("text", format!("{encoder:?}")),
            &text,
            |b, value| {
                b.iter(|| codec.encode(black_box(value)).unwrap());
            },
        );
    }

    let codec = TextColumnCodec::new();
    group.bench_function("structured", |b| {
        b.iter(|| codec.encode(black_box(&structured)).unwrap());
    });

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let codec = TextColumnCodec::new();
    let current = codec.encode(&Value::from(clean_text())).unwrap();
    let legacy = format!("--- \"{}\"\n", escaped_text().replace('\n', "\\n"));
    let structured = codec.encode(&structured_value()).unwrap();

    for (name, stored) in [
        ("current", current),
        ("legacy", legacy),
        ("structured", structured),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &stored, |b, stored| {
            b.iter(|| codec.decode(black_box(Some(stored.as_str()))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_expansion,
    benchmark_encode,
    benchmark_decode,
);
criterion_main!(benches);
