use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pandora_points::{from_point, parse_record, parse_records, to_point, to_string, Point};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Access {
    host: String,
    method: String,
    path: String,
    status: u16,
    bytes: i64,
    duration_ms: f64,
    tags: Vec<String>,
}

fn access(i: u16) -> Access {
    Access {
        host: format!("web-{:02}", i % 16),
        method: "GET".to_string(),
        path: format!("/api/v1/items/{}", i),
        status: 200 + (i % 3),
        bytes: i64::from(i) * 512,
        duration_ms: 1.5 + f64::from(i),
        tags: vec!["edge".to_string(), "cache-miss".to_string()],
    }
}

fn typed_point(i: i64) -> Point {
    let mut point = Point::new();
    point.append("host", "web-01");
    point.append("seq", i);
    point.append("latency", 0.25);
    point.append("ok", true);
    point.append("msg", "GET /index.html\tHTTP/1.1\n");
    point
}

fn benchmark_append(c: &mut Criterion) {
    c.bench_function("append_typed_fields", |b| {
        b.iter(|| typed_point(black_box(42)))
    });
}

fn benchmark_serialize_point(c: &mut Criterion) {
    let point = typed_point(42);
    c.bench_function("serialize_point", |b| {
        b.iter(|| black_box(&point).to_string())
    });
}

fn benchmark_parse_record(c: &mut Criterion) {
    let text = typed_point(42).to_string();
    c.bench_function("parse_record", |b| b.iter(|| parse_record(black_box(&text))));
}

fn benchmark_parse_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_records");

    for size in [10i64, 100, 1000].iter() {
        let points: Vec<Point> = (0..*size).map(typed_point).collect();
        let text = to_string(&points);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_records(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serde_bridge(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde_bridge");

    let record = access(7);
    group.bench_function("to_point", |b| b.iter(|| to_point(black_box(&record))));

    let point = to_point(&record).unwrap();
    group.bench_function("from_point", |b| {
        b.iter(|| from_point::<Access>(black_box(&point)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_append,
    benchmark_serialize_point,
    benchmark_parse_record,
    benchmark_parse_records,
    benchmark_serde_bridge
);
criterion_main!(benches);
