use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};

fn metrics_document() -> Value {
    serde_json::from_str(include_str!("../../../fixtures/management_metrics.json")).unwrap()
}

fn nested_document(depth: usize, width: usize) -> Value {
    let mut value = json!({});
    for level in 0..depth {
        let mut map = serde_json::Map::new();
        for i in 0..width {
            map.insert(format!("leaf.{level}-{i}"), json!(i as f64));
        }
        map.insert("status".to_string(), json!("UP"));
        map.insert(format!("child{level}"), value);
        value = Value::Object(map);
    }
    value
}

fn bench_flatten_metrics(c: &mut Criterion) {
    let doc = metrics_document();

    c.bench_function("flattener/management_metrics", |b| {
        b.iter(|| flattener::flatten("springxd_metrics", &doc).unwrap());
    });
}

fn bench_flatten_nested(c: &mut Criterion) {
    let doc = nested_document(8, 32);

    c.bench_function("flattener/nested_8x32", |b| {
        b.iter(|| flattener::flatten("springxd_metrics", &doc).unwrap());
    });
}

fn bench_metric_segment(c: &mut Criterion) {
    c.bench_function("flattener/metric_segment", |b| {
        b.iter(|| flattener::metric_segment("gc.g1-young-generation.count"));
    });
}

criterion_group!(
    benches,
    bench_flatten_metrics,
    bench_flatten_nested,
    bench_metric_segment
);
criterion_main!(benches);
