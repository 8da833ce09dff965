use common::{ComponentStatus, Sample};
use serde_json::{Map, Value};

use crate::error::{FlattenError, Result};

/// Sanitizes a JSON key into a metric name segment.
///
/// `.` becomes `_` and `-` is dropped, so `mem.free` gives `mem_free` and
/// `heap-used` gives `heapused`. No other characters are touched.
pub fn metric_segment(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-')
        .map(|c| if c == '.' { '_' } else { c })
        .collect()
}

/// Collects one sample per exportable leaf under `prefix`.
///
/// The root must be an object. Sample order follows the map's iteration
/// order and must not be relied on.
pub fn collect_samples(prefix: &str, value: &Value) -> Result<Vec<Sample>> {
    let map = value.as_object().ok_or(FlattenError::NotAnObject {
        found: kind_name(value),
    })?;

    let mut samples = Vec::new();
    walk_object(prefix, map, &mut samples);
    Ok(samples)
}

/// Flattens `value` into newline-terminated exposition lines.
pub fn flatten(prefix: &str, value: &Value) -> Result<String> {
    Ok(render(&collect_samples(prefix, value)?))
}

/// Renders samples as `<name> <value>\n` lines.
pub fn render(samples: &[Sample]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for sample in samples {
        let _ = writeln!(out, "{sample}");
    }
    out
}

fn walk_object(prefix: &str, map: &Map<String, Value>, out: &mut Vec<Sample>) {
    for (key, value) in map {
        let name = format!("{prefix}_{}", metric_segment(key));

        match value {
            Value::String(raw) => out.extend(Sample::status(name, ComponentStatus::parse(raw))),
            Value::Number(n) => match n.as_f64() {
                Some(v) => out.push(Sample::number(name, v)),
                None => tracing::warn!(metric = %name, value = %n, "number not representable as f64, skipping"),
            },
            Value::Object(inner) => walk_object(&name, inner, out),
            Value::Array(items) => walk_array(&name, items, out),
            Value::Bool(_) | Value::Null => {
                tracing::warn!(metric = %name, value = %value, "unsupported value kind, skipping");
            }
        }
    }
}

// Array elements share the array's prefix; positions are not part of the name.
fn walk_array(prefix: &str, items: &[Value], out: &mut Vec<Sample>) {
    for item in items {
        match item {
            Value::Object(inner) => walk_object(prefix, inner, out),
            Value::Array(nested) => walk_array(prefix, nested, out),
            other => {
                tracing::warn!(metric = %prefix, value = %other, "scalar array element, skipping");
            }
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
