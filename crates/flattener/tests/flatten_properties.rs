//! Behavioural tests for flattening realistic SpringXD documents.

use std::collections::BTreeSet;

use flattener::{FlattenError, collect_samples, flatten};
use serde_json::{Value, json};

const HEALTH: &str = include_str!("../../../fixtures/management_health.json");
const METRICS: &str = include_str!("../../../fixtures/management_metrics.json");

fn line_set(text: &str) -> BTreeSet<String> {
    text.lines().map(str::to_owned).collect()
}

/// Counts leaves reachable through objects that carry a number or a known status.
fn exportable_leaves(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(exportable_leaves).sum(),
        Value::Number(_) => 1,
        Value::String(s) if matches!(s.as_str(), "Up" | "UP" | "Down" | "DOWN") => 1,
        _ => 0,
    }
}

mod health_document {
    use super::*;

    #[test]
    fn flattens_nested_indicators() {
        let doc: Value = serde_json::from_str(HEALTH).unwrap();
        let lines = line_set(&flatten("springxd_health", &doc).unwrap());

        assert!(lines.contains("springxd_health_status 1.0"));
        assert!(lines.contains("springxd_health_diskSpace_status 1.0"));
        assert!(lines.contains("springxd_health_diskSpace_free 104372518912.000000"));
        assert!(lines.contains("springxd_health_db_hello 1.000000"));
        assert!(lines.contains("springxd_health_redis_status 0.0"));
    }

    #[test]
    fn free_text_fields_are_dropped() {
        let doc: Value = serde_json::from_str(HEALTH).unwrap();
        let text = flatten("springxd_health", &doc).unwrap();

        assert!(!text.contains("database"));
        assert!(!text.contains("redis_error"));
    }
}

mod metrics_document {
    use super::*;

    #[test]
    fn one_line_per_exportable_leaf() {
        let doc: Value = serde_json::from_str(METRICS).unwrap();
        let samples = collect_samples("springxd_metrics", &doc).unwrap();

        assert_eq!(samples.len(), exportable_leaves(&doc));
    }

    #[test]
    fn dotted_and_dashed_keys_are_sanitized() {
        let doc: Value = serde_json::from_str(METRICS).unwrap();
        let lines = line_set(&flatten("springxd_metrics", &doc).unwrap());

        assert!(lines.contains("springxd_metrics_mem_free 312086.000000"));
        assert!(lines.contains("springxd_metrics_gc_g1_young_generation_count 42.000000"));
        assert!(lines.contains("springxd_metrics_datasource_primary_usage 0.200000"));
        assert!(lines.contains("springxd_metrics_counter_status_200_managementmetrics 137.000000"));
    }

    #[test]
    fn reflattening_is_stable() {
        let doc: Value = serde_json::from_str(METRICS).unwrap();
        let first = line_set(&flatten("springxd_metrics", &doc).unwrap());
        let second = line_set(&flatten("springxd_metrics", &doc).unwrap());

        assert_eq!(first, second);
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn deep_nesting_joins_every_segment() {
        let doc = json!({"a": {"b": {"c": {"d.e": {"f-g": 7}}}}});
        assert_eq!(flatten("x", &doc).unwrap(), "x_a_b_c_d_e_fg 7.000000\n");
    }

    #[test]
    fn mixed_leaves_only_export_supported_kinds() {
        let doc = json!({
            "up": "UP",
            "down": "DOWN",
            "label": "hello",
            "flag": false,
            "nothing": null,
            "n": 1.5
        });
        let lines = line_set(&flatten("x", &doc).unwrap());

        let expected: BTreeSet<String> = ["x_up 1.0", "x_down 0.0", "x_n 1.500000"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn empty_body_parsed_as_null_is_rejected() {
        let value: Value = serde_json::from_str("").unwrap_or(Value::Null);
        assert_eq!(
            flatten("x", &value),
            Err(FlattenError::NotAnObject { found: "null" })
        );
    }

    #[test]
    fn job_executions_array_root_is_rejected() {
        let doc: Value = serde_json::from_str(include_str!(
            "../../../fixtures/jobs_executions.json"
        ))
        .unwrap();
        assert!(matches!(
            flatten("x", &doc),
            Err(FlattenError::NotAnObject { found: "array" })
        ));
    }
}
