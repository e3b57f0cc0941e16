//! Decoding indicator documents from YAML.

use indicator_core::{
    read_indicator_document, read_indicator_document_str, DecodeError, Document, Documentation,
    Indicator, IndicatorRef, Metric, MetricRef, Operator, Section, Threshold,
};
use pretty_assertions::assert_eq;

const COMPLETE_DOCUMENT: &str = r#"---
metrics:
- name: latency
  source_id: demo
  origin: demo
  title: Demo Latency
  description: A test metric for testing

indicators:
- name: test_performance_indicator
  title: Test Performance Indicator
  metrics:
  - name: latency
    source_id: demo
  measurement: Measurement Text
  promql: prom
  thresholds:
  - level: warning
    gte: 50
    dynamic: true
  description: This is a valid markdown description.
  response: Panic!

documentation:
  title: Monitoring Test Product
  owner: Test Owner Team
  description: Test description
  sections:
  - title: Test Section
    description: This section includes indicators and metrics
    indicators:
    - name: test_performance_indicator
    metrics:
    - name: latency
      source_id: demo
"#;

#[test]
fn test_complete_document() {
    let doc = read_indicator_document(COMPLETE_DOCUMENT.as_bytes()).unwrap();

    let expected = Document {
        metrics: vec![Metric {
            title: "Demo Latency".to_string(),
            description: "A test metric for testing".to_string(),
            name: "latency".to_string(),
            source_id: "demo".to_string(),
            origin: "demo".to_string(),
        }],
        indicators: vec![Indicator {
            name: "test_performance_indicator".to_string(),
            title: "Test Performance Indicator".to_string(),
            description: "This is a valid markdown description.".to_string(),
            promql: "prom".to_string(),
            response: "Panic!".to_string(),
            measurement: "Measurement Text".to_string(),
            thresholds: vec![Threshold {
                level: "warning".to_string(),
                operator: Operator::GreaterThanOrEqualTo,
                value: 50.0,
                dynamic: true,
            }],
            metric_refs: vec![MetricRef::new("latency", "demo")],
        }],
        documentation: Documentation {
            title: "Monitoring Test Product".to_string(),
            owner: "Test Owner Team".to_string(),
            description: "Test description".to_string(),
            sections: vec![Section {
                title: "Test Section".to_string(),
                description: "This section includes indicators and metrics".to_string(),
                indicator_refs: vec![IndicatorRef::new("test_performance_indicator")],
                metric_refs: vec![MetricRef::new("latency", "demo")],
            }],
        },
    };

    assert_eq!(doc, expected);
}

#[test]
fn test_empty_indicator_list() {
    let doc = read_indicator_document_str("---\nindicators: []").unwrap();
    assert!(doc.indicators.is_empty());
}

#[test]
fn test_missing_sections_default_to_empty() {
    let doc = read_indicator_document_str(
        r#"---
metrics:
- name: latency
  source_id: demo
"#,
    )
    .unwrap();
    assert!(doc.indicators.is_empty());
    assert_eq!(doc.documentation, Documentation::default());
}

#[test]
fn test_converted_metric() {
    let doc = read_indicator_document_str(
        r#"---
metrics:
- name: latency
  source_id: demo
  origin: demo
  title: Demo Latency
  description: A test metric for testing"#,
    )
    .unwrap();

    assert!(doc.metrics.contains(&Metric {
        title: "Demo Latency".to_string(),
        name: "latency".to_string(),
        source_id: "demo".to_string(),
        origin: "demo".to_string(),
        description: "A test metric for testing".to_string(),
    }));
}

#[test]
fn test_every_operator_key_in_order() {
    let doc = read_indicator_document_str(
        r#"---
indicators:
- name: test-kpi
  description: desc
  promql: prom
  thresholds:
  - lt: 0
    level: warning
  - lte: 1.2
    level: warning
  - eq: 0.2
    level: warning
  - neq: 123
    level: warning
    dynamic: false
  - gte: 642
    level: warning
    dynamic: true
  - gt: 1.222225
    level: warning"#,
    )
    .unwrap();

    let threshold = |operator, value, dynamic| Threshold {
        level: "warning".to_string(),
        operator,
        value,
        dynamic,
    };

    assert_eq!(
        doc.indicators,
        vec![Indicator {
            name: "test-kpi".to_string(),
            description: "desc".to_string(),
            promql: "prom".to_string(),
            thresholds: vec![
                threshold(Operator::LessThan, 0.0, false),
                threshold(Operator::LessThanOrEqualTo, 1.2, false),
                threshold(Operator::EqualTo, 0.2, false),
                threshold(Operator::NotEqualTo, 123.0, false),
                threshold(Operator::GreaterThanOrEqualTo, 642.0, true),
                threshold(Operator::GreaterThan, 1.222225, false),
            ],
            ..Default::default()
        }]
    );
}

#[test]
fn test_unparsable_yaml() {
    let err = read_indicator_document(b"--").unwrap_err();
    assert!(matches!(err, DecodeError::Yaml(_)), "got {:?}", err);
}

#[test]
fn test_threshold_without_value() {
    let err = read_indicator_document_str(
        r#"---
indicators:
- name: test-kpi
  description: desc
  promql: prom
  thresholds:
  - level: warning
  "#,
    )
    .unwrap_err();
    assert!(
        matches!(err, DecodeError::MissingThresholdOperator { .. }),
        "got {:?}",
        err
    );
}

#[test]
fn test_threshold_with_bad_float() {
    let err = read_indicator_document_str(
        r#"---
indicators:
- name: test-kpi
  description: desc
  promql: prom
  thresholds:
  - gte: abs
    level: warning
  "#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "indicators[0].thresholds[0]: threshold gte value 'abs' is not a number"
    );
}

#[test]
fn test_ambiguous_threshold_in_second_indicator() {
    let err = read_indicator_document_str(
        r#"---
indicators:
- name: fine
  thresholds:
  - level: warning
    lt: 1
- name: broken
  thresholds:
  - level: warning
    gt: 1
  - level: critical
    gte: 5
    eq: 5
"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "indicators[1].thresholds[1]: threshold has more than one operator: eq, gte"
    );
}

#[test]
fn test_model_serializes_operator_keys() {
    let doc = read_indicator_document(COMPLETE_DOCUMENT.as_bytes()).unwrap();
    let json = serde_json::to_value(&doc.indicators[0].thresholds[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "level": "warning",
            "operator": "gte",
            "value": 50.0,
            "dynamic": true,
        })
    );
}
