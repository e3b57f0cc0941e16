//! YAML decoding for indicator documents.
//!
//! Deserialization goes through private `*Yaml` structs that tolerate missing
//! and unknown fields, then converts them into the model. Threshold operators
//! are resolved during that conversion.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::debug;

use crate::error::DecodeError;
use crate::model::*;

// ── Helper defaults for serde ──

/// An explicit YAML null (`title: ~`, `dynamic:`) reads as the zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── YAML format for deserialization ──

#[derive(Debug, Default, Deserialize)]
struct DocumentYaml {
    #[serde(default)]
    metrics: Vec<MetricYaml>,
    #[serde(default)]
    indicators: Vec<IndicatorYaml>,
    #[serde(default)]
    documentation: DocumentationYaml,
}

#[derive(Debug, Default, Deserialize)]
struct MetricYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    source_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    origin: String,
}

#[derive(Debug, Default, Deserialize)]
struct MetricRefYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    source_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct IndicatorYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    promql: String,
    #[serde(default, deserialize_with = "null_as_default")]
    response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    measurement: String,
    #[serde(default)]
    thresholds: Vec<ThresholdYaml>,
    #[serde(default)]
    metrics: Vec<MetricRefYaml>,
}

/// One threshold entry. At most one of the operator keys may be set.
#[derive(Debug, Default, Deserialize)]
struct ThresholdYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    dynamic: bool,
    #[serde(default)]
    lt: Option<Value>,
    #[serde(default)]
    lte: Option<Value>,
    #[serde(default)]
    eq: Option<Value>,
    #[serde(default)]
    neq: Option<Value>,
    #[serde(default)]
    gte: Option<Value>,
    #[serde(default)]
    gt: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct IndicatorRefYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct SectionYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    indicators: Vec<IndicatorRefYaml>,
    #[serde(default)]
    metrics: Vec<MetricRefYaml>,
}

#[derive(Debug, Default, Deserialize)]
struct DocumentationYaml {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    sections: Vec<SectionYaml>,
}

/// Parse an indicator document.
///
/// Validation is NOT performed here; pass the result to
/// [`crate::validate`] to check completeness and references.
///
/// ```
/// use indicator_core::{read_indicator_document, Operator};
///
/// let doc = read_indicator_document(b"
/// indicators:
/// - name: kpi
///   thresholds:
///   - level: critical
///     gt: 0.9
/// ").unwrap();
/// assert_eq!(doc.indicators[0].thresholds[0].operator, Operator::GreaterThan);
/// ```
pub fn read_indicator_document(bytes: &[u8]) -> Result<Document, DecodeError> {
    let raw: DocumentYaml = serde_yaml::from_slice(bytes)?;
    let document = raw.into_document()?;

    debug!(
        metrics = document.metrics.len(),
        indicators = document.indicators.len(),
        sections = document.documentation.sections.len(),
        "decoded indicator document"
    );

    Ok(document)
}

pub fn read_indicator_document_str(yaml: &str) -> Result<Document, DecodeError> {
    read_indicator_document(yaml.as_bytes())
}

// ── Conversion ──

impl DocumentYaml {
    fn into_document(self) -> Result<Document, DecodeError> {
        let indicators = self
            .indicators
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_indicator(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            metrics: self.metrics.into_iter().map(Into::into).collect(),
            indicators,
            documentation: self.documentation.into(),
        })
    }
}

impl From<MetricYaml> for Metric {
    fn from(raw: MetricYaml) -> Self {
        Metric {
            title: raw.title,
            description: raw.description,
            name: raw.name,
            source_id: raw.source_id,
            origin: raw.origin,
        }
    }
}

impl From<MetricRefYaml> for MetricRef {
    fn from(raw: MetricRefYaml) -> Self {
        MetricRef {
            name: raw.name,
            source_id: raw.source_id,
        }
    }
}

impl IndicatorYaml {
    fn into_indicator(self, index: usize) -> Result<Indicator, DecodeError> {
        let thresholds = self
            .thresholds
            .into_iter()
            .enumerate()
            .map(|(j, raw)| raw.into_threshold(&format!("indicators[{index}].thresholds[{j}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Indicator {
            name: self.name,
            title: self.title,
            description: self.description,
            promql: self.promql,
            response: self.response,
            measurement: self.measurement,
            thresholds,
            metric_refs: self.metrics.into_iter().map(Into::into).collect(),
        })
    }
}

impl ThresholdYaml {
    /// Operator keys paired with their values, in scan order.
    fn operator_slots(&self) -> [(Operator, Option<&Value>); 6] {
        [
            (Operator::LessThan, self.lt.as_ref()),
            (Operator::LessThanOrEqualTo, self.lte.as_ref()),
            (Operator::EqualTo, self.eq.as_ref()),
            (Operator::NotEqualTo, self.neq.as_ref()),
            (Operator::GreaterThanOrEqualTo, self.gte.as_ref()),
            (Operator::GreaterThan, self.gt.as_ref()),
        ]
    }

    fn into_threshold(self, location: &str) -> Result<Threshold, DecodeError> {
        let (operator, value) = self.resolve_operator(location)?;
        Ok(Threshold {
            level: self.level,
            operator,
            value,
            dynamic: self.dynamic,
        })
    }

    fn resolve_operator(&self, location: &str) -> Result<(Operator, f64), DecodeError> {
        let present: Vec<(Operator, &Value)> = self
            .operator_slots()
            .into_iter()
            .filter_map(|(op, value)| value.filter(|v| !v.is_null()).map(|v| (op, v)))
            .collect();

        let (operator, raw_value) = match present.as_slice() {
            [] => {
                return Err(DecodeError::MissingThresholdOperator {
                    location: location.to_string(),
                })
            }
            [single] => *single,
            many => {
                return Err(DecodeError::AmbiguousThresholdOperator {
                    location: location.to_string(),
                    keys: many.iter().map(|(op, _)| op.key()).collect(),
                })
            }
        };

        let value = parse_threshold_value(raw_value).ok_or_else(|| {
            DecodeError::InvalidThresholdValue {
                location: location.to_string(),
                key: operator.key(),
                value: describe_value(raw_value),
            }
        })?;

        Ok((operator, value))
    }
}

/// Numbers are taken as-is; strings are parsed so that `"0.5"` is accepted.
fn parse_threshold_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(t) => format!("<tagged {}>", t.tag),
    }
}

impl From<IndicatorRefYaml> for IndicatorRef {
    fn from(raw: IndicatorRefYaml) -> Self {
        IndicatorRef { name: raw.name }
    }
}

impl From<SectionYaml> for Section {
    fn from(raw: SectionYaml) -> Self {
        Section {
            title: raw.title,
            description: raw.description,
            indicator_refs: raw.indicators.into_iter().map(Into::into).collect(),
            metric_refs: raw.metrics.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<DocumentationYaml> for Documentation {
    fn from(raw: DocumentationYaml) -> Self {
        Documentation {
            title: raw.title,
            owner: raw.owner,
            description: raw.description,
            sections: raw.sections.into_iter().map(Into::into).collect(),
        }
    }
}
