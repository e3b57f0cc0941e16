//! Indicator document model.
//!
//! Plain value types produced by [`crate::read_indicator_document`] and
//! checked by [`crate::validate`]. A [`Document`] owns everything it
//! contains; references between entities are by identity, never by pointer.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseOperatorError;

// ── Metrics ──

/// A raw metric exposed by some source. Identity is `(name, source_id)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metric {
    pub title: String,
    pub description: String,
    pub name: String,
    pub source_id: String,
    pub origin: String,
}

/// Reference to a [`Metric`] by identity. May dangle until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MetricRef {
    pub name: String,
    pub source_id: String,
}

impl MetricRef {
    pub fn new(name: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_id: source_id.into(),
        }
    }
}

// ── Thresholds ──

/// Comparison applied by a [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    LessThan,
    LessThanOrEqualTo,
    EqualTo,
    NotEqualTo,
    GreaterThanOrEqualTo,
    GreaterThan,
}

impl Operator {
    /// Every operator, in the order the decoder scans threshold keys.
    pub const ALL: [Operator; 6] = [
        Operator::LessThan,
        Operator::LessThanOrEqualTo,
        Operator::EqualTo,
        Operator::NotEqualTo,
        Operator::GreaterThanOrEqualTo,
        Operator::GreaterThan,
    ];

    /// Key used for this operator in a threshold entry.
    pub fn key(self) -> &'static str {
        match self {
            Operator::LessThan => "lt",
            Operator::LessThanOrEqualTo => "lte",
            Operator::EqualTo => "eq",
            Operator::NotEqualTo => "neq",
            Operator::GreaterThanOrEqualTo => "gte",
            Operator::GreaterThan => "gt",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::EqualTo => "==",
            Operator::NotEqualTo => "!=",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.key() == s)
            .ok_or_else(|| ParseOperatorError(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// One alerting rule on an indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub level: String,
    pub operator: Operator,
    pub value: f64,
    /// Adjustable by the source rather than fixed by the document.
    pub dynamic: bool,
}

// ── Indicators ──

/// A derived metric with its query, thresholds and operator guidance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Indicator {
    pub name: String,
    pub title: String,
    pub description: String,
    pub promql: String,
    pub response: String,
    pub measurement: String,
    pub thresholds: Vec<Threshold>,
    pub metric_refs: Vec<MetricRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct IndicatorRef {
    pub name: String,
}

impl IndicatorRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ── Documentation ──

/// A narrative grouping of indicators and metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub indicator_refs: Vec<IndicatorRef>,
    pub metric_refs: Vec<MetricRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Documentation {
    pub title: String,
    pub owner: String,
    pub description: String,
    pub sections: Vec<Section>,
}

// ── Root ──

/// Root aggregate: the unit of decoding and of validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub metrics: Vec<Metric>,
    pub indicators: Vec<Indicator>,
    pub documentation: Documentation,
}

impl Document {
    /// Find a metric by its `(name, source_id)` identity.
    pub fn metric(&self, name: &str, source_id: &str) -> Option<&Metric> {
        self.metrics
            .iter()
            .find(|m| m.name == name && m.source_id == source_id)
    }

    /// Find an indicator by name.
    pub fn indicator(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.name == name)
    }
}
