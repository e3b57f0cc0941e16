use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::model::*;

/// One rule violation found in a [`Document`].
///
/// `entity` is the path of the offending entity, e.g. `metrics[0]` or
/// `documentation.sections[1]`. The `Display` text is meant for document
/// authors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity} {field} is required")]
    MissingField { entity: String, field: &'static str },

    #[error("{entity} must reference at least 1 metric")]
    MissingMetricRefs { entity: String },

    #[error("{entity} references non-existent indicator {name}")]
    UnknownIndicator { entity: String, name: String },

    #[error("{entity} references non-existent metric {name} (source_id: {source_id})")]
    UnknownMetric {
        entity: String,
        name: String,
        source_id: String,
    },
}

impl ValidationError {
    pub fn entity(&self) -> &str {
        match self {
            ValidationError::MissingField { entity, .. }
            | ValidationError::MissingMetricRefs { entity }
            | ValidationError::UnknownIndicator { entity, .. }
            | ValidationError::UnknownMetric { entity, .. } => entity.as_str(),
        }
    }
}

/// Validate a decoded document. Returns all errors found; empty means valid.
pub fn validate(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, metric) in document.metrics.iter().enumerate() {
        let entity = format!("metrics[{i}]");
        require(&mut errors, &entity, "title", &metric.title);
        require(&mut errors, &entity, "description", &metric.description);
        require(&mut errors, &entity, "name", &metric.name);
        require(&mut errors, &entity, "source_id", &metric.source_id);
        require(&mut errors, &entity, "origin", &metric.origin);
    }

    for (i, indicator) in document.indicators.iter().enumerate() {
        let entity = format!("indicators[{i}]");
        require(&mut errors, &entity, "name", &indicator.name);
        require(&mut errors, &entity, "title", &indicator.title);
        require(&mut errors, &entity, "description", &indicator.description);
        require(&mut errors, &entity, "promql", &indicator.promql);
        require(&mut errors, &entity, "response", &indicator.response);
        require(&mut errors, &entity, "measurement", &indicator.measurement);

        if indicator.metric_refs.is_empty() {
            errors.push(ValidationError::MissingMetricRefs { entity });
        }
    }

    validate_section_refs(document, &mut errors);

    debug!(errors = errors.len(), "validated indicator document");
    errors
}

/// Section refs must land on an existing indicator name or metric identity.
fn validate_section_refs(document: &Document, errors: &mut Vec<ValidationError>) {
    let indicator_names: HashSet<&str> = document
        .indicators
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    let metric_ids: HashSet<(&str, &str)> = document
        .metrics
        .iter()
        .map(|m| (m.name.as_str(), m.source_id.as_str()))
        .collect();

    for (k, section) in document.documentation.sections.iter().enumerate() {
        let entity = format!("documentation.sections[{k}]");

        for indicator_ref in &section.indicator_refs {
            if !indicator_names.contains(indicator_ref.name.as_str()) {
                errors.push(ValidationError::UnknownIndicator {
                    entity: entity.clone(),
                    name: indicator_ref.name.clone(),
                });
            }
        }

        for metric_ref in &section.metric_refs {
            let id = (metric_ref.name.as_str(), metric_ref.source_id.as_str());
            if !metric_ids.contains(&id) {
                errors.push(ValidationError::UnknownMetric {
                    entity: entity.clone(),
                    name: metric_ref.name.clone(),
                    source_id: metric_ref.source_id.clone(),
                });
            }
        }
    }
}

fn require(errors: &mut Vec<ValidationError>, entity: &str, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::MissingField {
            entity: entity.to_string(),
            field,
        });
    }
}
