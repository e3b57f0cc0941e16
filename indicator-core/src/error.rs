use thiserror::Error;

/// Terminal failure while turning bytes into a [`crate::Document`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid indicator document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{location}: threshold has no operator (expected one of lt, lte, eq, neq, gte, gt)")]
    MissingThresholdOperator { location: String },

    #[error("{location}: threshold has more than one operator: {}", .keys.join(", "))]
    AmbiguousThresholdOperator {
        location: String,
        keys: Vec<&'static str>,
    },

    #[error("{location}: threshold {key} value '{value}' is not a number")]
    InvalidThresholdValue {
        location: String,
        key: &'static str,
        value: String,
    },
}

/// Returned by `str::parse::<Operator>()` for a key outside `lt, lte, eq, neq, gte, gt`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown threshold operator '{0}'")]
pub struct ParseOperatorError(pub String);
