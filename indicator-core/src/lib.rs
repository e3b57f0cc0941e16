//! indicator-core: decoding and validation of indicator documents
//!
//! An indicator document declares the metrics a product exposes, the
//! indicators derived from them (query, thresholds, operator guidance) and
//! documentation sections that narrate both. This crate provides:
//! - the document model (`Document`, `Metric`, `Indicator`, `Threshold`, ...)
//! - a YAML decoder that resolves threshold operators (`read_indicator_document`)
//! - a validator that reports every completeness and reference problem at once
//!   (`validate`)
//!
//! Both entry points are pure functions: no I/O, no global state. Loading the
//! bytes and presenting the results belong to the caller.
//!
//! ```
//! use indicator_core::{read_indicator_document, validate};
//!
//! let doc = read_indicator_document(b"indicators: []").unwrap();
//! assert!(validate(&doc).is_empty());
//! ```

pub mod decode;
pub mod error;
pub mod model;
pub mod validate;

pub use decode::{read_indicator_document, read_indicator_document_str};
pub use error::{DecodeError, ParseOperatorError};
pub use model::{
    Document, Documentation, Indicator, IndicatorRef, Metric, MetricRef, Operator, Section,
    Threshold,
};
pub use validate::{validate, ValidationError};
