//! Error types for the fallible edges of the crate.
//!
//! Limit computation itself never fails: it signals "no data" or an
//! unrecognised chart selector with `None`. Only parsing, configuration
//! and file ingestion return these errors.

/// A textual chart selector that does not name one of the four charts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chart type: {0:?} (expected one of xbar, r, c, p)")]
pub struct UnknownChartType(pub String);

/// Errors raised while loading or validating [`SpcConfig`](crate::config::SpcConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error(transparent)]
    UnknownChartType(#[from] UnknownChartType),

    #[error("No standard chart constants for subgroup size {0} (supported: 2..=10)")]
    UnsupportedSubgroupSize(usize),
}

/// Errors raised while reading subgroups from CSV.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("CSV input has no header row")]
    MissingHeader,

    #[error("Failed to read CSV input: {0}")]
    Io(#[from] std::io::Error),
}
