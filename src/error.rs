//! Error types for parity matching and reporting

use std::path::PathBuf;

use thiserror::Error;

/// Result type for parity operations
pub type Result<T> = std::result::Result<T, ParityError>;

/// Parity engine errors
#[derive(Error, Debug)]
pub enum ParityError {
    #[error("At least two registries are required, got {count}")]
    TooFewRegistries { count: usize },

    #[error("Failed to load registry {path}: {source}")]
    RegistryLoad {
        path: PathBuf,
        #[source]
        source: Box<ParityError>,
    },

    #[error("Unknown language tag: '{0}'")]
    UnknownLanguage(String),

    #[error("Feature '{name}' is tagged {feature} but its registry is {registry}")]
    LanguageMismatch {
        registry: String,
        feature: String,
        name: String,
    },

    #[error("Alpha must be within [0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("Invalid similarity weights: {0}")]
    InvalidWeights(String),

    #[error("Unknown report type: '{0}'")]
    UnknownReportType(String),

    #[error("Report type '{report_type}' cannot be used in {mode} mode")]
    ReportTypeMode {
        report_type: String,
        mode: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
