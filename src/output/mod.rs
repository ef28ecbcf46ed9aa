//! File and string renderings of validation reports.
//!
//! The report itself carries no timestamp; run metadata such as the
//! generation time is attached here, at output time.

pub mod markdown;
pub mod structured;

pub use markdown::MarkdownReportWriter;
pub use structured::JsonReportWriter;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::validation::{Severity, ValidationReport};

/// Errors that can occur while writing a report.
#[derive(Error, Debug)]
pub enum OutputError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Facts about a validation run that are not part of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    /// Tool name
    pub tool: String,
    /// Tool version
    pub version: String,
    /// RFC 3339 time the report was rendered
    pub generated_at: String,
    /// Severity at which the run fails
    pub fail_on: Severity,
    /// Whether no finding reached `fail_on`
    pub passed: bool,
}

impl RunMetadata {
    /// Metadata for `report`, stamped with the current time.
    pub fn new(report: &ValidationReport, fail_on: Severity) -> Self {
        Self::at(report, fail_on, Utc::now())
    }

    /// Metadata for `report`, stamped with `time`.
    pub fn at(report: &ValidationReport, fail_on: Severity, time: DateTime<Utc>) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: time.to_rfc3339_opts(SecondsFormat::Secs, true),
            fail_on,
            passed: report.passes(fail_on),
        }
    }
}
