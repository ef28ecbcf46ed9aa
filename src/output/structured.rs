//! JSON output for validation reports.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{OutputResult, RunMetadata};
use crate::validation::ValidationReport;

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: &'a RunMetadata,
    report: &'a ValidationReport,
}

/// Writer for JSON-formatted reports.
///
/// The document has two keys: `metadata` (tool, version, generation time,
/// pass/fail) and `report` (publication, headline, word count, findings).
pub struct JsonReportWriter;

impl JsonReportWriter {
    /// Write a report to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bylint::output::{JsonReportWriter, RunMetadata};
    /// use bylint::validation::{Severity, ValidationReport};
    ///
    /// let report = ValidationReport::new("Forbes", "Headline", 850);
    /// let metadata = RunMetadata::new(&report, Severity::Error);
    /// JsonReportWriter::write_to_file(&report, &metadata, "report.json")?;
    /// # Ok::<(), bylint::output::OutputError>(())
    /// ```
    pub fn write_to_file<P: AsRef<Path>>(
        report: &ValidationReport,
        metadata: &RunMetadata,
        path: P,
    ) -> OutputResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let json = Self::to_json_string(report, metadata)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize a report to pretty-printed JSON.
    pub fn to_json_string(report: &ValidationReport, metadata: &RunMetadata) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(&JsonDocument { metadata, report })?)
    }

    /// Serialize a report to single-line JSON.
    pub fn to_json_compact(report: &ValidationReport, metadata: &RunMetadata) -> OutputResult<String> {
        Ok(serde_json::to_string(&JsonDocument { metadata, report })?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{sample_metadata, sample_report};
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_to_json_string() {
        let report = sample_report();
        let json = JsonReportWriter::to_json_string(&report, &sample_metadata(&report)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["tool"], "bylint");
        assert_eq!(value["metadata"]["generated_at"], "2026-03-01T09:30:00Z");
        assert_eq!(value["metadata"]["fail_on"], "error");
        assert_eq!(value["metadata"]["passed"], false);
        assert_eq!(value["report"]["publication"], "Forbes");
        assert_eq!(value["report"]["word_count"], 650);

        let findings = value["report"]["findings"].as_array().unwrap();
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0]["rule"], "word-count");
        assert_eq!(findings[0]["severity"], "error");
        assert!(findings[0].get("excerpts").is_none());
        assert_eq!(findings[1]["excerpts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_survives_json() {
        let report = sample_report();
        let json = JsonReportWriter::to_json_compact(&report, &sample_metadata(&report)).unwrap();
        assert!(!json.contains('\n'));

        let value: Value = serde_json::from_str(&json).unwrap();
        let parsed: ValidationReport = serde_json::from_value(value["report"].clone()).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_write_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        let report = sample_report();

        JsonReportWriter::write_to_file(&report, &sample_metadata(&report), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"below minimum (650 < 800)\""));
    }
}
