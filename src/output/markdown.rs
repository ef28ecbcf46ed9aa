//! Markdown output for validation reports, suitable for pasting into an
//! editorial ticket or review thread.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{OutputResult, RunMetadata};
use crate::validation::{Finding, Severity, ValidationReport};

/// Writer for markdown-formatted reports.
pub struct MarkdownReportWriter;

impl MarkdownReportWriter {
    /// Write a report to a markdown file.
    pub fn write_to_file<P: AsRef<Path>>(
        report: &ValidationReport,
        metadata: &RunMetadata,
        path: P,
    ) -> OutputResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(Self::to_markdown_string(report, metadata).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Format a report as markdown.
    pub fn to_markdown_string(report: &ValidationReport, metadata: &RunMetadata) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_header(report, metadata));
        output.push_str(&Self::format_summary(report));
        output.push_str(&Self::format_findings(report));
        output
    }

    fn format_header(report: &ValidationReport, metadata: &RunMetadata) -> String {
        let headline = if report.headline.is_empty() {
            "(untitled draft)"
        } else {
            report.headline.as_str()
        };
        let result = if metadata.passed { "PASS" } else { "FAIL" };

        let mut header = format!("# Style Check: {}\n\n", headline);
        header.push_str(&format!("- **Publication:** {}\n", report.publication));
        header.push_str(&format!("- **Words:** {}\n", report.word_count));
        header.push_str(&format!(
            "- **Result:** {} (fails on {})\n",
            result, metadata.fail_on
        ));
        header.push_str(&format!(
            "- **Generated:** {} by {} {}\n\n",
            metadata.generated_at, metadata.tool, metadata.version
        ));
        header
    }

    fn format_summary(report: &ValidationReport) -> String {
        let (errors, warnings, infos) = report.counts();
        let mut summary = String::from("## Summary\n\n");
        summary.push_str("| Severity | Count |\n");
        summary.push_str("|----------|-------|\n");
        summary.push_str(&format!("| Error | {} |\n", errors));
        summary.push_str(&format!("| Warning | {} |\n", warnings));
        summary.push_str(&format!("| Info | {} |\n\n", infos));
        summary
    }

    fn format_findings(report: &ValidationReport) -> String {
        let mut section = String::from("## Findings\n\n");
        if report.is_clean() {
            section.push_str("No findings. The draft matches the style guide.\n");
            return section;
        }

        for (severity, title) in [
            (Severity::Error, "Errors"),
            (Severity::Warning, "Warnings"),
            (Severity::Info, "Info"),
        ] {
            let findings: Vec<&Finding> = report
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            if findings.is_empty() {
                continue;
            }
            section.push_str(&format!("### {}\n\n", title));
            for finding in findings {
                section.push_str(&format!("- **{}**: {}\n", finding.rule, finding.message));
                for excerpt in &finding.excerpts {
                    section.push_str(&format!("  - `{}`\n", excerpt.replace('`', "'")));
                }
            }
            section.push('\n');
        }
        section
    }
}
