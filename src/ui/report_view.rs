//! Plain-text report view for the terminal.

use owo_colors::{OwoColorize, Rgb};

use crate::ui::colors::Theme;
use crate::validation::{Finding, Severity, ValidationReport};

const RULE_WIDTH: usize = 22;

/// Renders a [`ValidationReport`] for humans.
#[derive(Debug)]
pub struct ReportRenderer {
    theme: Theme,
    colors_enabled: bool,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Create a renderer with colors enabled.
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    /// Create a renderer with a custom theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            colors_enabled: true,
        }
    }

    /// Enable or disable ANSI colors.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    /// Render the full report: header, findings, and the result line.
    pub fn render(&self, report: &ValidationReport, fail_on: Severity) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header(report));
        output.push_str("\n\n");
        for finding in &report.findings {
            output.push_str(&self.render_finding(finding));
        }
        if !report.is_clean() {
            output.push('\n');
        }
        output.push_str(&self.render_result(report, fail_on));
        output.push('\n');
        output
    }

    /// Publication, headline and word count.
    pub fn render_header(&self, report: &ValidationReport) -> String {
        let headline = if report.headline.is_empty() {
            "(untitled draft)".to_string()
        } else {
            format!("\"{}\"", report.headline)
        };
        format!(
            "{} {} {}",
            self.paint_bold(&report.publication, self.theme.rule_id),
            headline,
            self.paint(&format!("({} words)", report.word_count), self.theme.muted)
        )
    }

    /// One finding with its excerpts, one line each.
    pub fn render_finding(&self, finding: &Finding) -> String {
        let icon = match finding.severity {
            Severity::Error => "✗",
            Severity::Warning => "!",
            Severity::Info => "i",
        };
        let color = self.theme.severity(finding.severity);
        let label = format!("{} {:<7}", icon, finding.severity.to_string());
        let rule = format!("{:<width$}", finding.rule.as_str(), width = RULE_WIDTH);

        let mut output = format!(
            "  {} {} {}\n",
            self.paint(&label, color),
            self.paint(&rule, self.theme.rule_id),
            finding.message
        );
        for excerpt in &finding.excerpts {
            output.push_str(&format!(
                "{}{}\n",
                " ".repeat(RULE_WIDTH - 8),
                self.paint(&format!("› {}", excerpt), self.theme.muted)
            ));
        }
        output
    }

    /// Final PASS/FAIL line with counts.
    pub fn render_result(&self, report: &ValidationReport, fail_on: Severity) -> String {
        if report.passes(fail_on) {
            let text = format!("✓ PASS  {}", report.summary());
            self.paint_bold(&text, self.theme.success)
        } else {
            let text = format!("✗ FAIL  {}", report.summary());
            self.paint_bold(&text, self.theme.error)
        }
    }

    fn paint(&self, text: &str, color: Rgb) -> String {
        if self.colors_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_bold(&self, text: &str, color: Rgb) -> String {
        if self.colors_enabled {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleId;

    fn report() -> ValidationReport {
        let mut report = ValidationReport::new("Forbes", "Trust Is the Product", 650);
        report.push(Finding::new(RuleId::WordCount, "below minimum (650 < 800)"));
        report.push(
            Finding::new(RuleId::EmDash, "1 em dash").with_excerpts(vec!["fast — cheap".into()]),
        );
        report
    }

    #[test]
    fn test_plain_render() {
        let out = ReportRenderer::new()
            .with_colors(false)
            .render(&report(), Severity::Error);

        assert!(out.starts_with("Forbes \"Trust Is the Product\" (650 words)\n\n"));
        assert!(out.contains("✗ error   word-count"));
        assert!(out.contains("below minimum (650 < 800)"));
        assert!(out.contains("› fast — cheap"));
        assert!(out.ends_with("✗ FAIL  1 error, 1 warning, 0 info\n"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_pass_line_respects_threshold() {
        let mut report = ValidationReport::new("Forbes", "", 850);
        report.push(Finding::new(RuleId::EmDash, "1 em dash"));
        let renderer = ReportRenderer::new().with_colors(false);

        assert_eq!(
            renderer.render_result(&report, Severity::Error),
            "✓ PASS  0 errors, 1 warning, 0 info"
        );
        assert!(renderer
            .render_header(&report)
            .contains("(untitled draft)"));
    }

    #[test]
    fn test_clean_report() {
        let report = ValidationReport::new("Entrepreneur", "Headline", 1200);
        let out = ReportRenderer::new()
            .with_colors(false)
            .render(&report, Severity::Error);
        assert!(out.ends_with("\n\n✓ PASS  No findings\n"));
    }

    #[test]
    fn test_custom_theme_colors_findings() {
        let theme = Theme {
            error: Rgb(1, 2, 3),
            ..Theme::default()
        };
        let out = ReportRenderer::with_theme(theme).render(&report(), Severity::Error);
        assert!(out.contains("\u{1b}[38;2;1;2;3m"));
        assert!(!out.contains("38;2;239;68;68"));
    }

    #[test]
    fn test_colored_render_uses_ansi() {
        let out = ReportRenderer::new().render(&report(), Severity::Error);
        assert!(out.contains('\u{1b}'));
    }
}
