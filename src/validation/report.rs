//! Findings and the report that collects them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity level for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look, never blocks a draft
    Info,
    /// Should be fixed before submission
    Warning,
    /// Violates a hard publication rule
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Identifier of the rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    EmptyDraft,
    MissingHeadline,
    WordCount,
    CharacterCount,
    RequiredElement,
    ForbiddenElement,
    AllCapsSubheadings,
    SerialComma,
    PassiveVoice,
    BannedPhrase,
    EmDash,
    BannedOpener,
    CompetitorLink,
    RecurringTheme,
    TopicRepetition,
}

impl RuleId {
    /// Every rule, in the order checks run.
    pub const ALL: [RuleId; 15] = [
        RuleId::EmptyDraft,
        RuleId::MissingHeadline,
        RuleId::WordCount,
        RuleId::CharacterCount,
        RuleId::RequiredElement,
        RuleId::ForbiddenElement,
        RuleId::AllCapsSubheadings,
        RuleId::SerialComma,
        RuleId::PassiveVoice,
        RuleId::BannedPhrase,
        RuleId::EmDash,
        RuleId::BannedOpener,
        RuleId::CompetitorLink,
        RuleId::RecurringTheme,
        RuleId::TopicRepetition,
    ];

    /// Kebab-case name, e.g. `word-count`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::EmptyDraft => "empty-draft",
            RuleId::MissingHeadline => "missing-headline",
            RuleId::WordCount => "word-count",
            RuleId::CharacterCount => "character-count",
            RuleId::RequiredElement => "required-element",
            RuleId::ForbiddenElement => "forbidden-element",
            RuleId::AllCapsSubheadings => "all-caps-subheadings",
            RuleId::SerialComma => "serial-comma",
            RuleId::PassiveVoice => "passive-voice",
            RuleId::BannedPhrase => "banned-phrase",
            RuleId::EmDash => "em-dash",
            RuleId::BannedOpener => "banned-opener",
            RuleId::CompetitorLink => "competitor-link",
            RuleId::RecurringTheme => "recurring-theme",
            RuleId::TopicRepetition => "topic-repetition",
        }
    }

    /// Severity used when no override is configured.
    pub fn default_severity(&self) -> Severity {
        match self {
            RuleId::EmptyDraft
            | RuleId::WordCount
            | RuleId::RequiredElement
            | RuleId::ForbiddenElement
            | RuleId::AllCapsSubheadings
            | RuleId::BannedPhrase
            | RuleId::CompetitorLink => Severity::Error,
            RuleId::MissingHeadline
            | RuleId::CharacterCount
            | RuleId::SerialComma
            | RuleId::EmDash
            | RuleId::BannedOpener
            | RuleId::TopicRepetition => Severity::Warning,
            RuleId::PassiveVoice | RuleId::RecurringTheme => Severity::Info,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.as_str() == wanted)
            .ok_or_else(|| format!("unknown rule: {s}"))
    }
}

/// A single deviation between a draft and a style profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// How serious the deviation is
    pub severity: Severity,
    /// Rule that produced the finding
    pub rule: RuleId,
    /// Human-readable description, e.g. "below minimum (650 < 800)"
    pub message: String,
    /// Offending snippets from the draft, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excerpts: Vec<String>,
}

impl Finding {
    /// Create a finding with the rule's default severity.
    pub fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            severity: rule.default_severity(),
            rule,
            message: message.into(),
            excerpts: Vec::new(),
        }
    }

    /// Attach offending snippets.
    pub fn with_excerpts(mut self, excerpts: Vec<String>) -> Self {
        self.excerpts = excerpts;
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Ordered findings for one draft checked against one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Publication the draft was checked against
    pub publication: String,
    /// Headline of the checked draft
    pub headline: String,
    /// Words counted in the draft body
    pub word_count: usize,
    /// Findings in check order
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new(
        publication: impl Into<String>,
        headline: impl Into<String>,
        word_count: usize,
    ) -> Self {
        Self {
            publication: publication.into(),
            headline: headline.into(),
            word_count,
            findings: Vec::new(),
        }
    }

    /// Append a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Whether any finding was produced by `rule`.
    pub fn has(&self, rule: RuleId) -> bool {
        self.findings.iter().any(|f| f.rule == rule)
    }

    /// Findings produced by `rule`.
    pub fn by_rule(&self, rule: RuleId) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    /// Number of findings at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Counts as (errors, warnings, infos).
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info),
        )
    }

    /// Highest severity present, if any finding exists.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Whether the report has no findings at all.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether no finding reaches `fail_on`.
    pub fn passes(&self, fail_on: Severity) -> bool {
        self.max_severity().map_or(true, |max| max < fail_on)
    }

    /// One-line summary, e.g. "2 errors, 1 warning, 0 info".
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "No findings".to_string();
        }
        let (errors, warnings, infos) = self.counts();
        format!(
            "{} error{}, {} warning{}, {} info",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
            infos
        )
    }
}
