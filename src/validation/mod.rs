//! Draft validation against a style profile.
//!
//! [`ArticleValidator`] runs every rule check, applies configured severity
//! overrides and disabled rules, and returns a [`ValidationReport`]. A draft
//! never makes validation fail; every problem is reported as a [`Finding`].

mod checks;
pub mod report;

pub use report::{Finding, RuleId, Severity, ValidationReport};

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::draft::ArticleDraft;
use crate::profile::StyleProfile;
use checks::{CheckContext, Patterns};

/// Tuning knobs for [`ArticleValidator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorOptions {
    /// Phrases banned for every publication, on top of the profile's own
    pub extra_banned_phrases: Vec<String>,
    /// Rules whose findings are dropped
    pub disabled_rules: BTreeSet<RuleId>,
    /// Severity to report instead of a rule's default
    pub severity_overrides: BTreeMap<RuleId, Severity>,
    /// Minimum headline/topic word overlap (0.0-1.0) that counts as a repeat
    pub repetition_threshold: f64,
    /// Maximum excerpts attached to one finding
    pub max_excerpts: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            extra_banned_phrases: Vec::new(),
            disabled_rules: BTreeSet::new(),
            severity_overrides: BTreeMap::new(),
            repetition_threshold: 0.6,
            max_excerpts: 3,
        }
    }
}

impl ValidatorOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add brand-wide banned phrases.
    pub fn with_banned_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_banned_phrases
            .extend(phrases.into_iter().map(Into::into));
        self
    }

    /// Drop all findings of `rule`.
    pub fn with_disabled_rule(mut self, rule: RuleId) -> Self {
        self.disabled_rules.insert(rule);
        self
    }

    /// Report `rule` at `severity`.
    pub fn with_severity(mut self, rule: RuleId, severity: Severity) -> Self {
        self.severity_overrides.insert(rule, severity);
        self
    }

    /// Set the repetition threshold, clamped to 0.0-1.0.
    pub fn with_repetition_threshold(mut self, threshold: f64) -> Self {
        self.repetition_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the maximum number of excerpts per finding.
    pub fn with_max_excerpts(mut self, max: usize) -> Self {
        self.max_excerpts = max;
        self
    }
}

/// Checks drafts against style profiles.
pub struct ArticleValidator {
    options: ValidatorOptions,
    patterns: Patterns,
}

impl Default for ArticleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleValidator {
    /// Create a validator with default options.
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::default())
    }

    /// Create a validator with the given options.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            options,
            patterns: Patterns::new(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Check `draft` against `profile`.
    ///
    /// Findings appear in rule order (see [`RuleId::ALL`]); the same inputs
    /// always produce the same report.
    pub fn validate(&self, draft: &ArticleDraft, profile: &StyleProfile) -> ValidationReport {
        let ctx = CheckContext::new(draft, profile, &self.options, &self.patterns);
        let mut report = ValidationReport::new(
            profile.publication.clone(),
            draft.headline.clone(),
            draft.word_count,
        );

        for mut finding in checks::run_all(&ctx) {
            if self.options.disabled_rules.contains(&finding.rule) {
                debug!(rule = %finding.rule, "dropping finding for disabled rule");
                continue;
            }
            if let Some(severity) = self.options.severity_overrides.get(&finding.rule) {
                finding.severity = *severity;
            }
            report.push(finding);
        }

        info!(
            publication = %profile.publication,
            words = draft.word_count,
            summary = %report.summary(),
            "validated draft"
        );
        report
    }
}

/// Check `draft` against `profile` with default options.
///
/// # Examples
///
/// ```
/// use bylint::draft::ArticleDraft;
/// use bylint::profile::{CountRange, StyleProfile};
/// use bylint::validation::{validate, RuleId};
///
/// let profile = StyleProfile::new("Forbes", CountRange::new(800, 900).unwrap());
/// let draft = ArticleDraft::new("Short", "Too few words.");
/// let report = validate(&draft, &profile);
/// assert!(report.has(RuleId::WordCount));
/// ```
pub fn validate(draft: &ArticleDraft, profile: &StyleProfile) -> ValidationReport {
    ArticleValidator::new().validate(draft, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{load_profile, CountRange, ForbiddenPattern, StructuralElement};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn profile_800_900() -> StyleProfile {
        StyleProfile::new("Forbes", CountRange::new(800, 900).unwrap())
    }

    #[test]
    fn test_word_count_below_minimum_message() {
        let draft = ArticleDraft::new("Headline", words(650));
        let report = validate(&draft, &profile_800_900());

        let findings = report.by_rule(RuleId::WordCount);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].to_string(),
            "word-count: below minimum (650 < 800)"
        );
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_word_count_finding_iff_outside_range() {
        let profile = profile_800_900();
        for n in [0, 1, 799, 800, 850, 900, 901, 2000] {
            let draft = ArticleDraft::new("Headline", words(n));
            let report = validate(&draft, &profile);
            let outside = !(800..=900).contains(&n);
            assert_eq!(report.has(RuleId::WordCount), outside, "n = {n}");
        }
    }

    #[test]
    fn test_key_takeaways_required() {
        let mut profile = profile_800_900();
        profile.required.push(StructuralElement::KeyTakeaways);

        let without = ArticleDraft::new("Headline", words(850));
        let report = validate(&without, &profile);
        let missing = report.by_rule(RuleId::RequiredElement);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].message, "missing Key Takeaways box");

        let with = ArticleDraft::new(
            "Headline",
            format!("Key Takeaways:\n- one\n- two\n\n{}", words(850)),
        );
        assert!(!validate(&with, &profile).has(RuleId::RequiredElement));
    }

    #[test]
    fn test_forbidden_key_takeaways() {
        let mut profile = profile_800_900();
        profile
            .forbidden
            .push(ForbiddenPattern::Element(StructuralElement::KeyTakeaways));

        let draft = ArticleDraft::new(
            "Headline",
            format!("## Key Takeaways\n- one\n- two\n\n{}", words(850)),
        );
        let report = validate(&draft, &profile);
        assert!(report.has(RuleId::ForbiddenElement));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let profile = load_profile(
            "# Forbes\n\n| Word count | 800-900 |\n\n## What to Avoid\n- Em dashes\n- \"delve\"\n",
        )
        .unwrap();
        let draft = ArticleDraft::new("Why we delve", "We delve — deeply — into claims.");
        let validator = ArticleValidator::new();
        assert_eq!(
            validator.validate(&draft, &profile),
            validator.validate(&draft, &profile)
        );
    }

    #[test]
    fn test_disabled_rule_and_override() {
        let profile = profile_800_900();
        let draft = ArticleDraft::new("", words(10));

        let options = ValidatorOptions::new()
            .with_disabled_rule(RuleId::MissingHeadline)
            .with_severity(RuleId::WordCount, Severity::Warning);
        let validator = ArticleValidator::with_options(options);
        assert!(validator
            .options()
            .disabled_rules
            .contains(&RuleId::MissingHeadline));
        let report = validator.validate(&draft, &profile);

        assert!(!report.has(RuleId::MissingHeadline));
        assert_eq!(report.by_rule(RuleId::WordCount)[0].severity, Severity::Warning);
        assert!(report.passes(Severity::Error));
    }

    #[test]
    fn test_brand_banned_phrases_are_merged() {
        let mut profile = profile_800_900();
        profile
            .forbidden
            .push(ForbiddenPattern::BannedPhrases(vec!["synergy".into()]));
        let draft = ArticleDraft::new("Headline", "Synergy and a robust plan. More synergy.");

        let options = ValidatorOptions::new().with_banned_phrases(["robust", "SYNERGY"]);
        let report = ArticleValidator::with_options(options).validate(&draft, &profile);

        let messages: Vec<&str> = report
            .by_rule(RuleId::BannedPhrase)
            .iter()
            .map(|f| f.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["\"synergy\" used 2 times", "\"robust\" used 1 time"]
        );
    }

    #[test]
    fn test_serial_comma_and_em_dash() {
        let mut profile = profile_800_900();
        profile.forbidden.push(ForbiddenPattern::SerialComma);
        profile.forbidden.push(ForbiddenPattern::EmDash);
        let draft = ArticleDraft::new(
            "Headline",
            "We insure rings, watches, and necklaces — nothing else — for now.",
        );
        let report = validate(&draft, &profile);

        let serial = report.by_rule(RuleId::SerialComma);
        assert_eq!(serial[0].message, "1 serial comma");
        assert!(serial[0].excerpts[0].contains("watches, and necklaces"));
        assert_eq!(report.by_rule(RuleId::EmDash)[0].message, "2 em dashes");
    }

    #[test]
    fn test_banned_openers_with_curly_quotes() {
        let mut profile = profile_800_900();
        profile
            .forbidden
            .push(ForbiddenPattern::BannedOpeners(vec!["In today's".into()]));
        let draft = ArticleDraft::new(
            "Headline",
            "In today’s market, trust wins.\n\nWe learned that early.\n\nin today's world too.",
        );
        let report = validate(&draft, &profile);
        let findings = report.by_rule(RuleId::BannedOpener);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "2 paragraphs open with \"In today's\""
        );
    }

    #[test]
    fn test_competitor_links() {
        let mut profile = profile_800_900();
        profile.forbidden.push(ForbiddenPattern::CompetitorLinks(vec![
            "Forbes".into(),
            "Fast Company".into(),
            "Inc".into(),
        ]));
        let draft = ArticleDraft::new(
            "Headline",
            "See [this study](https://www.fastcompany.com/9000) and \
             https://www.inc.com/x plus [our data](https://brite.co/report) \
             from princeton.edu.",
        );
        let report = validate(&draft, &profile);
        let messages: Vec<&str> = report
            .by_rule(RuleId::CompetitorLink)
            .iter()
            .map(|f| f.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "links to competitor Fast Company: https://www.fastcompany.com/9000",
                "links to competitor Inc: https://www.inc.com/x",
            ]
        );
    }

    #[test]
    fn test_all_caps_subheadings() {
        let mut profile = profile_800_900();
        profile.required.push(StructuralElement::AllCapsSubheadings);

        let good = ArticleDraft::new("H", "## START WITH TRUST\n\nText.\n\n## KEEP IT\n\nMore.");
        assert!(!validate(&good, &profile).has(RuleId::AllCapsSubheadings));

        let bad = ArticleDraft::new("H", "## Start with trust\n\nText.\n\n## KEEP IT\n\nMore.");
        let report = validate(&bad, &profile);
        let finding = &report.by_rule(RuleId::AllCapsSubheadings)[0];
        assert_eq!(finding.message, "1 subheading is not in ALL CAPS");
        assert_eq!(finding.excerpts, vec!["line 1: Start with trust"]);

        let none = ArticleDraft::new("H", "Just prose.");
        assert!(validate(&none, &profile).has(RuleId::AllCapsSubheadings));
    }

    #[test]
    fn test_recurring_themes() {
        let mut profile = profile_800_900();
        profile.recurring_themes = vec!["customer trust".into(), "insurtech".into()];

        let on_theme = ArticleDraft::new("H", "Insurtech is changing claims.");
        assert!(!validate(&on_theme, &profile).has(RuleId::RecurringTheme));

        let off_theme = ArticleDraft::new("H", "Cooking is fun.");
        let report = validate(&off_theme, &profile);
        assert_eq!(report.by_rule(RuleId::RecurringTheme)[0].severity, Severity::Info);
    }

    #[test]
    fn test_topic_repetition() {
        let profile = profile_800_900()
            .with_archived_topics(["Hiring for grit over pedigree", "Remote work rituals"]);

        let repeat = ArticleDraft::new("Hiring for Grit Over Pedigree, Revisited", words(850));
        let report = validate(&repeat, &profile);
        let findings = report.by_rule(RuleId::TopicRepetition);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("Hiring for grit over pedigree"));

        let fresh = ArticleDraft::new("Pricing jewelry insurance honestly", words(850));
        assert!(!validate(&fresh, &profile).has(RuleId::TopicRepetition));
    }

    #[test]
    fn test_passive_voice_only_when_forbidden() {
        let draft = ArticleDraft::new("H", "The policy was written in a day.");
        assert!(!validate(&draft, &profile_800_900()).has(RuleId::PassiveVoice));

        let mut profile = profile_800_900();
        profile.forbidden.push(ForbiddenPattern::PassiveVoice);
        assert!(validate(&draft, &profile).has(RuleId::PassiveVoice));
    }

    #[test]
    fn test_empty_draft_never_panics() {
        let profile = load_profile(
            "# Forbes\n\n| Word count | 800-900 |\n| Character count | 4500-5500 |\n\n\
             ## Required\n- Key Takeaways\n- Numbered list\n- ALL-CAPS subheadings\n\n\
             ## What to Avoid\n- Serial comma\n- Passive voice\n- Em dashes\n\n\
             ## Recurring Themes\n- trust\n",
        )
        .unwrap();
        let report = validate(&ArticleDraft::new("", ""), &profile);

        assert!(report.has(RuleId::EmptyDraft));
        assert!(report.has(RuleId::MissingHeadline));
        assert!(report.has(RuleId::WordCount));
        assert!(report.has(RuleId::CharacterCount));
        assert_eq!(report.by_rule(RuleId::RequiredElement).len(), 2);
        assert!(report.has(RuleId::AllCapsSubheadings));
        assert!(!report.has(RuleId::RecurringTheme));
    }
}
