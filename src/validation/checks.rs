//! Individual rule checks.
//!
//! Each check is a pure function of the draft, the profile and the
//! validator options. A check that does not apply returns no findings.

use regex::Regex;
use std::collections::BTreeSet;
use tracing::warn;

use super::report::{Finding, RuleId};
use super::ValidatorOptions;
use crate::draft::ArticleDraft;
use crate::profile::{ForbiddenPattern, StructuralElement, StyleProfile};

/// Words ignored when comparing headlines with archived topics.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "with", "why", "how", "what",
    "who", "when", "where", "this", "that", "from", "into", "our", "its", "it's", "can", "will",
    "about", "than", "then", "them", "they", "their", "was", "were", "has", "have", "had", "is",
    "of", "to", "in", "on", "a", "an", "as", "at", "by", "or", "be", "do", "does", "every",
    "more", "most", "need", "needs",
];

/// Compiled patterns for the prose checks.
pub(crate) struct Patterns {
    serial_comma: Regex,
    passive_voice: Regex,
}

impl Patterns {
    pub(crate) fn new() -> Self {
        let item = r"[\w'-]+(?:[ \t]+[\w'-]+){0,3}";
        Self {
            serial_comma: Regex::new(&format!(
                r"(?i)\b{item},[ \t]+{item},[ \t]+(?:and|or)[ \t]+[\w'-]+"
            ))
            .unwrap(),
            passive_voice: Regex::new(
                r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+(?:\w+ly\s+)?(?:\w+ed|known|given|taken|made|done|seen|written|built|shown|paid|held|told|found|brought|kept|left|lost|sold|sent|chosen|driven|grown|thrown|hidden|broken|spoken|forgotten|understood)\b",
            )
            .unwrap(),
        }
    }
}

/// Inputs shared by every check.
pub(crate) struct CheckContext<'a> {
    pub draft: &'a ArticleDraft,
    pub profile: &'a StyleProfile,
    pub options: &'a ValidatorOptions,
    pub patterns: &'a Patterns,
    /// Headline and body with typographic quotes folded to ASCII
    pub text: String,
}

impl<'a> CheckContext<'a> {
    pub(crate) fn new(
        draft: &'a ArticleDraft,
        profile: &'a StyleProfile,
        options: &'a ValidatorOptions,
        patterns: &'a Patterns,
    ) -> Self {
        let text = fold_quotes(&format!("{}\n{}", draft.headline, draft.body));
        Self {
            draft,
            profile,
            options,
            patterns,
            text,
        }
    }

    fn excerpts(&self, matches: impl Iterator<Item = (usize, usize)>) -> Vec<String> {
        matches
            .take(self.options.max_excerpts)
            .map(|(start, end)| snippet(&self.text, start, end))
            .collect()
    }
}

/// Run every check in rule order.
pub(crate) fn run_all(ctx: &CheckContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(empty_draft(ctx));
    findings.extend(missing_headline(ctx));
    findings.extend(word_count(ctx));
    findings.extend(character_count(ctx));
    findings.extend(required_elements(ctx));
    findings.extend(forbidden_elements(ctx));
    findings.extend(all_caps_subheadings(ctx));
    findings.extend(serial_comma(ctx));
    findings.extend(passive_voice(ctx));
    findings.extend(banned_phrases(ctx));
    findings.extend(em_dashes(ctx));
    findings.extend(banned_openers(ctx));
    findings.extend(competitor_links(ctx));
    findings.extend(recurring_themes(ctx));
    findings.extend(topic_repetition(ctx));
    findings
}

fn empty_draft(ctx: &CheckContext<'_>) -> Option<Finding> {
    (ctx.draft.word_count == 0).then(|| Finding::new(RuleId::EmptyDraft, "draft body has no words"))
}

fn missing_headline(ctx: &CheckContext<'_>) -> Option<Finding> {
    ctx.draft
        .headline
        .trim()
        .is_empty()
        .then(|| Finding::new(RuleId::MissingHeadline, "draft has no headline"))
}

fn word_count(ctx: &CheckContext<'_>) -> Option<Finding> {
    let range = ctx.profile.word_count;
    let count = ctx.draft.word_count;
    range_message(count, range.min, range.max).map(|msg| Finding::new(RuleId::WordCount, msg))
}

fn character_count(ctx: &CheckContext<'_>) -> Option<Finding> {
    let range = ctx.profile.character_count?;
    let count = ctx.draft.character_count;
    range_message(count, range.min, range.max)
        .map(|msg| Finding::new(RuleId::CharacterCount, msg))
}

fn range_message(count: usize, min: usize, max: usize) -> Option<String> {
    if count < min {
        Some(format!("below minimum ({count} < {min})"))
    } else if count > max {
        Some(format!("above maximum ({count} > {max})"))
    } else {
        None
    }
}

/// Whether the draft contains `element`.
fn element_present(draft: &ArticleDraft, element: &StructuralElement) -> bool {
    let markers = &draft.markers;
    match element {
        StructuralElement::KeyTakeaways => markers.key_takeaways,
        StructuralElement::NumberedList => markers.numbered_items >= 2,
        StructuralElement::BulletList => markers.bullet_items >= 2,
        StructuralElement::Subheadings => markers.subheadings().next().is_some(),
        StructuralElement::AllCapsSubheadings => {
            let mut subheadings = markers.subheadings().peekable();
            subheadings.peek().is_some() && subheadings.all(|h| h.all_caps)
        }
        StructuralElement::Section(name) => {
            let wanted = name.trim().to_lowercase();
            markers.headings.iter().any(|h| {
                let text = h.text.trim().trim_end_matches(':').to_lowercase();
                text == wanted || text.contains(&wanted)
            })
        }
    }
}

fn required_elements(ctx: &CheckContext<'_>) -> Vec<Finding> {
    ctx.profile
        .required
        .iter()
        .filter(|e| **e != StructuralElement::AllCapsSubheadings)
        .filter(|e| !element_present(ctx.draft, e))
        .map(|e| Finding::new(RuleId::RequiredElement, format!("missing {e}")))
        .collect()
}

fn forbidden_elements(ctx: &CheckContext<'_>) -> Vec<Finding> {
    ctx.profile
        .forbidden
        .iter()
        .filter_map(|p| match p {
            ForbiddenPattern::Element(e) => Some(e),
            _ => None,
        })
        .filter(|e| element_present(ctx.draft, e))
        .map(|e| {
            Finding::new(
                RuleId::ForbiddenElement,
                format!("contains a {e}, which {} does not accept", ctx.profile.publication),
            )
        })
        .collect()
}

fn all_caps_subheadings(ctx: &CheckContext<'_>) -> Option<Finding> {
    if !ctx.profile.requires(&StructuralElement::AllCapsSubheadings) {
        return None;
    }
    let subheadings: Vec<_> = ctx.draft.markers.subheadings().collect();
    if subheadings.is_empty() {
        return Some(Finding::new(
            RuleId::AllCapsSubheadings,
            "no subheadings found; ALL-CAPS subheadings are required",
        ));
    }
    let offenders: Vec<String> = subheadings
        .iter()
        .filter(|h| !h.all_caps)
        .map(|h| format!("line {}: {}", h.line, h.text))
        .collect();
    if offenders.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            RuleId::AllCapsSubheadings,
            format!(
                "{} not in ALL CAPS",
                plural(offenders.len(), "subheading is", "subheadings are")
            ),
        )
        .with_excerpts(offenders.into_iter().take(ctx.options.max_excerpts).collect()),
    )
}

fn serial_comma(ctx: &CheckContext<'_>) -> Option<Finding> {
    if !ctx.profile.forbids(&ForbiddenPattern::SerialComma) {
        return None;
    }
    regex_finding(
        ctx,
        &ctx.patterns.serial_comma,
        RuleId::SerialComma,
        ("serial comma", "serial commas"),
    )
}

fn passive_voice(ctx: &CheckContext<'_>) -> Option<Finding> {
    if !ctx.profile.forbids(&ForbiddenPattern::PassiveVoice) {
        return None;
    }
    regex_finding(
        ctx,
        &ctx.patterns.passive_voice,
        RuleId::PassiveVoice,
        ("passive construction", "passive constructions"),
    )
}

fn regex_finding(
    ctx: &CheckContext<'_>,
    re: &Regex,
    rule: RuleId,
    noun: (&str, &str),
) -> Option<Finding> {
    let count = re.find_iter(&ctx.text).count();
    if count == 0 {
        return None;
    }
    let excerpts = ctx.excerpts(re.find_iter(&ctx.text).map(|m| (m.start(), m.end())));
    Some(Finding::new(rule, plural(count, noun.0, noun.1)).with_excerpts(excerpts))
}

/// Profile phrases followed by brand-wide phrases, deduplicated case-insensitively.
fn all_banned_phrases<'a>(ctx: &'a CheckContext<'_>) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    ctx.profile
        .banned_phrases()
        .into_iter()
        .chain(ctx.options.extra_banned_phrases.iter().map(String::as_str))
        .filter(|p| !p.trim().is_empty())
        .filter(|p| seen.insert(fold_quotes(p).to_lowercase()))
        .collect()
}

fn phrase_regex(phrase: &str) -> Option<Regex> {
    let phrase = fold_quotes(phrase.trim());
    let starts_word = phrase.chars().next().is_some_and(is_word_char);
    let ends_word = phrase.chars().last().is_some_and(is_word_char);
    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(&phrase),
        if ends_word { r"\b" } else { "" },
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(phrase = %phrase, error = %e, "skipping unusable banned phrase");
            None
        }
    }
}

fn banned_phrases(ctx: &CheckContext<'_>) -> Vec<Finding> {
    all_banned_phrases(ctx)
        .into_iter()
        .filter_map(|phrase| {
            let re = phrase_regex(phrase)?;
            let count = re.find_iter(&ctx.text).count();
            if count == 0 {
                return None;
            }
            let excerpts = ctx.excerpts(re.find_iter(&ctx.text).map(|m| (m.start(), m.end())));
            Some(
                Finding::new(
                    RuleId::BannedPhrase,
                    format!("\"{}\" used {}", phrase, plural(count, "time", "times")),
                )
                .with_excerpts(excerpts),
            )
        })
        .collect()
}

fn em_dashes(ctx: &CheckContext<'_>) -> Option<Finding> {
    if !ctx.profile.forbids(&ForbiddenPattern::EmDash) {
        return None;
    }
    let positions: Vec<(usize, usize)> = ctx
        .text
        .match_indices('—')
        .map(|(i, s)| (i, i + s.len()))
        .collect();
    if positions.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            RuleId::EmDash,
            plural(positions.len(), "em dash", "em dashes"),
        )
        .with_excerpts(ctx.excerpts(positions.into_iter())),
    )
}

fn banned_openers(ctx: &CheckContext<'_>) -> Vec<Finding> {
    let paragraphs: Vec<String> = ctx
        .draft
        .markers
        .paragraphs
        .iter()
        .map(|p| fold_quotes(p.trim()))
        .collect();

    ctx.profile
        .banned_openers()
        .into_iter()
        .filter_map(|opener| {
            let wanted = fold_quotes(opener.trim()).to_lowercase();
            if wanted.is_empty() {
                return None;
            }
            let hits: Vec<&String> = paragraphs
                .iter()
                .filter(|p| p.to_lowercase().starts_with(&wanted))
                .collect();
            if hits.is_empty() {
                return None;
            }
            let excerpts = hits
                .iter()
                .take(ctx.options.max_excerpts)
                .map(|p| truncate_chars(p, 60))
                .collect();
            Some(
                Finding::new(
                    RuleId::BannedOpener,
                    format!(
                        "{} with \"{}\"",
                        plural(hits.len(), "paragraph opens", "paragraphs open"),
                        opener
                    ),
                )
                .with_excerpts(excerpts),
            )
        })
        .collect()
}

/// Host part of a URL, lowercased, without scheme, port or path.
fn link_host(target: &str) -> String {
    let without_scheme = target.split_once("://").map_or(target, |(_, rest)| rest);
    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .split(':')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

fn compact(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn competitor_links(ctx: &CheckContext<'_>) -> Vec<Finding> {
    let competitors: Vec<(&str, String)> = ctx
        .profile
        .competitors()
        .into_iter()
        .map(|c| (c, compact(c)))
        .filter(|(_, key)| !key.is_empty())
        .collect();
    if competitors.is_empty() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for link in &ctx.draft.markers.links {
        let host = link_host(&link.target);
        let labels: Vec<String> = host.split('.').map(compact).collect();
        if let Some((name, _)) = competitors
            .iter()
            .find(|(_, key)| labels.iter().any(|label| label == key))
        {
            findings.push(
                Finding::new(
                    RuleId::CompetitorLink,
                    format!("links to competitor {name}: {}", link.target),
                )
                .with_excerpts(vec![link.text.clone()]),
            );
        }
    }
    findings
}

fn recurring_themes(ctx: &CheckContext<'_>) -> Option<Finding> {
    let themes = &ctx.profile.recurring_themes;
    if themes.is_empty() || ctx.draft.word_count == 0 {
        return None;
    }
    let text = ctx.text.to_lowercase();
    let mentioned = themes
        .iter()
        .any(|theme| text.contains(&fold_quotes(theme).to_lowercase()));
    (!mentioned).then(|| {
        Finding::new(
            RuleId::RecurringTheme,
            format!("none of the recurring themes appear ({})", themes.join(", ")),
        )
    })
}

/// Lowercased content words of a headline or topic.
fn content_words(text: &str) -> BTreeSet<String> {
    fold_quotes(text)
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of two word sets.
fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn topic_repetition(ctx: &CheckContext<'_>) -> Vec<Finding> {
    let headline = content_words(&ctx.draft.headline);
    if headline.is_empty() {
        return Vec::new();
    }
    ctx.profile
        .topic_archive
        .iter()
        .filter_map(|topic| {
            let score = overlap(&headline, &content_words(topic));
            (score >= ctx.options.repetition_threshold).then(|| {
                Finding::new(
                    RuleId::TopicRepetition,
                    format!(
                        "headline repeats archived topic \"{}\" ({:.0}% overlap)",
                        topic,
                        score * 100.0
                    ),
                )
            })
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace typographic quotes with their ASCII forms.
pub(crate) fn fold_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Up to 30 characters of context on each side of `start..end`, on one line.
fn snippet(text: &str, start: usize, end: usize) -> String {
    const CONTEXT: usize = 30;
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT)
        .map_or(text.len(), |(i, _)| end + i);

    let mut out = String::new();
    if from > 0 {
        out.push_str("...");
    }
    out.push_str(text[from..to].split_whitespace().collect::<Vec<_>>().join(" ").as_str());
    if to < text.len() {
        out.push_str("...");
    }
    out
}
