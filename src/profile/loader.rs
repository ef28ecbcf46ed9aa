//! Parsing of Markdown style guides into [`StyleProfile`]s.
//!
//! A guide is expected to carry a specification table (at least a word count
//! row) and one or more rule sections introduced by headings such as
//! "Required" or "What to Avoid". Everything else in the document is prose
//! for human readers and is ignored.

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::{CountRange, ForbiddenPattern, StructuralElement, StyleProfile};

/// Errors raised when a style guide lacks the structure the loader needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The guide contains no text at all.
    #[error("style guide is empty")]
    EmptyGuide,

    /// No Markdown table was found.
    #[error("style guide has no specification table")]
    MissingTable,

    /// A table exists but none of its rows states a word count.
    #[error("specification table has no word count row")]
    MissingWordCount,

    /// A count row could not be read as a range, or its bounds are inverted.
    #[error("invalid {field} range: {value:?}")]
    InvalidRange {
        /// Row label, e.g. "word count"
        field: String,
        /// Raw cell text
        value: String,
    },

    /// Neither a "Required" nor a "What to Avoid" heading was found.
    #[error("style guide has no \"Required\" or \"What to Avoid\" section")]
    MissingRuleSections,

    /// No title heading or publication row names the publication.
    #[error("style guide does not name its publication")]
    MissingPublication,

    /// A JSON style guide could not be deserialized.
    #[error("invalid JSON style guide: {0}")]
    InvalidJson(String),
}

/// Section of the guide the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Required,
    Avoid,
    Themes,
    Tone,
    Archive,
}

impl Section {
    fn from_heading(heading: &str) -> Self {
        let lower = heading.to_lowercase();
        // "Topics to Avoid" is an archive, not a rule list
        if lower.contains("topic archive")
            || lower.contains("past topics")
            || lower.contains("previous topics")
            || lower.contains("published topics")
            || lower.contains("topics to avoid")
        {
            Section::Archive
        } else if lower.contains("avoid")
            || lower.contains("forbidden")
            || lower.contains("don't")
            || lower.contains("do not")
            || lower.contains("never")
        {
            Section::Avoid
        } else if lower.contains("required")
            || lower.contains("requirement")
            || lower.contains("must include")
            || lower.contains("must have")
        {
            Section::Required
        } else if lower.contains("theme") {
            Section::Themes
        } else if lower.contains("tone") || lower.contains("voice") {
            Section::Tone
        } else {
            Section::Other
        }
    }

    fn is_rule_section(self) -> bool {
        matches!(self, Section::Required | Section::Avoid)
    }
}

/// Outcome of classifying a single "What to Avoid" bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AvoidRule {
    Flag(ForbiddenPattern),
    Phrases(Vec<String>),
    Openers(Vec<String>),
    Competitors(Vec<String>),
    Advisory(String),
}

/// Compiled line patterns shared by one parse.
struct Patterns {
    heading: Regex,
    bold_label: Regex,
    bullet: Regex,
    number: Regex,
    quoted: Regex,
    link_word: Regex,
    link_target: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            heading: Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").unwrap(),
            bold_label: Regex::new(r"^\*\*([^*]+?)\*\*:?\s*$").unwrap(),
            bullet: Regex::new(r"^\s*(?:[-*+•]|\d+[.)])\s+(.+)$").unwrap(),
            number: Regex::new(r"\d{1,3}(?:,\d{3})+|\d+").unwrap(),
            quoted: Regex::new(r#""([^"]+)"|“([^”]+)”"#).unwrap(),
            link_word: Regex::new(r"(?i)\blink(?:s|ing|ed)?\b").unwrap(),
            link_target: Regex::new(r"(?i)\sto\s+").unwrap(),
        }
    }
}

/// Rules accumulated while scanning.
#[derive(Default)]
struct Collected {
    title: Option<String>,
    publication_row: Option<String>,
    saw_table: bool,
    saw_rule_section: bool,
    word_count: Option<CountRange>,
    character_count: Option<CountRange>,
    required: Vec<StructuralElement>,
    flags: Vec<ForbiddenPattern>,
    phrases: Vec<String>,
    openers: Vec<String>,
    competitors: Vec<String>,
    themes: Vec<String>,
    tone: Vec<String>,
    advisories: Vec<String>,
    archive: Vec<String>,
}

/// Parse a style guide into a [`StyleProfile`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the guide is empty, has no specification
/// table with a word count row, has no rule sections, names no publication,
/// or states a count range that cannot be read.
///
/// # Examples
///
/// ```
/// use bylint::profile::load_profile;
///
/// let guide = concat!(
///     "# Forbes Style Guide\n\n",
///     "| Element | Requirement |\n|---|---|\n| Word count | 800-900 words |\n\n",
///     "## What to Avoid\n- Passive voice\n",
/// );
/// let profile = load_profile(guide)?;
/// assert_eq!(profile.publication, "Forbes");
/// assert_eq!(profile.word_count.min, 800);
/// # Ok::<(), bylint::profile::ParseError>(())
/// ```
pub fn load_profile(text: &str) -> Result<StyleProfile, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyGuide);
    }

    let patterns = Patterns::new();
    let mut collected = Collected::default();
    let mut section = Section::Other;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = patterns.heading.captures(line) {
            let level = caps[1].len();
            let heading = clean_inline(&caps[2]);
            if level == 1 && collected.title.is_none() {
                collected.title = Some(heading.clone());
                section = Section::Other;
            } else {
                section = Section::from_heading(&heading);
            }
            collected.saw_rule_section |= section.is_rule_section();
            debug!(heading = %heading, ?section, "style guide heading");
            continue;
        }

        if let Some(caps) = patterns.bold_label.captures(line) {
            section = Section::from_heading(&caps[1]);
            collected.saw_rule_section |= section.is_rule_section();
            continue;
        }

        if line.starts_with('|') {
            collected.saw_table = true;
            read_table_row(line, &patterns, &mut collected)?;
            continue;
        }

        let Some(caps) = patterns.bullet.captures(line) else {
            continue;
        };
        let item = clean_inline(&caps[1]);
        if item.is_empty() {
            continue;
        }

        match section {
            Section::Required => match classify_required(&item) {
                Some(element) => push_unique(&mut collected.required, element),
                None => collected.advisories.push(item),
            },
            Section::Avoid => match classify_avoid(&item, &patterns) {
                AvoidRule::Flag(flag) => push_unique(&mut collected.flags, flag),
                AvoidRule::Phrases(list) => extend_unique(&mut collected.phrases, list),
                AvoidRule::Openers(list) => extend_unique(&mut collected.openers, list),
                AvoidRule::Competitors(list) => extend_unique(&mut collected.competitors, list),
                AvoidRule::Advisory(text) => {
                    debug!(rule = %text, "avoid rule kept as advisory");
                    collected.advisories.push(text);
                }
            },
            Section::Themes => extend_unique(&mut collected.themes, split_list(&item)),
            Section::Tone => extend_unique(&mut collected.tone, split_list(&item)),
            Section::Archive => push_unique(&mut collected.archive, strip_quotes(&item)),
            Section::Other => {}
        }
    }

    build_profile(collected)
}

fn build_profile(collected: Collected) -> Result<StyleProfile, ParseError> {
    if !collected.saw_table {
        return Err(ParseError::MissingTable);
    }
    let word_count = collected.word_count.ok_or(ParseError::MissingWordCount)?;
    if !collected.saw_rule_section {
        return Err(ParseError::MissingRuleSections);
    }
    let publication = collected
        .publication_row
        .or_else(|| collected.title.as_deref().map(publication_from_title))
        .filter(|name| !name.is_empty())
        .ok_or(ParseError::MissingPublication)?;

    let mut forbidden = collected.flags;
    if !collected.phrases.is_empty() {
        forbidden.push(ForbiddenPattern::BannedPhrases(collected.phrases));
    }
    if !collected.openers.is_empty() {
        forbidden.push(ForbiddenPattern::BannedOpeners(collected.openers));
    }
    if !collected.competitors.is_empty() {
        forbidden.push(ForbiddenPattern::CompetitorLinks(collected.competitors));
    }

    for element in &collected.required {
        let clash = forbidden
            .iter()
            .any(|p| matches!(p, ForbiddenPattern::Element(e) if e == element));
        if clash {
            warn!(%element, "element is both required and forbidden");
        }
    }

    let mut profile = StyleProfile::new(publication, word_count);
    profile.character_count = collected.character_count;
    profile.required = collected.required;
    profile.forbidden = forbidden;
    profile.recurring_themes = collected.themes;
    profile.tone = collected.tone;
    profile.advisories = collected.advisories;
    profile.topic_archive = collected.archive;

    debug!(
        publication = %profile.publication,
        word_count = %profile.word_count,
        required = profile.required.len(),
        forbidden = profile.forbidden.len(),
        "loaded style profile"
    );
    Ok(profile)
}

/// Read one `| label | value |` row, recording counts and the publication.
fn read_table_row(
    line: &str,
    patterns: &Patterns,
    collected: &mut Collected,
) -> Result<(), ParseError> {
    let cells: Vec<String> = line
        .trim_matches('|')
        .split('|')
        .map(clean_inline)
        .collect();
    if cells.len() < 2 || cells.iter().all(|c| is_separator_cell(c)) {
        return Ok(());
    }

    let label = cells[0].to_lowercase();
    let value = &cells[1];

    if label.contains("word") && (label.contains("count") || label.contains("length")) {
        let range = parse_range(value, patterns).ok_or_else(|| ParseError::InvalidRange {
            field: "word count".to_string(),
            value: value.clone(),
        })?;
        collected.word_count = Some(range);
    } else if label.contains("character") || label.contains("char count") {
        let range = parse_range(value, patterns).ok_or_else(|| ParseError::InvalidRange {
            field: "character count".to_string(),
            value: value.clone(),
        })?;
        collected.character_count = Some(range);
    } else if label == "publication" || label == "outlet" {
        collected.publication_row = Some(value.clone());
    } else if label == "tone" {
        extend_unique(&mut collected.tone, split_list(value));
    }
    Ok(())
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
}

/// Read a count range such as "800-900 words", "4,500 to 5,500" or "up to 750".
fn parse_range(value: &str, patterns: &Patterns) -> Option<CountRange> {
    let numbers: Vec<usize> = patterns
        .number
        .find_iter(value)
        .filter_map(|m| m.as_str().replace(',', "").parse().ok())
        .collect();
    let lower = value.to_lowercase();

    match numbers.as_slice() {
        [] => None,
        [n] => {
            if ["up to", "max", "no more than", "under", "fewer than", "less than"]
                .iter()
                .any(|k| lower.contains(k))
            {
                Some(CountRange::at_most(*n))
            } else if ["at least", "min", "more than", "over"]
                .iter()
                .any(|k| lower.contains(k))
            {
                Some(CountRange::at_least(*n))
            } else {
                CountRange::new(*n, *n)
            }
        }
        [min, max, ..] => CountRange::new(*min, *max),
    }
}

fn classify_required(item: &str) -> Option<StructuralElement> {
    let lower = item.to_lowercase();
    if lower.contains("key takeaway") {
        Some(StructuralElement::KeyTakeaways)
    } else if lower.contains("numbered") {
        Some(StructuralElement::NumberedList)
    } else if lower.contains("all caps")
        || lower.contains("all-caps")
        || lower.contains("uppercase")
        || lower.contains("all capital")
    {
        Some(StructuralElement::AllCapsSubheadings)
    } else if lower.contains("bullet") {
        Some(StructuralElement::BulletList)
    } else if lower.contains("subhead") {
        Some(StructuralElement::Subheadings)
    } else if item.split_whitespace().count() <= 6 {
        let name = strip_quotes(item.trim_end_matches(['.', ':']));
        let name = name
            .strip_suffix(" section")
            .or_else(|| name.strip_suffix(" Section"))
            .unwrap_or(&name)
            .trim()
            .to_string();
        Some(StructuralElement::Section(name))
    } else {
        None
    }
}

fn classify_avoid(item: &str, patterns: &Patterns) -> AvoidRule {
    let lower = item.to_lowercase();
    let quoted: Vec<String> = patterns
        .quoted
        .captures_iter(item)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if lower.contains("serial comma") || lower.contains("oxford comma") {
        return AvoidRule::Flag(ForbiddenPattern::SerialComma);
    }
    if lower.contains("passive voice") {
        return AvoidRule::Flag(ForbiddenPattern::PassiveVoice);
    }
    if lower.contains("em dash") || lower.contains("em-dash") || lower.contains("emdash") {
        return AvoidRule::Flag(ForbiddenPattern::EmDash);
    }
    if lower.contains("key takeaway") {
        return AvoidRule::Flag(ForbiddenPattern::Element(StructuralElement::KeyTakeaways));
    }
    if patterns.link_word.is_match(item) {
        let names = competitor_names(item, patterns);
        return if names.is_empty() {
            AvoidRule::Advisory(item.to_string())
        } else {
            AvoidRule::Competitors(names)
        };
    }
    if !quoted.is_empty()
        && ["start", "open", "begin"]
            .iter()
            .any(|k| lower.contains(k))
    {
        let openers = quoted
            .iter()
            .map(|q| q.trim_end_matches("...").trim_end_matches('…').trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        return AvoidRule::Openers(openers);
    }
    if !quoted.is_empty() {
        return AvoidRule::Phrases(quoted);
    }
    if let Some((label, rest)) = item.split_once(':') {
        let label = label.to_lowercase();
        if ["word", "phrase", "term", "banned"]
            .iter()
            .any(|k| label.contains(k))
        {
            let list = split_list(rest);
            if !list.is_empty() {
                return AvoidRule::Phrases(list);
            }
        }
    }
    if !item.contains(':') && item.split_whitespace().count() <= 3 {
        let phrase = strip_quotes(item.trim_end_matches(['.', '!', ';']));
        if !phrase.is_empty() {
            return AvoidRule::Phrases(vec![phrase]);
        }
    }
    AvoidRule::Advisory(item.to_string())
}

/// Names after "link to" or after a colon: "Links to Forbes, Fast Company, or Inc."
fn competitor_names(item: &str, patterns: &Patterns) -> Vec<String> {
    let start = patterns
        .link_target
        .find(item)
        .map(|m| m.end())
        .or_else(|| item.find(':').map(|i| i + 1));
    let Some(start) = start else {
        return Vec::new();
    };

    let mut tail = &item[start..];
    if let Some(paren) = tail.find('(') {
        tail = &tail[..paren];
    }
    tail.split(',')
        .flat_map(|part| part.split(" or "))
        .flat_map(|part| part.split(" and "))
        .map(|part| {
            let part = part.trim();
            let part = part
                .strip_prefix("or ")
                .or_else(|| part.strip_prefix("and "))
                .unwrap_or(part);
            part.trim().trim_end_matches('.').trim().to_string()
        })
        .filter(|part| !part.is_empty())
        .collect()
}

fn publication_from_title(title: &str) -> String {
    let mut name = title.trim();
    for suffix in ["style guide", "editorial guide", "writing guide", "guide"] {
        let stripped = name
            .len()
            .checked_sub(suffix.len())
            .filter(|&cut| name.is_char_boundary(cut))
            .filter(|&cut| name[cut..].eq_ignore_ascii_case(suffix));
        if let Some(cut) = stripped {
            name = &name[..cut];
            break;
        }
    }
    name.trim()
        .trim_end_matches([':', '-', '–', '—'])
        .trim()
        .to_string()
}

/// Strip emphasis and code markers from inline Markdown.
fn clean_inline(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

fn strip_quotes(text: &str) -> String {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '“' | '”'))
        .trim()
        .to_string()
}

fn split_list(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(strip_quotes)
        .map(|s| s.trim_end_matches('.').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

fn extend_unique(list: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !list.iter().any(|existing| existing.eq_ignore_ascii_case(&item)) {
            list.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORBES_GUIDE: &str = r#"# Forbes Business Council Style Guide

Articles run under the CEO's byline and read like a founder talking to peers.

## Specifications

| Element | Requirement |
|---------|-------------|
| Word count | 800-900 words |
| Character count | 4,500-5,500 characters |
| Headline | Under 70 characters |

## Required

- **Key Takeaways** box at the top
- Numbered list for the main argument
- ALL-CAPS subheadings

## What to Avoid

- Passive voice
- Em dashes
- Banned words: leverage, synergy, utilize
- "delve", "tapestry"
- Starting paragraphs with "In today's..." or "In an era of..."
- Jargon
- Overly promotional mentions of the company

## Recurring Themes

- customer trust
- insurtech, transparency

## Tone

- Conversational, confident
"#;

    #[test]
    fn test_load_forbes_guide() {
        let profile = load_profile(FORBES_GUIDE).unwrap();

        assert_eq!(profile.publication, "Forbes Business Council");
        assert_eq!(profile.word_count, CountRange::new(800, 900).unwrap());
        assert_eq!(
            profile.character_count,
            Some(CountRange::new(4500, 5500).unwrap())
        );
        assert_eq!(
            profile.required,
            vec![
                StructuralElement::KeyTakeaways,
                StructuralElement::NumberedList,
                StructuralElement::AllCapsSubheadings,
            ]
        );
        assert!(profile.forbids(&ForbiddenPattern::PassiveVoice));
        assert!(profile.forbids(&ForbiddenPattern::EmDash));
        assert!(!profile.forbids(&ForbiddenPattern::SerialComma));
        assert_eq!(
            profile.banned_phrases(),
            vec!["leverage", "synergy", "utilize", "delve", "tapestry", "Jargon"]
        );
        assert_eq!(profile.banned_openers(), vec!["In today's", "In an era of"]);
        assert_eq!(
            profile.advisories,
            vec!["Overly promotional mentions of the company".to_string()]
        );
        assert_eq!(
            profile.recurring_themes,
            vec!["customer trust", "insurtech", "transparency"]
        );
        assert_eq!(profile.tone, vec!["Conversational", "confident"]);
    }

    #[test]
    fn test_load_entrepreneur_overrides() {
        let guide = r#"# Entrepreneur Style Guide

| Element | Requirement |
|---|---|
| Publication | Entrepreneur Leadership Network |
| Word count | 1,000 to 1,200 |

## What to Avoid

- The serial comma ("apples, oranges, and bananas")
- Key Takeaways bullets (editors add them)
- Links to Forbes, Fast Company, or Inc. (competitors)
"#;
        let profile = load_profile(guide).unwrap();

        assert_eq!(profile.publication, "Entrepreneur Leadership Network");
        assert_eq!(profile.word_count, CountRange::new(1000, 1200).unwrap());
        assert!(profile.forbids(&ForbiddenPattern::SerialComma));
        assert!(profile.forbids_element(&StructuralElement::KeyTakeaways));
        assert_eq!(profile.competitors(), vec!["Forbes", "Fast Company", "Inc"]);
        assert!(profile.banned_phrases().is_empty());
    }

    #[test]
    fn test_empty_guide() {
        assert_eq!(load_profile("  \n\n"), Err(ParseError::EmptyGuide));
    }

    #[test]
    fn test_missing_table() {
        let guide = "# Forbes Style Guide\n\n## What to Avoid\n- Jargon\n";
        assert_eq!(load_profile(guide), Err(ParseError::MissingTable));
    }

    #[test]
    fn test_missing_word_count_row() {
        let guide = "# Forbes Style Guide\n\n| Element | Requirement |\n|---|---|\n\
                     | Headline | Short |\n\n## What to Avoid\n- Jargon\n";
        assert_eq!(load_profile(guide), Err(ParseError::MissingWordCount));
    }

    #[test]
    fn test_missing_rule_sections() {
        let guide = "# Forbes Style Guide\n\n| Word count | 800-900 |\n\n## Notes\n- Be nice\n";
        assert_eq!(load_profile(guide), Err(ParseError::MissingRuleSections));
    }

    #[test]
    fn test_missing_publication() {
        let guide = "| Word count | 800-900 |\n\n## Required\n- Numbered list\n";
        assert_eq!(load_profile(guide), Err(ParseError::MissingPublication));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let guide = "# Forbes\n\n| Word count | 900-800 |\n\n## Required\n- Numbered list\n";
        assert_eq!(
            load_profile(guide),
            Err(ParseError::InvalidRange {
                field: "word count".to_string(),
                value: "900-800".to_string(),
            })
        );
    }

    #[test]
    fn test_unreadable_range_is_rejected() {
        let guide = "# Forbes\n\n| Word count | short |\n\n## Required\n- Numbered list\n";
        assert!(matches!(
            load_profile(guide),
            Err(ParseError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_parse_range_forms() {
        let patterns = Patterns::new();
        assert_eq!(
            parse_range("800–900 words", &patterns),
            CountRange::new(800, 900)
        );
        assert_eq!(
            parse_range("4,500-5,500 characters", &patterns),
            CountRange::new(4500, 5500)
        );
        assert_eq!(
            parse_range("up to 750 words", &patterns),
            Some(CountRange::at_most(750))
        );
        assert_eq!(
            parse_range("Maximum 750", &patterns),
            Some(CountRange::at_most(750))
        );
        assert_eq!(
            parse_range("at least 600", &patterns),
            Some(CountRange::at_least(600))
        );
        assert_eq!(parse_range("700", &patterns), CountRange::new(700, 700));
        assert_eq!(parse_range("n/a", &patterns), None);
    }

    #[test]
    fn test_loaded_ranges_are_ordered() {
        for (min, max) in [(0, 0), (1, 2), (650, 800), (800, 900), (1000, 5000)] {
            let guide = format!(
                "# Fast Company\n\n| Word count | {min}-{max} words |\n\n## Required\n- Subheadings\n"
            );
            let profile = load_profile(&guide).unwrap();
            assert!(profile.word_count.min <= profile.word_count.max);
            assert_eq!(profile.word_count.min, min);
            assert_eq!(profile.word_count.max, max);
        }
    }

    #[test]
    fn test_bold_label_sections() {
        let guide = "# Fast Company Executive Board Guide\n\n| Word count | 800-1000 |\n\n\
                     **Required:**\n- About the Author section\n\n**Avoid**\n- Oxford comma\n";
        let profile = load_profile(guide).unwrap();
        assert_eq!(profile.publication, "Fast Company Executive Board");
        assert_eq!(
            profile.required,
            vec![StructuralElement::Section("About the Author".to_string())]
        );
        assert!(profile.forbids(&ForbiddenPattern::SerialComma));
    }

    #[test]
    fn test_topics_to_avoid_is_archive_not_rules() {
        let guide = "# Forbes\n\n| Word count | 800-900 |\n\n## Required\n- Subheadings\n\n\
                     ## Topics to Avoid\n- Why culture eats strategy\n- \"Hiring for grit\"\n";
        let profile = load_profile(guide).unwrap();
        assert_eq!(
            profile.topic_archive,
            vec!["Why culture eats strategy", "Hiring for grit"]
        );
        assert!(profile.banned_phrases().is_empty());
    }

    #[test]
    fn test_long_required_bullet_is_advisory() {
        assert_eq!(
            classify_required("Write in first person as the founder at all times"),
            None
        );
    }

    #[test]
    fn test_link_rule_without_names_is_advisory() {
        let patterns = Patterns::new();
        assert_eq!(
            classify_avoid("Excessive links", &patterns),
            AvoidRule::Advisory("Excessive links".to_string())
        );
    }

    #[test]
    fn test_competitor_names_in_non_ascii_guide() {
        let guide = "# İstanbul Business Review\n\n| Word count | 800-900 |\n\n\
                     ## What to Avoid\n- İ links to Äcme\n- İİ links to Forbes\n";
        let profile = load_profile(guide).unwrap();
        assert_eq!(profile.publication, "İstanbul Business Review");
        assert_eq!(profile.competitors(), vec!["Äcme", "Forbes"]);
    }

    #[test]
    fn test_competitor_names_after_colon() {
        let patterns = Patterns::new();
        assert_eq!(
            competitor_names("Competitor links: Forbes, Inc.", &patterns),
            vec!["Forbes", "Inc"]
        );
        assert_eq!(
            competitor_names("Do NOT link TO Fast Company or Inc.", &patterns),
            vec!["Fast Company", "Inc"]
        );
    }

    #[test]
    fn test_publication_from_non_ascii_title() {
        assert_eq!(publication_from_title("Café Société Style Guide"), "Café Société");
        assert_eq!(publication_from_title("Weekly GUİDE"), "Weekly GUİDE");
        assert_eq!(publication_from_title("Guide"), "");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::MissingTable.to_string(),
            "style guide has no specification table"
        );
        assert_eq!(
            ParseError::InvalidRange {
                field: "word count".into(),
                value: "x".into()
            }
            .to_string(),
            "invalid word count range: \"x\""
        );
    }
}
