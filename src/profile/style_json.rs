//! Style guides stored as JSON, one `<publication>_style.json` per outlet.
//!
//! These files predate the Markdown guides. They carry the publication
//! name, a word count, tone words and sample subheadings. Rules the JSON
//! files never recorded are applied per publication.

use serde::Deserialize;
use tracing::debug;

use super::archive::publication_key;
use super::{CountRange, ForbiddenPattern, ParseError, StructuralElement, StyleProfile};

/// Word count assumed when a guide states no bounds.
const DEFAULT_WORD_COUNT: CountRange = CountRange { min: 700, max: 800 };

/// Outlets an Entrepreneur piece must not link to.
const ENTREPRENEUR_COMPETITORS: &[&str] = &["Forbes", "Fast Company", "Inc"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleGuideJson {
    publication_full_name: Option<String>,
    specifications: Specifications,
    tone: Tone,
    subheading_patterns: SubheadingPatterns,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Specifications {
    word_count: Bounds,
    character_count: Option<Bounds>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Bounds {
    min: Option<usize>,
    max: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Tone {
    primary: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubheadingPatterns {
    examples: Vec<String>,
}

impl Bounds {
    fn to_range(&self, field: &str, default: CountRange) -> Result<CountRange, ParseError> {
        let min = self.min.unwrap_or(default.min);
        let max = self.max.unwrap_or(default.max.max(min));
        CountRange::new(min, max).ok_or_else(|| ParseError::InvalidRange {
            field: field.to_string(),
            value: format!("{min}-{max}"),
        })
    }
}

/// Parse a JSON style guide into a [`StyleProfile`].
///
/// The publication is `publication_full_name`, or `publication` when the
/// file leaves it out (callers pass the file's stem, e.g. `fastcompany`).
/// A missing word count defaults to 700-800.
///
/// # Errors
///
/// [`ParseError::InvalidJson`] for malformed JSON,
/// [`ParseError::MissingPublication`] when no name is known, and
/// [`ParseError::InvalidRange`] when `min` exceeds `max`.
///
/// # Examples
///
/// ```
/// use bylint::profile::{load_profile_json, ForbiddenPattern};
///
/// let guide = r#"{
///     "publication_full_name": "Entrepreneur Leadership Network",
///     "specifications": { "word_count": { "min": 1000, "max": 1200 } }
/// }"#;
/// let profile = load_profile_json(guide, None)?;
/// assert_eq!(profile.word_count.max, 1200);
/// assert!(profile.forbids(&ForbiddenPattern::SerialComma));
/// # Ok::<(), bylint::profile::ParseError>(())
/// ```
pub fn load_profile_json(
    text: &str,
    publication: Option<&str>,
) -> Result<StyleProfile, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyGuide);
    }
    let guide: StyleGuideJson =
        serde_json::from_str(text).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let name = guide
        .publication_full_name
        .as_deref()
        .or(publication)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ParseError::MissingPublication)?;

    let word_count = guide
        .specifications
        .word_count
        .to_range("word count", DEFAULT_WORD_COUNT)?;
    let character_count = match &guide.specifications.character_count {
        Some(bounds) if bounds.min.is_some() || bounds.max.is_some() => {
            let open = CountRange::at_least(bounds.min.unwrap_or(0));
            Some(bounds.to_range("character count", open)?)
        }
        _ => None,
    };

    let mut profile = StyleProfile::new(name, word_count);
    profile.character_count = character_count;
    profile.tone = guide.tone.primary;
    profile.advisories = guide
        .subheading_patterns
        .examples
        .iter()
        .map(|example| format!("Sample subheading: {example}"))
        .collect();

    // The publication hint keeps a file named `fastcompany_style.json`
    // recognizable even when its full name is something longer.
    let keys = [Some(name), publication]
        .into_iter()
        .flatten()
        .map(|n| publication_key(n).replace('_', ""));
    for key in keys {
        apply_house_rules(&key, &mut profile);
    }

    debug!(
        publication = %profile.publication,
        word_count = %profile.word_count,
        required = profile.required.len(),
        forbidden = profile.forbidden.len(),
        "loaded JSON style profile"
    );
    Ok(profile)
}

/// Rules the JSON guides leave implicit, keyed by a compact publication key.
fn apply_house_rules(key: &str, profile: &mut StyleProfile) {
    if key.starts_with("fastcompany") {
        let caps = StructuralElement::AllCapsSubheadings;
        if !profile.requires(&caps) {
            profile.required.push(caps);
        }
    } else if key.starts_with("entrepreneur") {
        let rules = [
            ForbiddenPattern::Element(StructuralElement::KeyTakeaways),
            ForbiddenPattern::SerialComma,
            ForbiddenPattern::CompetitorLinks(
                ENTREPRENEUR_COMPETITORS.iter().map(|s| s.to_string()).collect(),
            ),
        ];
        for rule in rules {
            if !profile.forbidden.contains(&rule) {
                profile.forbidden.push(rule);
            }
        }
    }
}
