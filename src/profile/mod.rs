//! Style profile definitions for bylint.
//!
//! A [`StyleProfile`] is the structured rule set derived from one
//! publication's editorial guide. Profiles are built by [`load_profile`]
//! (Markdown guides) or [`load_profile_json`] (JSON guides) and never change
//! afterwards; the only construction-time extension is merging
//! topics from a [`TopicArchive`].

pub mod archive;
pub mod loader;
pub mod style_json;

pub use archive::{ArchiveError, TopicArchive};
pub use loader::{load_profile, ParseError};
pub use style_json::load_profile_json;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive count range such as "800-900 words".
///
/// Construction through [`CountRange::new`] guarantees `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Smallest accepted count
    pub min: usize,
    /// Largest accepted count
    pub max: usize,
}

impl CountRange {
    /// Create a range, returning `None` when `min > max`.
    pub fn new(min: usize, max: usize) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// A range with no upper bound.
    pub fn at_least(min: usize) -> Self {
        Self {
            min,
            max: usize::MAX,
        }
    }

    /// A range starting at zero.
    pub fn at_most(max: usize) -> Self {
        Self { min: 0, max }
    }

    /// Whether `count` lies inside the range.
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }

    /// Whether the range has an upper bound.
    pub fn is_bounded(&self) -> bool {
        self.max != usize::MAX
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bounded() {
            write!(f, "{}-{}", self.min, self.max)
        } else {
            write!(f, "{}+", self.min)
        }
    }
}

/// A structural element a draft can contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum StructuralElement {
    /// A "Key Takeaways" box, usually a short bulleted summary
    KeyTakeaways,
    /// At least two numbered items ("1. ...")
    NumberedList,
    /// At least two bullet items ("- ...")
    BulletList,
    /// At least one subheading
    Subheadings,
    /// Every subheading written in capitals
    AllCapsSubheadings,
    /// A heading with the given title must appear
    Section(String),
}

impl fmt::Display for StructuralElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralElement::KeyTakeaways => write!(f, "Key Takeaways box"),
            StructuralElement::NumberedList => write!(f, "numbered list"),
            StructuralElement::BulletList => write!(f, "bulleted list"),
            StructuralElement::Subheadings => write!(f, "subheadings"),
            StructuralElement::AllCapsSubheadings => write!(f, "ALL-CAPS subheadings"),
            StructuralElement::Section(name) => write!(f, "\"{}\" section", name),
        }
    }
}

/// A pattern a draft must not contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum ForbiddenPattern {
    /// "apples, oranges, and bananas"
    SerialComma,
    /// "was written", "is being reviewed"
    PassiveVoice,
    /// The "—" character
    EmDash,
    /// Words or phrases that must not appear anywhere
    BannedPhrases(Vec<String>),
    /// Phrases a paragraph must not start with
    BannedOpeners(Vec<String>),
    /// Outlets that must not be linked to
    CompetitorLinks(Vec<String>),
    /// A structural element the editors add themselves
    Element(StructuralElement),
}

/// A publication's style profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Publication name, e.g. "Forbes Business Council"
    pub publication: String,
    /// Accepted word count
    pub word_count: CountRange,
    /// Accepted character count, if the guide states one
    #[serde(default)]
    pub character_count: Option<CountRange>,
    /// Elements every draft must contain
    #[serde(default)]
    pub required: Vec<StructuralElement>,
    /// Patterns no draft may contain
    #[serde(default)]
    pub forbidden: Vec<ForbiddenPattern>,
    /// Themes the author keeps returning to
    #[serde(default)]
    pub recurring_themes: Vec<String>,
    /// Tone descriptors, informational only
    #[serde(default)]
    pub tone: Vec<String>,
    /// Avoid-rules that cannot be checked mechanically
    #[serde(default)]
    pub advisories: Vec<String>,
    /// Topics already covered for this publication
    #[serde(default)]
    pub topic_archive: Vec<String>,
}

impl StyleProfile {
    /// Create a profile with only a publication and a word-count range.
    pub fn new(publication: impl Into<String>, word_count: CountRange) -> Self {
        Self {
            publication: publication.into(),
            word_count,
            character_count: None,
            required: Vec::new(),
            forbidden: Vec::new(),
            recurring_themes: Vec::new(),
            tone: Vec::new(),
            advisories: Vec::new(),
            topic_archive: Vec::new(),
        }
    }

    /// Extend the topic archive, skipping topics already present.
    pub fn with_archived_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for topic in topics {
            let topic = topic.into();
            let exists = self
                .topic_archive
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&topic));
            if !exists && !topic.trim().is_empty() {
                self.topic_archive.push(topic);
            }
        }
        self
    }

    /// Whether the profile requires the given element.
    pub fn requires(&self, element: &StructuralElement) -> bool {
        self.required.contains(element)
    }

    /// Whether the profile forbids the given element.
    pub fn forbids_element(&self, element: &StructuralElement) -> bool {
        self.forbidden
            .iter()
            .any(|p| matches!(p, ForbiddenPattern::Element(e) if e == element))
    }

    /// Whether the profile contains the given flag-like pattern.
    pub fn forbids(&self, pattern: &ForbiddenPattern) -> bool {
        self.forbidden.contains(pattern)
    }

    /// All banned phrases across every banned-phrase rule.
    pub fn banned_phrases(&self) -> Vec<&str> {
        self.forbidden
            .iter()
            .filter_map(|p| match p {
                ForbiddenPattern::BannedPhrases(list) => Some(list),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// All banned paragraph openers.
    pub fn banned_openers(&self) -> Vec<&str> {
        self.forbidden
            .iter()
            .filter_map(|p| match p {
                ForbiddenPattern::BannedOpeners(list) => Some(list),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// All competitor names that must not be linked.
    pub fn competitors(&self) -> Vec<&str> {
        self.forbidden
            .iter()
            .filter_map(|p| match p {
                ForbiddenPattern::CompetitorLinks(list) => Some(list),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }
}
