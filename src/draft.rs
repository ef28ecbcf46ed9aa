//! Article drafts and the structure detected in them.
//!
//! Drafts are plain text or light Markdown. Everything derived here (word
//! count, headings, lists, links) is computed once at construction; the
//! validator only reads it.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A heading-like line found in a draft body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text without Markdown markers
    pub text: String,
    /// 1-based line number in the body
    pub line: usize,
    /// Whether every letter in the heading is uppercase
    pub all_caps: bool,
}

/// A link found in a draft body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Visible link text (equal to the target for bare URLs)
    pub text: String,
    /// Link target
    pub target: String,
}

/// Structure detected by scanning a draft body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralMarkers {
    /// Lines starting with `-`, `*`, `+` or `•`
    pub bullet_items: usize,
    /// Lines starting with `1.` or `1)`
    pub numbered_items: usize,
    /// Heading-like lines: `#` headings, standalone bold lines, short ALL-CAPS lines
    pub headings: Vec<Heading>,
    /// Whether a "Key Takeaways" label line is present
    pub key_takeaways: bool,
    /// Markdown links and bare URLs
    pub links: Vec<Link>,
    /// Prose paragraphs (blocks that are not headings or lists)
    #[serde(skip)]
    pub paragraphs: Vec<String>,
}

impl StructuralMarkers {
    /// Headings other than the Key Takeaways label.
    pub fn subheadings(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| !is_key_takeaways(&h.text))
    }
}

/// A candidate article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// Headline, possibly empty
    pub headline: String,
    /// Article body
    pub body: String,
    /// Words in the body
    pub word_count: usize,
    /// Characters in the trimmed body, spaces included
    pub character_count: usize,
    /// Detected structure
    pub markers: StructuralMarkers,
}

impl ArticleDraft {
    /// Create a draft from a headline and a body.
    pub fn new(headline: impl Into<String>, body: impl Into<String>) -> Self {
        let headline = headline.into().trim().to_string();
        let body = body.into();
        let word_count = count_words(&body);
        let character_count = body.trim().chars().count();
        let markers = scan_markers(&body);
        Self {
            headline,
            body,
            word_count,
            character_count,
            markers,
        }
    }

    /// Create a draft from a Markdown document.
    ///
    /// A leading level-one heading (`# Title`) becomes the headline and is
    /// removed from the body; otherwise the headline is empty.
    pub fn from_markdown(text: &str) -> Self {
        let mut lines = text.lines();
        for line in lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(title) = trimmed.strip_prefix("# ") {
                let body: Vec<&str> = lines.collect();
                return Self::new(title, body.join("\n"));
            }
            break;
        }
        Self::new("", text)
    }
}

/// Count words: whitespace-separated tokens containing a letter or digit.
///
/// List markers and stray punctuation such as `-` or `—` are not words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

fn is_key_takeaways(text: &str) -> bool {
    text.trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
        .starts_with("key takeaway")
}

fn is_all_caps(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn scan_markers(body: &str) -> StructuralMarkers {
    let hash_heading = Regex::new(r"^#{1,6}\s+(.+?)\s*#*$").unwrap();
    let bold_line = Regex::new(r"^\*\*([^*]+)\*\*:?$").unwrap();
    let bullet = Regex::new(r"^[-*+•]\s+\S").unwrap();
    let numbered = Regex::new(r"^\d+[.)]\s+\S").unwrap();
    let md_link = Regex::new(r"\[([^\]]+)\]\(([^)\s]+)[^)]*\)").unwrap();
    let bare_url = Regex::new(r"https?://[^\s)>\]]+").unwrap();

    let mut markers = StructuralMarkers::default();
    let mut block: Vec<&str> = Vec::new();
    let mut block_is_prose = true;

    for (idx, raw) in body.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            flush_paragraph(&mut markers, &mut block, block_is_prose);
            block_is_prose = true;
            continue;
        }

        let heading_text = if let Some(caps) = hash_heading.captures(line) {
            Some(caps[1].replace("**", "").trim().to_string())
        } else if let Some(caps) = bold_line.captures(line) {
            let text = caps[1].trim();
            (text.split_whitespace().count() <= 12).then(|| text.to_string())
        } else if is_all_caps(line)
            && line.split_whitespace().count() <= 12
            && !line.ends_with('.')
            && !bullet.is_match(line)
            && !numbered.is_match(line)
        {
            Some(line.trim_end_matches(':').to_string())
        } else {
            None
        };

        if is_key_takeaways(line.trim_start_matches('#')) {
            markers.key_takeaways = true;
        }

        if let Some(text) = heading_text {
            markers.headings.push(Heading {
                all_caps: is_all_caps(&text),
                text,
                line: idx + 1,
            });
            block_is_prose = false;
        } else if bullet.is_match(line) {
            markers.bullet_items += 1;
            block_is_prose = false;
        } else if numbered.is_match(line) {
            markers.numbered_items += 1;
            block_is_prose = false;
        }

        for caps in md_link.captures_iter(line) {
            markers.links.push(Link {
                text: caps[1].to_string(),
                target: caps[2].to_string(),
            });
        }
        for m in bare_url.find_iter(line) {
            let url = m.as_str().trim_end_matches(['.', ',', ';']);
            if !markers.links.iter().any(|l| l.target == url) {
                markers.links.push(Link {
                    text: url.to_string(),
                    target: url.to_string(),
                });
            }
        }

        block.push(line);
    }
    flush_paragraph(&mut markers, &mut block, block_is_prose);

    markers
}

fn flush_paragraph(markers: &mut StructuralMarkers, block: &mut Vec<&str>, is_prose: bool) {
    if is_prose && !block.is_empty() {
        markers.paragraphs.push(block.join(" "));
    }
    block.clear();
}
