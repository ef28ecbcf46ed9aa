//! Rewrite pass for drafts that lean on stock phrasing.
//!
//! Em dashes become commas and filler vocabulary is swapped for plain
//! words. Running the pass on its own output changes nothing.

use regex::{Captures, Regex};
use tracing::debug;

/// Filler vocabulary and its plain replacement, most specific first.
///
/// An empty replacement removes the phrase along with the spaces after it.
/// A phrase that ends a line is left alone so paragraph breaks survive.
const REWRITES: &[(&str, &str)] = &[
    (r"it(?:['’]s| is) worth noting that", ""),
    (r"in today['’]s rapidly (?:evolving|changing) (?:landscape|world)", "today"),
    (r"in today['’]s (?:landscape|world|environment|climate)", "today"),
    (r"rapidly evolving landscape", "changing market"),
    (r"ever-(?:evolving|changing) landscape", "shifting market"),
    (r"navigate the (?:complex )?landscape", "work through the challenges"),
    (r"the landscape of", "the world of"),
    (r"unlock(?:ing)? the (?:full )?potential", "get the most out"),
    (r"paradigm shift", "big change"),
    (r"delves", "explores"),
    (r"delved", "explored"),
    (r"delving", "exploring"),
    (r"delve", "explore"),
    (r"pivotal", "important"),
    (r"crucial", "important"),
    (r"moreover", "also"),
    (r"furthermore", "also"),
    (r"additionally", "also"),
    (r"indeed", "really"),
    (r"multifaceted", "complex"),
    (r"tapestry", "mix"),
    (r"paradigm", "model"),
    (r"synergy", "teamwork"),
    (r"holistic", "complete"),
    (r"seamlessly", "smoothly"),
    (r"seamless", "smooth"),
    (r"leverage", "use"),
    (r"utilize", "use"),
    (r"facilitate", "help with"),
    (r"commence", "start"),
    (r"robust", "strong"),
];

struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

/// Compiled rewrite rules.
pub struct Sanitizer {
    rewrites: Vec<Rewrite>,
    doubled_commas: Regex,
    stray_comma: Regex,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        let rewrites = REWRITES
            .iter()
            .map(|&(phrase, replacement)| {
                // Removals also capture the first letter that follows, so a
                // sentence that loses its opening keeps its capital.
                let pattern = if replacement.is_empty() {
                    format!(r"(?i)\b{phrase}[ \t]+(\p{{L}})?")
                } else {
                    format!(r"(?i)\b{phrase}\b")
                };
                Rewrite {
                    pattern: Regex::new(&pattern).unwrap(),
                    replacement,
                }
            })
            .collect();

        Self {
            rewrites,
            doubled_commas: Regex::new(r",(?:[ \t]*,)+").unwrap(),
            stray_comma: Regex::new(r"[ \t],[ \t]+(\p{Ll})").unwrap(),
        }
    }

    /// Rewrite `text`.
    pub fn sanitize(&self, text: &str) -> String {
        let mut out = replace_em_dashes(text);

        for rewrite in &self.rewrites {
            let hits = rewrite.pattern.find_iter(&out).count();
            if hits == 0 {
                continue;
            }
            debug!(pattern = %rewrite.pattern, hits, "rewriting filler");
            out = rewrite
                .pattern
                .replace_all(&out, |caps: &Captures<'_>| apply(rewrite.replacement, caps))
                .into_owned();
        }

        let out = self.doubled_commas.replace_all(&out, ",");
        self.stray_comma.replace_all(&out, " $1").into_owned()
    }
}

/// Rewrite `text` with the default rules.
///
/// # Examples
///
/// ```
/// use bylint::sanitize::sanitize;
///
/// assert_eq!(
///     sanitize("We leverage data — lots of it."),
///     "We use data, lots of it."
/// );
/// ```
pub fn sanitize(text: &str) -> String {
    Sanitizer::new().sanitize(text)
}

fn replace_em_dashes(text: &str) -> String {
    text.replace(" — ", ", ")
        .replace(" —", ",")
        .replace("— ", ", ")
        .replace('—', ", ")
}

fn apply(replacement: &str, caps: &Captures<'_>) -> String {
    let matched = &caps[0];
    let capital = matched.chars().next().is_some_and(char::is_uppercase);
    if replacement.is_empty() {
        let next = caps.get(1).map_or("", |m| m.as_str());
        return if capital {
            next.to_uppercase()
        } else {
            next.to_string()
        };
    }
    if capital {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
