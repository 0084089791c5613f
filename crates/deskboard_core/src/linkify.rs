//! URL detection over freeform text.
//!
//! Splits text into plain and link segments so the presentation layer can
//! render anchors without owning the pattern. Trailing punctuation stays
//! outside the link, so "see https://example.com." links the bare URL.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<]+[^\s<.,;:!?"')}\]]"#).expect("valid url regex")
});

/// One run of annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text between links.
    Text(String),
    /// A detected `http(s)` URL.
    Link(String),
}

impl Segment {
    /// The underlying text of this segment.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Link(text) => text,
        }
    }
}

/// Splits `text` into plain and link segments.
///
/// # Contract
/// - Concatenating the segments reproduces the input exactly.
/// - Text without URLs yields one `Text` segment (or none when empty).
pub fn annotate(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in URL_RE.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Text(text[cursor..found.start()].to_string()));
        }
        segments.push(Segment::Link(found.as_str().to_string()));
        cursor = found.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }

    segments
}
