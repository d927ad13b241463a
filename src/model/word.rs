//! Word-level types.

use serde::{Deserialize, Serialize};

use crate::text::looks_like_url;

/// A single text run with style flags.
///
/// Words are produced by the extraction collaborator and are immutable once
/// built, with one exception: the list detector normalizes bullet glyphs in
/// place. Missing flags deserialize as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Word {
    /// The text content
    pub text: String,

    /// Bold style
    #[serde(default)]
    pub is_bold: bool,

    /// Italic style
    #[serde(default)]
    pub is_italic: bool,

    /// Raised above the baseline (footnote reference candidates)
    #[serde(default)]
    pub is_superscript: bool,

    /// URL-shaped text, rendered as a link
    #[serde(default)]
    pub is_link: bool,
}

impl Word {
    /// Create a plain word with no styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a word with style flags, deriving `is_link` from the text.
    pub fn flagged(text: impl Into<String>, bold: bool, italic: bool, superscript: bool) -> Self {
        let text = text.into();
        let is_link = looks_like_url(&text);
        Self {
            text,
            is_bold: bold,
            is_italic: italic,
            is_superscript: superscript,
            is_link,
        }
    }

    /// Whether the word is both bold and italic.
    pub fn is_bold_italic(&self) -> bool {
        self.is_bold && self.is_italic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_italic() {
        let w = Word::flagged("emphasis", true, true, false);
        assert!(w.is_bold_italic());
        assert!(!w.is_link);

        let w = Word::flagged("bold", true, false, false);
        assert!(!w.is_bold_italic());
    }

    #[test]
    fn test_link_derivation() {
        let w = Word::flagged("https://example.com", false, false, false);
        assert!(w.is_link);

        let w = Word::flagged("www.example.com", false, false, false);
        assert!(w.is_link);
    }
}
