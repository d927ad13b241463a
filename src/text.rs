//! Shared string heuristics used across pipeline stages and the renderer.

use std::collections::HashSet;

use regex::Regex;

/// Normalize text for fuzzy matching: uppercase, ASCII alphanumerics only.
///
/// Non-breaking spaces, punctuation, and accented characters all disappear,
/// so "Chapter 1:  Intro" and "CHAPTER 1 INTRO" normalize identically.
pub fn normalize_for_match(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Word-overlap score between two strings in `[0, 1]`.
///
/// Each string is tokenized on whitespace, tokens are normalized, and the
/// score is the intersection size over the larger token-set size.
pub fn word_match_score(a: &str, b: &str) -> f32 {
    let tokens = |s: &str| -> HashSet<String> {
        s.split_whitespace()
            .map(normalize_for_match)
            .filter(|t| !t.is_empty())
            .collect()
    };
    let wa = tokens(a);
    let wb = tokens(b);
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    let common = wa.intersection(&wb).count();
    common as f32 / wa.len().max(wb.len()) as f32
}

/// Whether text starts with a bullet marker (`-`, `•`, `–`) and whitespace.
pub fn is_bullet_list(text: &str) -> bool {
    let re = Regex::new(r"^[\s]*[-•–][\s]").unwrap();
    re.is_match(text)
}

/// Whether text starts with a numbered-list marker (`1. `, `12. `).
pub fn is_numbered_list(text: &str) -> bool {
    let re = Regex::new(r"^[\s]*[\d]+[.][\s]").unwrap();
    re.is_match(text)
}

/// Whether a word looks like a URL.
pub fn looks_like_url(text: &str) -> bool {
    let re = Regex::new(r"^(https?://|www\.)\S+").unwrap();
    re.is_match(text)
}

/// Whether the text contains letters and all of them are uppercase.
///
/// Digit-only or punctuation-only text is not considered uppercase.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut has_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// Whether the text is non-empty and entirely ASCII digits.
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
