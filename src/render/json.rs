//! JSON output of the classified document.
//!
//! A diagnostic surface: dumps the full model — pages, block types, TOC
//! entries, footnote references — after the pipeline has run.

use crate::error::Result;
use crate::model::ParseResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed with indentation
    #[default]
    Pretty,
    /// Compact single-line output
    Compact,
}

/// Serialize a classified document to JSON.
pub fn to_json(doc: &ParseResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, Page, Word};

    fn sample() -> ParseResult {
        let mut page = Page::new(0);
        page.add_line(LineItem::new(
            0.0,
            10.0,
            80.0,
            10.0,
            vec![Word::new("hello")],
        ));
        ParseResult::from_pages(vec![page])
    }

    #[test]
    fn test_pretty_contains_structure() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"pages\""));
        assert!(json.contains("\"hello\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_compact_roundtrips() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let restored = ParseResult::from_json(&json).unwrap();
        assert_eq!(restored.page_count(), 1);
    }
}
