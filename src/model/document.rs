//! Document-level types.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LineItem, Page};
use crate::error::Result;

/// A parsed document: ordered pages plus document-level side channels.
///
/// The extraction collaborator builds this (directly or via
/// [`ParseResult::from_json`]); the pipeline classifies it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseResult {
    /// Pages in physical order
    pub pages: Vec<Page>,

    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Table-of-contents entries (filled by the TOC detector)
    #[serde(default)]
    pub toc_entries: Vec<TocEntry>,

    /// In-text superscript footnote references (filled by the footnote linker)
    #[serde(default)]
    pub footnote_refs: Vec<FootnoteRef>,

    /// Offset between TOC-declared page numbers and physical page indices
    /// (resolved by the document mapper; 0 when no TOC was mapped)
    #[serde(default)]
    pub page_offset: i64,
}

impl ParseResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Load a serialized parse result from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a serialized parse result from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the document holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over every raw line in the document, in page order.
    pub fn all_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.pages.iter().flat_map(|p| p.lines())
    }
}

/// Document metadata supplied by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Document subject
    #[serde(default)]
    pub subject: Option<String>,

    /// Keywords
    #[serde(default)]
    pub keywords: Option<String>,

    /// Creator application
    #[serde(default)]
    pub creator: Option<String>,

    /// Producer application
    #[serde(default)]
    pub producer: Option<String>,

    /// Creation date
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    /// Total number of pages in the source
    #[serde(default)]
    pub page_count: u32,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref keywords) = self.keywords {
            lines.push(format!("keywords: \"{}\"", escape_yaml(keywords)));
        }
        if let Some(ref creator) = self.creator {
            lines.push(format!("creator: \"{}\"", escape_yaml(creator)));
        }
        if let Some(ref producer) = self.producer {
            lines.push(format!("producer: \"{}\"", escape_yaml(producer)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }
        if self.page_count > 0 {
            lines.push(format!("pages: {}", self.page_count));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// One table-of-contents entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry title as printed in the TOC
    pub text: String,

    /// Page number declared by the TOC
    pub page_num: i64,

    /// Nesting level (0 = outermost), from indentation rank
    pub level: u32,
}

/// A superscript footnote reference found in body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootnoteRef {
    /// The footnote number as written
    pub number: String,

    /// Page the reference appears on
    pub page_index: usize,

    /// Line position within the page
    pub line_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ParseResult::new();
        assert!(result.is_empty());
        assert_eq!(result.page_count(), 0);
        assert_eq!(result.all_lines().count(), 0);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            title: Some("Test Document".to_string()),
            author: Some("Jane Doe".to_string()),
            page_count: 10,
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Test Document\""));
        assert!(yaml.contains("author: \"Jane Doe\""));
        assert!(yaml.contains("pages: 10"));
    }

    #[test]
    fn test_from_json_roundtrip() {
        let mut result = ParseResult::new();
        result.pages.push(Page::new(0));
        let json = serde_json::to_string(&result).unwrap();
        let restored = ParseResult::from_json(&json).unwrap();
        assert_eq!(restored.page_count(), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ParseResult::from_json("{not json").is_err());
    }
}
