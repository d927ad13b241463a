//! # layoutmd
//!
//! Markdown reconstruction from positioned text spans.
//!
//! This library takes a page-oriented stream of positioned text lines (and
//! pre-detected table regions) — as produced by a PDF extractor or any
//! document source exposing glyph-level position, size, font, and color —
//! and infers document structure purely from geometry, typography, and
//! lightweight textual patterns: paragraphs, headings, lists, code blocks,
//! footnotes, tables of contents, running headers/footers, page numbers.
//!
//! ## Quick Start
//!
//! ```
//! use layoutmd::{to_markdown, LineItem, Page, ParseResult, RenderOptions, Word};
//!
//! fn main() -> layoutmd::Result<()> {
//!     // The extraction collaborator builds the model...
//!     let mut page = Page::new(0);
//!     page.add_line(LineItem::new(
//!         72.0,
//!         90.0,
//!         200.0,
//!         10.0,
//!         vec![Word::new("Hello,"), Word::new("world.")],
//!     ));
//!     let doc = ParseResult::from_pages(vec![page]);
//!
//!     // ...and layoutmd reconstructs Markdown from it.
//!     let markdown = to_markdown(doc, &RenderOptions::default())?;
//!     assert_eq!(markdown, "Hello, world.");
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Classification runs as an ordered cascade of in-place passes: document
//! statistics, vertical-text merging, page-number and running-header
//! removal, block gathering, code/TOC/heading/list/footnote detection.
//! Every heuristic fails open — a document without a detectable pattern
//! simply skips that stage's effect. See [`pipeline::Pipeline`].
//!
//! ## Batch conversion
//!
//! Documents are independent: [`convert_batch`] fans whole documents out
//! across threads with Rayon, one single-threaded pipeline per document,
//! and isolates each document's outcome in its own `Result` slot.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod text;

pub use error::{Error, Result};
pub use model::{
    BlockType, FootnoteRef, LineBlock, LineItem, Metadata, Page, PageItem, ParseResult,
    TableBlock, TocEntry, Word,
};
pub use pipeline::{DocStats, Pipeline, Stage, StyleSignature};
pub use render::{JsonFormat, RenderOptions};

use rayon::prelude::*;

/// Run the standard pipeline over a document and render it to Markdown.
pub fn to_markdown(mut doc: ParseResult, options: &RenderOptions) -> Result<String> {
    let stats = Pipeline::standard().run(&mut doc);
    render::to_markdown(&doc, &stats, options)
}

/// Run the standard pipeline and render one Markdown string per page.
pub fn to_markdown_pages(mut doc: ParseResult, options: &RenderOptions) -> Result<Vec<String>> {
    let stats = Pipeline::standard().run(&mut doc);
    render::to_markdown_pages(&doc, &stats, options)
}

/// Run the standard pipeline and return the classified document together
/// with its statistics, for callers that post-process the model.
pub fn classify(mut doc: ParseResult) -> (ParseResult, DocStats) {
    let stats = Pipeline::standard().run(&mut doc);
    (doc, stats)
}

/// Convert many documents in parallel, one pipeline per document.
///
/// Each document is processed exactly once on its own worker; a failing
/// document occupies its own `Result` slot and never aborts the batch.
pub fn convert_batch(
    docs: Vec<ParseResult>,
    options: &RenderOptions,
) -> Vec<Result<String>> {
    docs.into_par_iter()
        .map(|doc| to_markdown(doc, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_doc(text: &str) -> ParseResult {
        let mut page = Page::new(0);
        page.add_line(LineItem::new(
            72.0,
            90.0,
            200.0,
            10.0,
            text.split(' ').map(Word::new).collect(),
        ));
        ParseResult::from_pages(vec![page])
    }

    #[test]
    fn test_to_markdown_simple() {
        let markdown = to_markdown(simple_doc("plain body text"), &RenderOptions::default())
            .unwrap();
        assert_eq!(markdown, "plain body text");
    }

    #[test]
    fn test_to_markdown_pages_counts() {
        let mut doc = simple_doc("page one text");
        let mut second = Page::new(1);
        second.add_line(LineItem::new(
            72.0,
            90.0,
            200.0,
            10.0,
            vec![Word::new("second")],
        ));
        doc.pages.push(second);

        let pages = to_markdown_pages(doc, &RenderOptions::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], "page one text");
        assert_eq!(pages[1], "second");
    }

    #[test]
    fn test_empty_document_renders_empty() {
        let markdown = to_markdown(ParseResult::new(), &RenderOptions::default()).unwrap();
        assert_eq!(markdown, "");
    }

    #[test]
    fn test_convert_batch_isolates_documents() {
        let docs = vec![simple_doc("first doc"), ParseResult::new()];
        let results = convert_batch(docs, &RenderOptions::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_deref().unwrap(), "first doc");
        assert_eq!(results[1].as_deref().unwrap(), "");
    }

    #[test]
    fn test_classify_exposes_stats() {
        let (doc, stats) = classify(simple_doc("some body text"));
        assert_eq!(stats.body_height, 10);
        assert_eq!(doc.pages[0].blocks().count(), 1);
    }
}
