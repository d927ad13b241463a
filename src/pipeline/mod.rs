//! The layout-reconstruction pipeline.
//!
//! An ordered cascade of passes over a [`ParseResult`]: statistics are
//! aggregated once, then each stage mutates the shared document in place
//! before the next one runs. No stage observes another's partial output,
//! and every heuristic fails open — an absent pattern skips the stage's
//! effect rather than erroring.

mod code;
mod footnotes;
mod gather;
mod headers;
mod lists;
mod mapper;
mod page_numbers;
mod repeats;
mod stats;
mod toc;
mod vertical;

pub use code::CodeBlockDetector;
pub use footnotes::FootnoteLinker;
pub use gather::BlockGatherer;
pub use headers::HeaderDetector;
pub use lists::ListDetector;
pub use mapper::DocumentMapper;
pub use page_numbers::PageNumberDetector;
pub use repeats::RepetitiveElementRemover;
pub use stats::{DocStats, StyleSignature};
pub use toc::TocDetector;
pub use vertical::VerticalTextMerger;

use crate::model::ParseResult;

/// One pipeline pass.
///
/// Stages mutate the document in place and read the shared statistics;
/// they never fail and never touch `DocStats`.
pub trait Stage {
    /// Stage name for logging.
    fn name(&self) -> &'static str;

    /// Run the pass over the whole document.
    fn apply(&self, doc: &mut ParseResult, stats: &DocStats);
}

/// The ordered stage list.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The standard stage order. Later stages consume side-channel state
    /// of earlier ones (TOC entries feed the mapper, heading levels feed
    /// the all-caps pass), so the order is part of the contract.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(VerticalTextMerger),
                Box::new(PageNumberDetector),
                Box::new(RepetitiveElementRemover),
                Box::new(BlockGatherer),
                Box::new(CodeBlockDetector),
                Box::new(TocDetector),
                Box::new(DocumentMapper),
                Box::new(HeaderDetector),
                Box::new(ListDetector),
                Box::new(FootnoteLinker),
            ],
        }
    }

    /// Aggregate statistics, run every stage in order, and return the
    /// statistics for the renderer.
    pub fn run(&self, doc: &mut ParseResult) -> DocStats {
        let stats = DocStats::compute(doc);
        for stage in &self.stages {
            log::debug!("pipeline stage: {}", stage.name());
            stage.apply(doc, &stats);
        }
        stats
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
