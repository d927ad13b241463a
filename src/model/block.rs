//! Block-level types.

use serde::{Deserialize, Serialize};

use super::LineItem;

/// Classification of a line block.
///
/// `Paragraph` is the least specific type; pipeline stages only ever
/// promote a block away from it (footnote splitting replaces blocks rather
/// than reverting them). Rendering prefixes live in the renderer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Regular paragraph text (default)
    Paragraph,
    /// Level-1 heading
    H1,
    /// Level-2 heading
    H2,
    /// Level-3 heading
    H3,
    /// Level-4 heading
    H4,
    /// Level-5 heading
    H5,
    /// Level-6 heading
    H6,
    /// Bullet or numbered list item
    List,
    /// Code block
    Code,
    /// Block quote
    Quote,
    /// Table-of-contents entry line
    Toc,
    /// Footnote definition
    Footnote,
    /// Table placeholder (tables render from `TableBlock` directly)
    Table,
}

impl BlockType {
    /// Heading level 1-6, or `None` for non-heading types.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockType::H1 => Some(1),
            BlockType::H2 => Some(2),
            BlockType::H3 => Some(3),
            BlockType::H4 => Some(4),
            BlockType::H5 => Some(5),
            BlockType::H6 => Some(6),
            _ => None,
        }
    }

    /// Heading type for a level, clamped to 1-6.
    pub fn from_heading_level(level: u8) -> Self {
        match level {
            0 | 1 => BlockType::H1,
            2 => BlockType::H2,
            3 => BlockType::H3,
            4 => BlockType::H4,
            5 => BlockType::H5,
            _ => BlockType::H6,
        }
    }

    /// Whether this is one of H1-H6.
    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::Paragraph
    }
}

/// An ordered run of lines treated as one paragraph-level unit.
///
/// Created by the block gatherer; later stages reassign `block_type` in
/// place but never reorder the lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineBlock {
    /// Lines in document order
    pub lines: Vec<LineItem>,

    /// Current classification
    pub block_type: BlockType,

    /// List nesting depth (0 = top level)
    pub indent_level: u32,

    /// TOC nesting level when tagged by the document mapper
    pub toc_level: Option<u32>,
}

impl LineBlock {
    /// Create an empty paragraph block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from lines.
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Combined text of all lines, space-joined.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Top Y coordinate (first line), or 0 for an empty block.
    pub fn top_y(&self) -> f32 {
        self.lines.first().map(|l| l.y).unwrap_or(0.0)
    }

    /// Largest line height in the block.
    pub fn max_line_height(&self) -> f32 {
        self.lines.iter().map(|l| l.height).fold(0.0, f32::max)
    }

    /// Whether the block holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A pre-detected table, already rendered to GFM by the extractor.
///
/// Opaque to every text heuristic; only its `y` participates in ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    /// Top Y coordinate for ordering against line blocks
    pub y: f32,

    /// Pre-rendered GFM table
    pub markdown: String,

    /// Source bounding box (x0, y0, x1, y1)
    #[serde(default)]
    pub bbox: [f32; 4],
}

impl TableBlock {
    /// Create a table block from its rendered Markdown and top Y.
    pub fn new(y: f32, markdown: impl Into<String>) -> Self {
        Self {
            y,
            markdown: markdown.into(),
            bbox: [0.0; 4],
        }
    }
}
