//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{LineBlock, LineItem, TableBlock};

/// One item on a page.
///
/// Pages hold raw lines before the block gatherer and blocks/tables after
/// it; every stage pattern-matches on the variant it operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    /// A raw positioned line (pre-gathering)
    Line(LineItem),

    /// A gathered paragraph-level block
    Block(LineBlock),

    /// A pre-rendered table
    Table(TableBlock),
}

impl PageItem {
    /// The line, if this item is one.
    pub fn as_line(&self) -> Option<&LineItem> {
        match self {
            PageItem::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The block, if this item is one.
    pub fn as_block(&self) -> Option<&LineBlock> {
        match self {
            PageItem::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Mutable access to the block, if this item is one.
    pub fn as_block_mut(&mut self) -> Option<&mut LineBlock> {
        match self {
            PageItem::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Whether this item is a raw line.
    pub fn is_line(&self) -> bool {
        matches!(self, PageItem::Line(_))
    }

    /// Whether this item is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, PageItem::Table(_))
    }

    /// Top Y coordinate used when re-interleaving blocks and tables.
    pub fn top_y(&self) -> f32 {
        match self {
            PageItem::Line(line) => line.y,
            PageItem::Block(block) => block.top_y(),
            PageItem::Table(table) => table.y,
        }
    }
}

/// A single page: an index plus its ordered items.
///
/// Items are always kept in top-to-bottom document order; multi-column
/// sources sort per column before concatenating, never interleaving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Physical page index (0-based)
    pub index: usize,

    /// Ordered page content
    pub items: Vec<PageItem>,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            items: Vec::new(),
        }
    }

    /// Create a page from raw lines.
    pub fn from_lines(index: usize, lines: Vec<LineItem>) -> Self {
        Self {
            index,
            items: lines.into_iter().map(PageItem::Line).collect(),
        }
    }

    /// Add a raw line.
    pub fn add_line(&mut self, line: LineItem) {
        self.items.push(PageItem::Line(line));
    }

    /// Add a pre-rendered table.
    pub fn add_table(&mut self, table: TableBlock) {
        self.items.push(PageItem::Table(table));
    }

    /// Iterate over the raw lines on this page.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter_map(PageItem::as_line)
    }

    /// Iterate over the gathered blocks on this page.
    pub fn blocks(&self) -> impl Iterator<Item = &LineBlock> {
        self.items.iter().filter_map(PageItem::as_block)
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
