//! Line-to-block gathering.

use super::{DocStats, Stage};
use crate::model::{LineBlock, LineItem, PageItem, ParseResult};

/// Height difference that separates a line from the current block. Catches
/// run-in headings (11pt title over 9.8pt body) while tolerating size
/// noise within one text style.
const HEIGHT_BREAK: f32 = 0.9;

/// Merges consecutive lines into paragraph-level blocks.
///
/// A line is appended to the current block unless it jumped upward by more
/// than half the body spacing (column change or flow reset), its vertical
/// gap exceeds the context-dependent allowed distance, or its height
/// deviates from the block's first line. The allowed distance starts at
/// body spacing + 1, widens to 1.5× when both lines sit past the left
/// margin, and to 1.75× for an in-progress list item continuing indented.
///
/// Tables captured by the extractor skip the scan entirely and are
/// re-interleaved with the finished blocks by top Y.
pub struct BlockGatherer;

impl Stage for BlockGatherer {
    fn name(&self) -> &'static str {
        "block_gatherer"
    }

    fn apply(&self, doc: &mut ParseResult, stats: &DocStats) {
        let dist = stats.body_distance;
        let min_x = stats.min_x as f32;

        for page in &mut doc.pages {
            if page.items.is_empty() {
                continue;
            }
            let items = std::mem::take(&mut page.items);

            let mut blocks: Vec<LineBlock> = Vec::new();
            let mut current = LineBlock::new();
            let mut tables: Vec<PageItem> = Vec::new();
            let mut last_line: Option<LineItem> = None;

            for item in items {
                let line = match item {
                    PageItem::Line(line) => line,
                    table @ PageItem::Table(_) => {
                        tables.push(table);
                        continue;
                    }
                    PageItem::Block(block) => {
                        // Already gathered (pipeline re-entry); keep as-is.
                        blocks.push(block);
                        continue;
                    }
                };

                let should_flush = match &last_line {
                    Some(last) => breaks_block(last, &line, &current, dist, min_x),
                    None => false,
                };

                if should_flush && !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                current.lines.push(line.clone());
                last_line = Some(line);
            }
            if !current.is_empty() {
                blocks.push(current);
            }

            let mut gathered: Vec<PageItem> =
                blocks.into_iter().map(PageItem::Block).collect();
            gathered.extend(tables);
            gathered.sort_by(|a, b| {
                a.top_y()
                    .partial_cmp(&b.top_y())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            page.items = gathered;
        }
    }
}

/// Whether `line` starts a new block rather than continuing `current`.
fn breaks_block(
    last: &LineItem,
    line: &LineItem,
    current: &LineBlock,
    dist: f32,
    min_x: f32,
) -> bool {
    let distance = line.y - last.y;

    // Upward jump: new column or flow reset.
    if distance < -(dist / 2.0) {
        return true;
    }

    let mut allowed = dist + 1.0;
    if last.x > min_x && line.x > min_x {
        allowed = dist * 1.5;
    }
    if is_list_context(current) && line.x > min_x {
        allowed = dist * 1.75;
    }

    let height_break = current
        .lines
        .first()
        .map(|first| (line.height - first.height).abs() > HEIGHT_BREAK)
        .unwrap_or(false);

    distance > allowed || height_break
}

/// Whether the current block reads like an in-progress list item: its
/// first line starts with a bullet glyph or a one/two-digit marker
/// followed by `.`, `)` or `:`.
fn is_list_context(current: &LineBlock) -> bool {
    let Some(first) = current.lines.first() else {
        return false;
    };
    let text = first.text();
    let text = text.trim();
    if text.starts_with('-') || text.starts_with('•') || text.starts_with('–')
        || text.starts_with('*')
    {
        return true;
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() > 1 && chars[0].is_ascii_digit() {
        if matches!(chars[1], '.' | ')' | ':') {
            return true;
        }
        if chars.len() > 2 && chars[1].is_ascii_digit() && matches!(chars[2], '.' | ')' | ':') {
            return true;
        }
    }
    false
}
