//! List-item detection.

use super::{DocStats, Stage};
use crate::model::{BlockType, ParseResult};
use crate::text::{is_bullet_list, is_numbered_list};

/// Indentation units per nesting level.
const INDENT_STEP: i32 = 12;

/// Classifies bullet and numbered blocks and assigns nesting depth.
///
/// Depth is the block's left offset from the page minimum X in 12-unit
/// steps. The `•` and `–` glyphs are normalized to `-` so the renderer
/// emits uniform markers.
pub struct ListDetector;

impl Stage for ListDetector {
    fn name(&self) -> &'static str {
        "list_detector"
    }

    fn apply(&self, doc: &mut ParseResult, _stats: &DocStats) {
        for page in &mut doc.pages {
            let min_x = page
                .blocks()
                .filter_map(|b| b.lines.first().map(|l| l.rounded_x()))
                .min();
            let Some(min_x) = min_x else {
                continue;
            };

            for item in &mut page.items {
                let Some(block) = item.as_block_mut() else {
                    continue;
                };
                let text = block.text();
                let text = text.trim();
                if !is_bullet_list(text) && !is_numbered_list(text) {
                    continue;
                }

                block.block_type = BlockType::List;
                let x = block
                    .lines
                    .first()
                    .map(|l| l.rounded_x())
                    .unwrap_or(min_x);
                block.indent_level = ((x - min_x) / INDENT_STEP).max(0) as u32;

                if let Some(first_word) = block
                    .lines
                    .first_mut()
                    .and_then(|l| l.words.first_mut())
                {
                    if first_word.text == "•" || first_word.text == "–" {
                        first_word.text = "-".to_string();
                    }
                }
            }
        }
    }
}
