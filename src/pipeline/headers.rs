//! Font-size and style based heading detection.

use std::collections::HashSet;

use super::{DocStats, Stage};
use crate::model::{BlockType, ParseResult};
use crate::text::{is_all_uppercase, is_digits};

/// Classifies remaining paragraphs as headings in four ordered passes.
///
/// 1. Title pages (any page holding a line at the document max height):
///    sufficiently large paragraphs become H1 at max height, H2 below it.
/// 2. Distinct heights above body size rank into H2-H5, largest first.
/// 3. All-caps paragraphs at body height in a non-body font, following a
///    non-paragraph block, take the next level below the deepest assigned.
/// 4. Body-height paragraphs deviating from the primary style signature
///    (color, or font with a bold start) become H4.
///
/// Pass order is load-bearing: the all-caps pass must see the deepest
/// level produced by the ranking passes, and a block it promotes is no
/// longer eligible for the signature pass.
pub struct HeaderDetector;

impl Stage for HeaderDetector {
    fn name(&self) -> &'static str {
        "header_detector"
    }

    fn apply(&self, doc: &mut ParseResult, stats: &DocStats) {
        title_page_pass(doc, stats);
        distinct_height_pass(doc, stats);
        all_caps_pass(doc, stats);
        style_signature_pass(doc, stats);
    }
}

/// Whether a block is still open for heading promotion.
fn is_untyped(block_type: BlockType, toc_level: Option<u32>) -> bool {
    block_type == BlockType::Paragraph && toc_level.is_none()
}

fn title_page_pass(doc: &mut ParseResult, stats: &DocStats) {
    let base_h = stats.body_height as f32;
    let max_h = stats.max_height;
    let threshold = base_h + (max_h as f32 - base_h) / 4.0;

    let title_pages: HashSet<usize> = doc
        .pages
        .iter()
        .filter(|p| {
            p.blocks()
                .any(|b| b.lines.iter().any(|l| l.rounded_height() == max_h))
        })
        .map(|p| p.index)
        .collect();

    for page in &mut doc.pages {
        if !title_pages.contains(&page.index) {
            continue;
        }
        for item in &mut page.items {
            let Some(block) = item.as_block_mut() else {
                continue;
            };
            if !is_untyped(block.block_type, block.toc_level) || block.lines.is_empty() {
                continue;
            }
            let h = block.max_line_height();
            if h <= threshold {
                continue;
            }
            let text = block.text();
            // Oversized digits are chapter numbers, not headings.
            if is_digits(text.trim()) {
                continue;
            }
            block.block_type = if h.round() as i32 == max_h {
                BlockType::H1
            } else {
                BlockType::H2
            };
        }
    }
}

fn distinct_height_pass(doc: &mut ParseResult, stats: &DocStats) {
    let mut heights: HashSet<i32> = HashSet::new();
    for page in &doc.pages {
        for block in page.blocks() {
            for line in &block.lines {
                let rh = line.rounded_height();
                if rh > stats.body_height {
                    heights.insert(rh);
                }
            }
        }
    }
    // Max height is the title-page pass's territory.
    heights.remove(&stats.max_height);

    let mut ranked: Vec<i32> = heights.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked.truncate(4);
    if ranked.is_empty() {
        return;
    }
    log::debug!("distinct heading heights: {:?}", ranked);

    let level_for = |rh: i32| -> Option<BlockType> {
        ranked
            .iter()
            .position(|&h| h == rh)
            .map(|i| [BlockType::H2, BlockType::H3, BlockType::H4, BlockType::H5][i])
    };

    for page in &mut doc.pages {
        for item in &mut page.items {
            let Some(block) = item.as_block_mut() else {
                continue;
            };
            if !is_untyped(block.block_type, block.toc_level) || block.lines.is_empty() {
                continue;
            }
            let rh = block.max_line_height().round() as i32;
            if let Some(heading) = level_for(rh) {
                if !is_digits(block.text().trim()) {
                    block.block_type = heading;
                }
            }
        }
    }
}

fn all_caps_pass(doc: &mut ParseResult, stats: &DocStats) {
    let body_font = stats.body_font().to_string();

    // Deepest heading level assigned so far anywhere in the document.
    let mut deepest = 1u8;
    for page in &doc.pages {
        for block in page.blocks() {
            if let Some(level) = block.block_type.heading_level() {
                deepest = deepest.max(level);
            }
        }
    }
    if deepest >= 6 {
        return;
    }
    let next_type = BlockType::from_heading_level(deepest + 1);

    for page in &mut doc.pages {
        let mut prev_type: Option<BlockType> = None;
        for item in &mut page.items {
            let Some(block) = item.as_block_mut() else {
                prev_type = None;
                continue;
            };
            if is_untyped(block.block_type, block.toc_level) && !block.lines.is_empty() {
                let rh = block.max_line_height().round() as i32;
                let font = block.lines[0].font.clone();
                let text = block.text();
                let text = text.trim();
                let follows_break =
                    prev_type.map(|t| t != BlockType::Paragraph).unwrap_or(true);
                if rh == stats.body_height
                    && font != body_font
                    && is_all_uppercase(text)
                    && text.chars().count() < 100
                    && follows_break
                {
                    block.block_type = next_type;
                }
            }
            prev_type = Some(block.block_type);
        }
    }
}

fn style_signature_pass(doc: &mut ParseResult, stats: &DocStats) {
    let Some(primary) = stats.primary_style.clone() else {
        return;
    };

    for page in &mut doc.pages {
        for item in &mut page.items {
            let Some(block) = item.as_block_mut() else {
                continue;
            };
            if !is_untyped(block.block_type, block.toc_level) || block.lines.is_empty() {
                continue;
            }
            let h = block.max_line_height();
            if h.round() as i32 != primary.height {
                continue;
            }

            let font_differs = block.lines[0].font != primary.font;
            let color_differs = block.lines[0].color != primary.color;
            if !font_differs && !color_differs {
                continue;
            }

            let text = block.text();
            let len = text.chars().count();
            if len >= 150 {
                continue;
            }
            let is_short = len < 80;
            let is_single_line = block.lines.len() == 1;
            let bold_start = block.lines[0]
                .words
                .first()
                .map(|w| w.is_bold)
                .unwrap_or(false);

            if color_differs && is_short && is_single_line {
                block.block_type = BlockType::H4;
            } else if font_differs && bold_start && is_short && is_single_line {
                block.block_type = BlockType::H4;
            }
        }
    }
}
