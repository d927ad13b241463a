//! Code-block detection.

use super::{DocStats, Stage};
use crate::model::{BlockType, ParseResult};

/// Indentation past the page minimum X required of every line.
const INDENT: i32 = 30;

/// Font-family substrings that identify monospace text.
const MONO_PATTERNS: &[&str] = &[
    "mono",
    "courier",
    "consolas",
    "menlo",
    "dejavu",
    "source code",
    "fira code",
];

/// Reclassifies indented small-font or monospace paragraphs as code.
///
/// Conservative on purpose: in multi-column layouts a whole right-hand
/// column can look "indented" relative to the page, so indentation alone
/// never qualifies. Every line must be clear of the top-12.5% zone
/// (running headers), indented more than 30 units past the page minimum,
/// and either uniformly smaller than body text or set in a monospace
/// family. One non-conforming line disqualifies the block.
pub struct CodeBlockDetector;

impl Stage for CodeBlockDetector {
    fn name(&self) -> &'static str {
        "code_block_detector"
    }

    fn apply(&self, doc: &mut ParseResult, stats: &DocStats) {
        let base_h = stats.body_height as f32;
        let top_zone = stats.page_height / 8.0;

        for page in &mut doc.pages {
            let page_min_x = page
                .blocks()
                .flat_map(|b| b.lines.iter().map(|l| l.rounded_x()))
                .min();
            let Some(min_x) = page_min_x else {
                continue;
            };
            let indent_threshold = min_x + INDENT;

            for item in &mut page.items {
                let Some(block) = item.as_block_mut() else {
                    continue;
                };
                if block.block_type != BlockType::Paragraph || block.lines.is_empty() {
                    continue;
                }
                if block.lines[0].y < top_zone {
                    continue;
                }

                let is_indented = block
                    .lines
                    .iter()
                    .all(|l| l.rounded_x() > indent_threshold);
                if !is_indented {
                    continue;
                }

                let is_small_font = block.lines.iter().all(|l| l.height < base_h - 1.0);
                let is_monospace = block.lines.iter().any(|l| {
                    let font = l.font.to_lowercase();
                    MONO_PATTERNS.iter().any(|p| font.contains(p))
                });

                if is_small_font || is_monospace {
                    block.block_type = BlockType::Code;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineBlock, LineItem, Page, PageItem, Word};

    fn line(x: f32, y: f32, height: f32, text: &str, font: &str) -> LineItem {
        LineItem::with_font(
            x,
            y,
            200.0,
            height,
            text.split(' ').map(Word::new).collect(),
            font,
        )
    }

    fn stats() -> DocStats {
        DocStats {
            body_height: 10,
            page_height: 800.0,
            ..DocStats::default()
        }
    }

    fn page_with_blocks(blocks: Vec<Vec<LineItem>>) -> Page {
        let mut page = Page::new(0);
        for lines in blocks {
            page.items
                .push(PageItem::Block(LineBlock::from_lines(lines)));
        }
        page
    }

    fn detect(page: Page) -> Page {
        let mut doc = ParseResult::from_pages(vec![page]);
        CodeBlockDetector.apply(&mut doc, &stats());
        doc.pages.remove(0)
    }

    #[test]
    fn test_indented_small_font_is_code() {
        let page = page_with_blocks(vec![
            vec![line(0.0, 200.0, 10.0, "normal paragraph", "Serif")],
            vec![
                line(40.0, 300.0, 8.0, "let x = 1;", "Serif"),
                line(40.0, 312.0, 8.0, "let y = 2;", "Serif"),
            ],
        ]);
        let page = detect(page);

        assert_eq!(
            page.items[0].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
        assert_eq!(page.items[1].as_block().unwrap().block_type, BlockType::Code);
    }

    #[test]
    fn test_indented_monospace_is_code() {
        let page = page_with_blocks(vec![
            vec![line(0.0, 200.0, 10.0, "intro", "Serif")],
            vec![line(40.0, 300.0, 10.0, "print(x)", "DejaVu Sans Mono")],
        ]);
        let page = detect(page);
        assert_eq!(page.items[1].as_block().unwrap().block_type, BlockType::Code);
    }

    #[test]
    fn test_indentation_alone_is_not_code() {
        // Body-size serif text that merely sits to the right (e.g. a
        // second column) stays a paragraph.
        let page = page_with_blocks(vec![
            vec![line(0.0, 200.0, 10.0, "left column", "Serif")],
            vec![line(300.0, 200.0, 10.0, "right column", "Serif")],
        ]);
        let page = detect(page);
        assert_eq!(
            page.items[1].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
    }

    #[test]
    fn test_one_unindented_line_disqualifies() {
        let page = page_with_blocks(vec![
            vec![line(0.0, 200.0, 10.0, "margin setter", "Serif")],
            vec![
                line(40.0, 300.0, 8.0, "indented", "Serif"),
                line(5.0, 312.0, 8.0, "back at margin", "Serif"),
            ],
        ]);
        let page = detect(page);
        assert_eq!(
            page.items[1].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
    }

    #[test]
    fn test_top_zone_excluded() {
        // page_height 800 → top zone is y < 100.
        let page = page_with_blocks(vec![
            vec![line(0.0, 500.0, 10.0, "margin setter", "Serif")],
            vec![line(40.0, 50.0, 8.0, "running header", "Serif")],
        ]);
        let page = detect(page);
        assert_eq!(
            page.items[1].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
    }
}
