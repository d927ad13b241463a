//! Footnote-definition detection and splitting.

use regex::Regex;

use super::{DocStats, Stage};
use crate::model::{BlockType, FootnoteRef, LineBlock, LineItem, PageItem, ParseResult};
use crate::text::is_digits;

/// Fraction of the page's observed extent above which footnotes start.
const ZONE_FRACTION: f32 = 0.85;

/// How far below body height a line must be to count as footnote-sized.
const SMALL_FONT_MARGIN: f32 = 0.5;

/// Detects footnote-definition blocks and splits merged definitions.
///
/// A block qualifies as a candidate by position (bottom 15% of the page's
/// observed extent) or by font (noticeably smaller than body text, which
/// catches dense mid-page footnote clusters). Candidates must open with a
/// footnote-number pattern — `(N)` or `N.` or `N` followed by text — to be
/// accepted. The block gatherer happily merges adjacent footnotes into one
/// block, so accepted blocks are re-split wherever an interior line starts
/// its own footnote number.
///
/// In-text superscript digit references are recorded as [`FootnoteRef`]s
/// while scanning; the renderer turns them into `[^n]` anchors.
pub struct FootnoteLinker;

impl Stage for FootnoteLinker {
    fn name(&self) -> &'static str {
        "footnote_linker"
    }

    fn apply(&self, doc: &mut ParseResult, stats: &DocStats) {
        let fn_start = Regex::new(r"^\(?\d{1,3}\)?\s+\S").unwrap();
        let fn_match = Regex::new(r"^\(?(\d{1,3})\)?\.?\s+(.+)").unwrap();
        let base_h = stats.body_height as f32;

        collect_superscript_refs(doc);

        for page in &mut doc.pages {
            let Some(max_y) = page
                .blocks()
                .filter_map(|b| b.lines.last().map(|l| l.y))
                .reduce(f32::max)
            else {
                continue;
            };
            let page_height = if max_y > 0.0 { max_y } else { 800.0 };
            let zone_y = page_height * ZONE_FRACTION;

            let items = std::mem::take(&mut page.items);
            let mut rebuilt: Vec<PageItem> = Vec::with_capacity(items.len());

            for item in items {
                let block = match item {
                    PageItem::Block(block) if !block.lines.is_empty() => block,
                    other => {
                        rebuilt.push(other);
                        continue;
                    }
                };

                let in_zone = block.lines[0].y >= zone_y;
                let small_font = block.lines[0].height < base_h - SMALL_FONT_MARGIN;
                if !in_zone && !small_font {
                    rebuilt.push(PageItem::Block(block));
                    continue;
                }

                let text = block.text();
                if !fn_match.is_match(text.trim()) {
                    rebuilt.push(PageItem::Block(block));
                    continue;
                }

                for mut piece in split_footnotes(block, &fn_start) {
                    piece.block_type = BlockType::Footnote;
                    rebuilt.push(PageItem::Block(piece));
                }
            }
            page.items = rebuilt;
        }
    }
}

/// Record superscript digit words as footnote references.
fn collect_superscript_refs(doc: &mut ParseResult) {
    let mut refs: Vec<FootnoteRef> = Vec::new();
    for page in &doc.pages {
        let mut line_index = 0usize;
        for block in page.blocks() {
            for line in &block.lines {
                for word in &line.words {
                    if word.is_superscript && is_digits(&word.text) {
                        refs.push(FootnoteRef {
                            number: word.text.clone(),
                            page_index: page.index,
                            line_index,
                        });
                    }
                }
                line_index += 1;
            }
        }
    }
    doc.footnote_refs = refs;
}

/// Split a block at every interior line opening a new footnote number.
fn split_footnotes(block: LineBlock, fn_start: &Regex) -> Vec<LineBlock> {
    let mut groups: Vec<Vec<LineItem>> = Vec::new();
    let mut current: Vec<LineItem> = Vec::new();

    for line in &block.lines {
        let text = line.text();
        if !current.is_empty() && fn_start.is_match(text.trim()) {
            groups.push(std::mem::take(&mut current));
        }
        current.push(line.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }

    if groups.len() <= 1 {
        return vec![block];
    }
    log::debug!("splitting merged footnote block into {}", groups.len());

    groups
        .into_iter()
        .map(|lines| LineBlock {
            lines,
            block_type: block.block_type,
            indent_level: block.indent_level,
            toc_level: block.toc_level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, Page, Word};

    fn line(y: f32, height: f32, text: &str) -> LineItem {
        LineItem::new(
            50.0,
            y,
            300.0,
            height,
            text.split(' ').map(Word::new).collect(),
        )
    }

    fn stats() -> DocStats {
        DocStats {
            body_height: 10,
            ..DocStats::default()
        }
    }

    fn run(page: Page) -> Page {
        let mut doc = ParseResult::from_pages(vec![page]);
        FootnoteLinker.apply(&mut doc, &stats());
        doc.pages.remove(0)
    }

    #[test]
    fn test_zone_footnote_accepted() {
        let mut page = Page::new(0);
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(100.0, 10.0, "body paragraph up top"),
        ])));
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(780.0, 8.0, "1. A footnote at the bottom"),
        ])));
        let page = run(page);

        assert_eq!(
            page.items[1].as_block().unwrap().block_type,
            BlockType::Footnote
        );
        assert_eq!(
            page.items[0].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
    }

    #[test]
    fn test_small_font_mid_page_accepted() {
        let mut page = Page::new(0);
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(300.0, 8.0, "(2) small-font note in the middle"),
        ])));
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(700.0, 10.0, "closing body paragraph"),
        ])));
        let page = run(page);
        assert_eq!(
            page.items[0].as_block().unwrap().block_type,
            BlockType::Footnote
        );
    }

    #[test]
    fn test_candidate_without_number_kept() {
        let mut page = Page::new(0);
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(100.0, 10.0, "body paragraph up top"),
        ])));
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(780.0, 8.0, "just a caption, no number"),
        ])));
        let page = run(page);
        assert_eq!(
            page.items[1].as_block().unwrap().block_type,
            BlockType::Paragraph
        );
    }

    #[test]
    fn test_merged_footnotes_split() {
        let mut page = Page::new(0);
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(100.0, 10.0, "body paragraph up top"),
        ])));
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            line(760.0, 8.0, "14 First footnote text"),
            line(770.0, 8.0, "continues on a second line"),
            line(780.0, 8.0, "15 Second footnote text"),
            line(790.0, 8.0, "16 Third footnote text"),
        ])));
        let page = run(page);

        let footnotes: Vec<_> = page
            .blocks()
            .filter(|b| b.block_type == BlockType::Footnote)
            .collect();
        assert_eq!(footnotes.len(), 3);
        assert_eq!(footnotes[0].lines.len(), 2);
        assert_eq!(footnotes[1].lines.len(), 1);
        assert_eq!(footnotes[2].lines.len(), 1);
    }

    #[test]
    fn test_superscript_refs_collected() {
        let mut page = Page::new(0);
        let mut words = vec![Word::new("cited"), Word::new("here")];
        words.push(Word {
            text: "3".to_string(),
            is_superscript: true,
            ..Default::default()
        });
        page.items.push(PageItem::Block(LineBlock::from_lines(vec![
            LineItem::new(50.0, 100.0, 300.0, 10.0, words),
        ])));
        let mut doc = ParseResult::from_pages(vec![page]);
        FootnoteLinker.apply(&mut doc, &stats());

        assert_eq!(doc.footnote_refs.len(), 1);
        assert_eq!(doc.footnote_refs[0].number, "3");
        assert_eq!(doc.footnote_refs[0].page_index, 0);
    }
}
