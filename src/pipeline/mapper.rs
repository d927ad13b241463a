//! TOC-to-body heading mapping.

use super::{DocStats, Stage};
use crate::model::{BlockType, Page, ParseResult, TocEntry};
use crate::text::{normalize_for_match, word_match_score};

/// Word-overlap score a block must reach to match a TOC title.
const MATCH_THRESHOLD: f32 = 0.7;

/// How many leading TOC entries are tried when resolving the page offset.
const OFFSET_PROBES: usize = 3;

/// Locates the in-body headings named by the TOC and tags them.
///
/// TOC page numbers rarely equal physical page indices (cover pages, front
/// matter), so a single offset is resolved first by locating the text of
/// the first few entries in the document. Each entry is then searched for
/// on its target page via normalized containment or word overlap, with a
/// combined-with-next-block fallback for titles that wrap; the first
/// qualifying block takes the entry's level as H2-H5.
pub struct DocumentMapper;

impl Stage for DocumentMapper {
    fn name(&self) -> &'static str {
        "document_mapper"
    }

    fn apply(&self, doc: &mut ParseResult, _stats: &DocStats) {
        if doc.toc_entries.is_empty() {
            return;
        }

        let mut offset = 0i64;
        for entry in doc.toc_entries.iter().take(OFFSET_PROBES) {
            if let Some(found) = find_text_in_doc(doc, &entry.text) {
                offset = found as i64 - entry.page_num;
                break;
            }
        }
        doc.page_offset = offset;
        log::debug!("TOC page offset resolved to {}", offset);

        let entries = doc.toc_entries.clone();
        for entry in &entries {
            let target = entry.page_num + offset;
            if target < 0 || target as usize >= doc.pages.len() {
                continue;
            }
            tag_heading(&mut doc.pages[target as usize], entry);
        }
    }
}

/// Physical index of the first page containing the text, matching single
/// blocks first and block pairs for wrapped headings. TOC-typed blocks
/// are excluded — the entry would otherwise match its own TOC line.
fn find_text_in_doc(doc: &ParseResult, text: &str) -> Option<usize> {
    let target = normalize_for_match(text);
    for page in &doc.pages {
        let texts: Vec<String> = page
            .blocks()
            .filter(|b| b.block_type != BlockType::Toc)
            .map(|b| b.text())
            .collect();
        for (i, block_text) in texts.iter().enumerate() {
            if normalize_for_match(block_text).contains(&target) {
                return Some(page.index);
            }
            if let Some(next) = texts.get(i + 1) {
                let combined = format!("{block_text} {next}");
                if normalize_for_match(&combined).contains(&target) {
                    return Some(page.index);
                }
            }
        }
    }
    None
}

/// Tag the first block on the page matching the entry title.
fn tag_heading(page: &mut Page, entry: &TocEntry) {
    let target = normalize_for_match(&entry.text);

    let block_idxs: Vec<usize> = page
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            item.as_block()
                .map(|b| b.block_type != BlockType::Toc)
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect();
    let texts: Vec<String> = block_idxs
        .iter()
        .map(|&i| page.items[i].as_block().map(|b| b.text()).unwrap_or_default())
        .collect();

    let matches = |text: &str| {
        normalize_for_match(text).contains(&target)
            || word_match_score(&entry.text, text) > MATCH_THRESHOLD
    };

    let mut chosen: Option<usize> = None;
    for (i, text) in texts.iter().enumerate() {
        if matches(text) {
            chosen = Some(block_idxs[i]);
            break;
        }
        // Wrapped heading: the title may span this block and the next.
        if let Some(next) = texts.get(i + 1) {
            let combined = format!("{text} {next}");
            if matches(&combined) {
                chosen = Some(block_idxs[i]);
                break;
            }
        }
    }

    if let Some(idx) = chosen {
        if let Some(block) = page.items[idx].as_block_mut() {
            block.toc_level = Some(entry.level);
            block.block_type = heading_for_level(entry.level);
        }
    }
}

/// TOC level 0-3 maps to H2-H5; deeper levels clamp to H5.
fn heading_for_level(level: u32) -> BlockType {
    match level {
        0 => BlockType::H2,
        1 => BlockType::H3,
        2 => BlockType::H4,
        _ => BlockType::H5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineBlock, LineItem, PageItem, TocEntry, Word};

    fn block(text: &str) -> PageItem {
        PageItem::Block(LineBlock::from_lines(vec![LineItem::new(
            0.0,
            100.0,
            300.0,
            10.0,
            text.split(' ').map(Word::new).collect(),
        )]))
    }

    fn doc_with_heading_on_page(heading: &str, page_idx: usize, total: usize) -> ParseResult {
        let pages = (0..total)
            .map(|i| {
                let mut page = Page::new(i);
                if i == page_idx {
                    page.items.push(block(heading));
                }
                page.items.push(block("filler paragraph text"));
                page
            })
            .collect();
        ParseResult::from_pages(pages)
    }

    fn run(doc: &mut ParseResult) {
        DocumentMapper.apply(doc, &DocStats::default());
    }

    #[test]
    fn test_offset_and_tagging() {
        // Declared page 1, heading physically on page 3: offset 2.
        let mut doc = doc_with_heading_on_page("Introduction", 3, 5);
        doc.toc_entries = vec![TocEntry {
            text: "Introduction".to_string(),
            page_num: 1,
            level: 0,
        }];
        run(&mut doc);

        assert_eq!(doc.page_offset, 2);
        let tagged = doc.pages[3].items[0].as_block().unwrap();
        assert_eq!(tagged.block_type, BlockType::H2);
        assert_eq!(tagged.toc_level, Some(0));
    }

    #[test]
    fn test_level_maps_to_heading_depth() {
        let mut doc = doc_with_heading_on_page("Deep Section", 2, 4);
        doc.toc_entries = vec![TocEntry {
            text: "Deep Section".to_string(),
            page_num: 2,
            level: 2,
        }];
        run(&mut doc);
        assert_eq!(
            doc.pages[2].items[0].as_block().unwrap().block_type,
            BlockType::H4
        );
    }

    #[test]
    fn test_wrapped_heading_matches_combined_blocks() {
        let mut page0 = Page::new(0);
        page0.items.push(block("Advanced Layout"));
        page0.items.push(block("Reconstruction Techniques"));
        let mut doc = ParseResult::from_pages(vec![page0]);
        doc.toc_entries = vec![TocEntry {
            text: "Advanced Layout Reconstruction Techniques".to_string(),
            page_num: 0,
            level: 0,
        }];
        run(&mut doc);

        let first = doc.pages[0].items[0].as_block().unwrap();
        assert_eq!(first.block_type, BlockType::H2);
        // Only the first block of the pair is tagged.
        let second = doc.pages[0].items[1].as_block().unwrap();
        assert_eq!(second.block_type, BlockType::Paragraph);
    }

    #[test]
    fn test_unlocatable_entry_changes_nothing() {
        let mut doc = doc_with_heading_on_page("Real Heading", 1, 3);
        doc.toc_entries = vec![TocEntry {
            text: "Phantom Chapter".to_string(),
            page_num: 0,
            level: 0,
        }];
        run(&mut doc);

        assert_eq!(doc.page_offset, 0);
        for page in &doc.pages {
            for b in page.blocks() {
                assert_eq!(b.block_type, BlockType::Paragraph);
            }
        }
    }

    #[test]
    fn test_word_overlap_match() {
        // "Results and Discussion Section" vs body "Results and Discussion"
        // shares 3 of max(4, 3) = 0.75 > 0.7.
        let mut doc = doc_with_heading_on_page("Results and Discussion", 0, 2);
        doc.toc_entries = vec![TocEntry {
            text: "Results and Discussion Section".to_string(),
            page_num: 0,
            level: 1,
        }];
        run(&mut doc);
        assert_eq!(
            doc.pages[0].items[0].as_block().unwrap().block_type,
            BlockType::H3
        );
    }
}
