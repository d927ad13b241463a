//! Table-of-contents detection.

use regex::Regex;

use super::{DocStats, Stage};
use crate::model::{BlockType, ParseResult, TocEntry};
use crate::text::is_all_uppercase;

/// TOCs live in the front matter; pages past this index are never scanned.
const TOC_PAGE_LIMIT: usize = 20;

/// Finds TOC-pattern lines and builds the level-annotated entry list.
///
/// A TOC line carries a dot leader (`...` or spaced dots) and a trailing
/// page number; the title is the line with the leader and number stripped.
/// A single-line block immediately before a match — not very short, not
/// all-uppercase — is treated as the first half of a wrapped two-line
/// entry and prefixed onto the match's title. Nesting levels come from the
/// rank of each entry's left indentation among that page's entries.
pub struct TocDetector;

impl Stage for TocDetector {
    fn name(&self) -> &'static str {
        "toc_detector"
    }

    fn apply(&self, doc: &mut ParseResult, _stats: &DocStats) {
        let spaced_dots = Regex::new(r"\.\s?\.\s?\.").unwrap();
        let trailing_number = Regex::new(r"(\d+)$").unwrap();
        let leader_suffix = Regex::new(r"[\.\d\s]+$").unwrap();

        let mut entries: Vec<TocEntry> = Vec::new();

        for page in doc.pages.iter_mut().take(TOC_PAGE_LIMIT) {
            // (item index, title, declared page number)
            let mut matches: Vec<(usize, String, i64)> = Vec::new();
            let mut title_stash: Option<String> = None;

            for (idx, item) in page.items.iter_mut().enumerate() {
                let Some(block) = item.as_block_mut() else {
                    continue;
                };
                let text = block.text();

                let has_dots = text.contains("...") || spaced_dots.is_match(&text);
                let page_num = trailing_number
                    .captures(text.trim())
                    .and_then(|c| c[1].parse::<i64>().ok());

                match (has_dots, page_num) {
                    (true, Some(page_num)) => {
                        let mut title = leader_suffix.replace(&text, "").trim().to_string();
                        if let Some(stash) = title_stash.take() {
                            title = format!("{stash} {title}");
                        }
                        block.block_type = BlockType::Toc;
                        matches.push((idx, title, page_num));
                    }
                    _ => {
                        // Candidate first half of a wrapped two-line entry.
                        if block.lines.len() == 1
                            && text.chars().count() > 3
                            && !is_all_uppercase(&text)
                        {
                            title_stash = Some(text);
                        }
                    }
                }
            }

            if matches.is_empty() {
                continue;
            }

            // Indentation rank within this page's entries gives the level.
            let mut unique_x: Vec<i32> = matches
                .iter()
                .filter_map(|(idx, _, _)| page.items[*idx].as_block())
                .filter_map(|b| b.lines.first().map(|l| l.rounded_x()))
                .collect();
            unique_x.sort_unstable();
            unique_x.dedup();

            log::debug!(
                "page {}: {} TOC entries across {} indent levels",
                page.index,
                matches.len(),
                unique_x.len()
            );

            for (idx, title, page_num) in matches {
                let x = page.items[idx]
                    .as_block()
                    .and_then(|b| b.lines.first())
                    .map(|l| l.rounded_x())
                    .unwrap_or(0);
                let level = unique_x.iter().position(|&u| u == x).unwrap_or(0) as u32;
                entries.push(TocEntry {
                    text: title,
                    page_num,
                    level,
                });
            }
        }

        doc.toc_entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineBlock, LineItem, Page, PageItem, Word};

    fn block(x: f32, y: f32, text: &str) -> PageItem {
        PageItem::Block(LineBlock::from_lines(vec![LineItem::new(
            x,
            y,
            300.0,
            10.0,
            text.split(' ').map(Word::new).collect(),
        )]))
    }

    fn detect(pages: Vec<Page>) -> ParseResult {
        let mut doc = ParseResult::from_pages(pages);
        TocDetector.apply(&mut doc, &DocStats::default());
        doc
    }

    #[test]
    fn test_dot_leader_entry() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "Introduction .......... 5"));
        let doc = detect(vec![page]);

        assert_eq!(doc.toc_entries.len(), 1);
        let entry = &doc.toc_entries[0];
        assert_eq!(entry.text, "Introduction");
        assert_eq!(entry.page_num, 5);
        assert_eq!(entry.level, 0);
        assert_eq!(
            doc.pages[0].items[0].as_block().unwrap().block_type,
            BlockType::Toc
        );
    }

    #[test]
    fn test_spaced_dots_entry() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "Methods . . . . . 12"));
        let doc = detect(vec![page]);
        assert_eq!(doc.toc_entries.len(), 1);
        assert_eq!(doc.toc_entries[0].text, "Methods");
        assert_eq!(doc.toc_entries[0].page_num, 12);
    }

    #[test]
    fn test_indentation_ranks_levels() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "Chapter One ...... 3"));
        page.items.push(block(20.0, 112.0, "First Section ...... 4"));
        page.items.push(block(20.0, 124.0, "Second Section ...... 6"));
        let doc = detect(vec![page]);

        let levels: Vec<u32> = doc.toc_entries.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![0, 1, 1]);
    }

    #[test]
    fn test_wrapped_entry_uses_stash() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "A Very Long Chapter Title"));
        page.items.push(block(0.0, 112.0, "Continued Here ...... 9"));
        let doc = detect(vec![page]);

        assert_eq!(doc.toc_entries.len(), 1);
        assert_eq!(
            doc.toc_entries[0].text,
            "A Very Long Chapter Title Continued Here"
        );
    }

    #[test]
    fn test_uppercase_block_not_stashed() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "CONTENTS"));
        page.items.push(block(0.0, 112.0, "Introduction ...... 5"));
        let doc = detect(vec![page]);
        assert_eq!(doc.toc_entries[0].text, "Introduction");
    }

    #[test]
    fn test_plain_text_not_matched() {
        let mut page = Page::new(0);
        page.items.push(block(0.0, 100.0, "Just a paragraph of prose."));
        let doc = detect(vec![page]);
        assert!(doc.toc_entries.is_empty());
    }

    #[test]
    fn test_late_pages_not_scanned() {
        let mut pages: Vec<Page> = (0..21).map(Page::new).collect();
        pages[20]
            .items
            .push(block(0.0, 100.0, "Too Late ...... 99"));
        let doc = detect(pages);
        assert!(doc.toc_entries.is_empty());
    }
}
