//! Running page-number detection.

use std::collections::BTreeMap;

use super::{DocStats, Stage};
use crate::model::{PageItem, ParseResult};
use crate::text::is_digits;

/// Finds and strips running page-number annotations.
///
/// Numeric-only lines in the top or bottom sixth of the page are candidate
/// page numbers. A single offset `o` with `printed = physical_index + o`
/// must hold for a run of consecutive candidate pages (at least 3, or the
/// page count for shorter documents) before anything is removed; the
/// longest run wins. With no consistent sequence the stage removes nothing.
pub struct PageNumberDetector;

impl Stage for PageNumberDetector {
    fn name(&self) -> &'static str {
        "page_number_detector"
    }

    fn apply(&self, doc: &mut ParseResult, stats: &DocStats) {
        if doc.pages.is_empty() {
            return;
        }

        let top_zone = stats.page_height / 6.0;
        let bottom_zone = stats.page_height * 5.0 / 6.0;

        // Physical page index -> printed numbers found in the zones.
        let mut candidates: BTreeMap<usize, Vec<i64>> = BTreeMap::new();
        for page in &doc.pages {
            let numbers: Vec<i64> = page
                .lines()
                .filter(|line| line.y < top_zone || line.y > bottom_zone)
                .filter_map(|line| {
                    let text = line.text();
                    let text = text.trim();
                    if is_digits(text) {
                        text.parse().ok()
                    } else {
                        None
                    }
                })
                .collect();
            if !numbers.is_empty() {
                candidates.insert(page.index, numbers);
            }
        }

        let Some(offset) = find_offset(&candidates) else {
            log::debug!("no consistent page-number sequence found");
            return;
        };
        log::debug!("page-number offset resolved to {}", offset);

        for page in &mut doc.pages {
            let expected = (page.index as i64 + offset).to_string();
            page.items.retain(|item| match item {
                PageItem::Line(line) => {
                    !(line.text().trim() == expected && (line.y < top_zone || line.y > bottom_zone))
                }
                _ => true,
            });
        }
    }
}

/// Search for the offset holding over the longest run of consecutive
/// candidate pages. Ties keep the first offset found.
fn find_offset(candidates: &BTreeMap<usize, Vec<i64>>) -> Option<i64> {
    let keys: Vec<usize> = candidates.keys().copied().collect();
    let min_required = 3.min(keys.len());

    let mut best: Option<i64> = None;
    let mut best_len = 0usize;

    for (start, &idx1) in keys.iter().enumerate() {
        for &n1 in &candidates[&idx1] {
            let offset = n1 - idx1 as i64;
            let mut run = 1usize;
            for &idx2 in &keys[start + 1..] {
                let expected = idx2 as i64 + offset;
                if candidates[&idx2].contains(&expected) {
                    run += 1;
                } else {
                    break;
                }
            }
            if run >= min_required && run > best_len {
                best_len = run;
                best = Some(offset);
            }
        }
    }

    best
}
