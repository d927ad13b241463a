//! Vertical-text detection.

use super::{DocStats, Stage};
use crate::model::{LineItem, PageItem, ParseResult, Word};

/// How closely the X positions of stacked characters must agree.
const X_TOLERANCE: f32 = 3.0;

/// Minimum run length before stacked characters are merged. Shorter runs
/// are far more likely to be incidental same-column fragments.
const MIN_RUN: usize = 4;

/// Collapses vertically stacked single-character lines into one
/// horizontal line.
///
/// Sideways captions and spine text extract as a column of one-character
/// lines; a run of four or more x-aligned single characters is replaced by
/// a synthetic line at the first character's position, reading top to
/// bottom.
pub struct VerticalTextMerger;

impl Stage for VerticalTextMerger {
    fn name(&self) -> &'static str {
        "vertical_text_merger"
    }

    fn apply(&self, doc: &mut ParseResult, _stats: &DocStats) {
        for page in &mut doc.pages {
            let items = std::mem::take(&mut page.items);
            let mut merged: Vec<PageItem> = Vec::with_capacity(items.len());
            let mut run: Vec<LineItem> = Vec::new();

            for item in items {
                match item {
                    PageItem::Line(line) if is_single_char(&line) => {
                        let aligned = run
                            .last()
                            .map(|prev| (line.x - prev.x).abs() < X_TOLERANCE)
                            .unwrap_or(true);
                        if aligned {
                            run.push(line);
                        } else {
                            flush_run(&mut merged, std::mem::take(&mut run));
                            run.push(line);
                        }
                    }
                    other => {
                        flush_run(&mut merged, std::mem::take(&mut run));
                        merged.push(other);
                    }
                }
            }
            flush_run(&mut merged, run);
            page.items = merged;
        }
    }
}

fn is_single_char(line: &LineItem) -> bool {
    line.text().trim().chars().count() == 1
}

/// Emit a run: merged into one synthetic line when long enough, otherwise
/// passed through unchanged.
fn flush_run(out: &mut Vec<PageItem>, run: Vec<LineItem>) {
    if run.len() < MIN_RUN {
        out.extend(run.into_iter().map(PageItem::Line));
        return;
    }

    let text: String = run.iter().map(|l| l.text().trim().to_string()).collect();
    let first = &run[0];
    log::debug!("merging vertical run of {} chars: {:?}", run.len(), text);
    out.push(PageItem::Line(LineItem::with_font(
        first.x,
        first.y,
        10.0,
        first.height,
        vec![Word::new(text)],
        first.font.clone(),
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn char_line(x: f32, y: f32, c: &str) -> LineItem {
        LineItem::new(x, y, 10.0, 10.0, vec![Word::new(c)])
    }

    fn run_stage(page: Page) -> Page {
        let mut doc = ParseResult::from_pages(vec![page]);
        VerticalTextMerger.apply(&mut doc, &DocStats::default());
        doc.pages.remove(0)
    }

    #[test]
    fn test_merges_long_run() {
        let mut page = Page::new(0);
        for (i, c) in ["S", "I", "D", "E"].iter().enumerate() {
            page.add_line(char_line(20.0, 40.0 + i as f32 * 12.0, c));
        }
        let page = run_stage(page);

        assert_eq!(page.items.len(), 1);
        let line = page.items[0].as_line().unwrap();
        assert_eq!(line.text(), "SIDE");
        assert_eq!(line.x, 20.0);
        assert_eq!(line.y, 40.0);
    }

    #[test]
    fn test_short_run_passes_through() {
        let mut page = Page::new(0);
        for (i, c) in ["A", "B", "C"].iter().enumerate() {
            page.add_line(char_line(20.0, 40.0 + i as f32 * 12.0, c));
        }
        let page = run_stage(page);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_misaligned_char_breaks_run() {
        let mut page = Page::new(0);
        for (i, c) in ["S", "I", "D"].iter().enumerate() {
            page.add_line(char_line(20.0, 40.0 + i as f32 * 12.0, c));
        }
        // 8 units to the right: outside the 3-unit tolerance
        page.add_line(char_line(28.0, 76.0, "E"));
        let page = run_stage(page);
        assert_eq!(page.items.len(), 4);
    }

    #[test]
    fn test_normal_lines_untouched() {
        let mut page = Page::new(0);
        page.add_line(LineItem::new(
            0.0,
            10.0,
            80.0,
            10.0,
            vec![Word::new("normal"), Word::new("text")],
        ));
        let page = run_stage(page);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].as_line().unwrap().text(), "normal text");
    }
}
