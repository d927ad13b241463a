//! Running header/footer removal.

use std::collections::{HashMap, HashSet};

use super::{DocStats, Stage};
use crate::model::{PageItem, ParseResult};
use crate::text::is_digits;

/// Share of pages on which a first/last line must recur to be stripped.
const CLASSIC_THRESHOLD: f32 = 0.6;

/// Share of pages for the zone pass, which catches alternating headers.
const ZONE_THRESHOLD: f32 = 0.3;

/// Vertical extent of the top running-header zone.
const TOP_ZONE: f32 = 50.0;

/// Strips text repeated across pages at fixed positions.
///
/// Two independent passes. The classic pass removes any text recurring as
/// a page's first or last line on 60% or more of pages. The zone pass
/// removes top-zone text recurring on 30% or more of pages (minimum 2),
/// catching headers that alternate between recto and verso and therefore
/// never reach the single-position 60% bar.
pub struct RepetitiveElementRemover;

impl Stage for RepetitiveElementRemover {
    fn name(&self) -> &'static str {
        "repetitive_element_remover"
    }

    fn apply(&self, doc: &mut ParseResult, _stats: &DocStats) {
        let n_pages = doc.pages.len();
        if n_pages < 2 {
            return;
        }

        if n_pages >= 3 {
            classic_pass(doc, n_pages);
        }
        zone_pass(doc, n_pages);
    }
}

/// Remove first/last lines whose text recurs on most pages.
fn classic_pass(doc: &mut ParseResult, n_pages: usize) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for page in &doc.pages {
        let lines: Vec<_> = page.lines().collect();
        if let Some(first) = lines.first() {
            *counts.entry(first.text()).or_insert(0) += 1;
        }
        if let Some(last) = lines.last() {
            *counts.entry(last.text()).or_insert(0) += 1;
        }
    }

    let threshold = n_pages as f32 * CLASSIC_THRESHOLD;
    let to_strip: HashSet<String> = counts
        .into_iter()
        .filter(|(_, c)| *c as f32 >= threshold)
        .map(|(t, _)| t)
        .collect();
    if to_strip.is_empty() {
        return;
    }
    log::debug!("classic pass stripping {} repeated texts", to_strip.len());

    for page in &mut doc.pages {
        if let Some(pos) = page.items.iter().position(PageItem::is_line) {
            if let Some(line) = page.items[pos].as_line() {
                if to_strip.contains(&line.text()) {
                    page.items.remove(pos);
                }
            }
        }
        if let Some(pos) = page.items.iter().rposition(PageItem::is_line) {
            if let Some(line) = page.items[pos].as_line() {
                if to_strip.contains(&line.text()) {
                    page.items.remove(pos);
                }
            }
        }
    }
}

/// Remove top-zone text recurring on enough pages, digits excluded
/// (the page-number detector already handled those).
fn zone_pass(doc: &mut ParseResult, n_pages: usize) {
    let mut zone_pages: HashMap<String, HashSet<usize>> = HashMap::new();
    for page in &doc.pages {
        for line in page.lines() {
            if line.y >= TOP_ZONE {
                continue;
            }
            let Some(norm) = normalize_zone_text(&line.text()) else {
                continue;
            };
            zone_pages.entry(norm).or_default().insert(page.index);
        }
    }

    let threshold = (n_pages as f32 * ZONE_THRESHOLD).max(2.0);
    let to_remove: HashSet<String> = zone_pages
        .into_iter()
        .filter(|(_, pages)| pages.len() as f32 >= threshold)
        .map(|(t, _)| t)
        .collect();
    if to_remove.is_empty() {
        return;
    }
    log::debug!("zone pass stripping {} repeated texts", to_remove.len());

    for page in &mut doc.pages {
        page.items.retain(|item| match item {
            PageItem::Line(line) if line.y < TOP_ZONE => normalize_zone_text(&line.text())
                .map(|norm| !to_remove.contains(&norm))
                .unwrap_or(true),
            _ => true,
        });
    }
}

/// Normalized zone text: Unicode spacing stripped, trimmed. `None` when
/// the text is too short, empty after stripping, or purely numeric.
fn normalize_zone_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.chars().count() < 2 {
        return None;
    }
    let norm: String = text
        .chars()
        .filter(|c| !(('\u{2000}'..='\u{200B}').contains(c) || *c == '\t' || *c == '\u{00A0}'))
        .collect();
    let norm = norm.trim().to_string();
    if norm.is_empty() || is_digits(&norm) {
        None
    } else {
        Some(norm)
    }
}
