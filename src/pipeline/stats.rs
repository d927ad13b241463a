//! Document-wide typographic statistics.
//!
//! Computed once over every raw line before any other stage runs; all
//! later heuristics key off these baselines. The struct is immutable after
//! construction — stages receive a shared reference only.

use std::collections::HashMap;

use crate::model::{LineItem, PageItem, ParseResult};

/// The `(height, font, color)` triple identifying body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSignature {
    /// Rounded line height
    pub height: i32,
    /// Font name
    pub font: String,
    /// Integer-packed RGB color
    pub color: u32,
}

/// Document-wide typographic baselines.
#[derive(Debug, Clone, PartialEq)]
pub struct DocStats {
    /// Most frequent rounded line height (body text size)
    pub body_height: i32,

    /// Largest rounded line height in the document
    pub max_height: i32,

    /// Font of the first line at `max_height`
    pub max_height_font: String,

    /// Most frequent vertical gap between consecutive body-height lines
    pub body_distance: f32,

    /// Minimum rounded X across the document (left margin)
    pub min_x: i32,

    /// Estimated page height (max Y plus margin), for zone heuristics
    pub page_height: f32,

    /// Most frequent (height, font, color) triple — the body text style.
    /// `None` when the document has no lines (degraded mode: downstream
    /// style heuristics cannot fire).
    pub primary_style: Option<StyleSignature>,
}

impl Default for DocStats {
    fn default() -> Self {
        Self {
            body_height: 10,
            max_height: 10,
            max_height_font: String::new(),
            body_distance: 12.0,
            min_x: 0,
            page_height: 842.0,
            primary_style: None,
        }
    }
}

impl DocStats {
    /// Aggregate statistics over every raw line in the document.
    ///
    /// A document with no lines keeps the defaults unchanged; that is the
    /// explicit degraded mode, not an error.
    pub fn compute(result: &ParseResult) -> Self {
        let lines: Vec<&LineItem> = result.all_lines().collect();
        if lines.is_empty() {
            return Self::default();
        }

        let mut stats = Self::default();

        let mut height_counts: HashMap<i32, usize> = HashMap::new();
        for line in &lines {
            *height_counts.entry(line.rounded_height()).or_insert(0) += 1;
        }
        stats.body_height = most_frequent(&height_counts).unwrap_or(stats.body_height);
        stats.max_height = lines
            .iter()
            .map(|l| l.rounded_height())
            .max()
            .unwrap_or(stats.body_height);
        stats.max_height_font = lines
            .iter()
            .find(|l| l.rounded_height() == stats.max_height)
            .map(|l| l.font.clone())
            .unwrap_or_default();

        stats.body_distance = body_distance(result, stats.body_height);

        stats.min_x = lines
            .iter()
            .map(|l| l.rounded_x())
            .min()
            .unwrap_or(stats.min_x);
        let max_y = lines
            .iter()
            .map(|l| l.y.round() as i32)
            .max()
            .unwrap_or(0);
        stats.page_height = (max_y + 100) as f32;

        let mut sig_counts: HashMap<(i32, &str, u32), usize> = HashMap::new();
        for line in &lines {
            *sig_counts
                .entry((line.rounded_height(), line.font.as_str(), line.color))
                .or_insert(0) += 1;
        }
        stats.primary_style = most_frequent(&sig_counts).map(|(height, font, color)| {
            StyleSignature {
                height,
                font: font.to_string(),
                color,
            }
        });

        log::debug!(
            "stats: body_height={} max_height={} body_distance={} min_x={} page_height={}",
            stats.body_height,
            stats.max_height,
            stats.body_distance,
            stats.min_x,
            stats.page_height,
        );

        stats
    }

    /// Font name of the primary style signature, or "" without one.
    pub fn body_font(&self) -> &str {
        self.primary_style
            .as_ref()
            .map(|s| s.font.as_str())
            .unwrap_or("")
    }
}

/// Most frequent vertical gap between consecutive body-height lines.
///
/// The consecutive-pair tracker resets whenever a non-body line (or a
/// table) interrupts the run, so heading-to-body gaps never pollute the
/// histogram. Gaps outside `(0, 4 × body_height)` are noise and excluded.
fn body_distance(result: &ParseResult, body_height: i32) -> f32 {
    let mut dist_counts: HashMap<i32, usize> = HashMap::new();

    for page in &result.pages {
        let mut last_body: Option<&LineItem> = None;
        for item in &page.items {
            let line = match item {
                PageItem::Line(line) => line,
                _ => {
                    last_body = None;
                    continue;
                }
            };
            if line.rounded_height() == body_height && !line.text().trim().is_empty() {
                if let Some(last) = last_body {
                    let d = (line.y - last.y).round() as i32;
                    if d > 0 && d < body_height * 4 {
                        *dist_counts.entry(d).or_insert(0) += 1;
                    }
                }
                last_body = Some(line);
            } else {
                last_body = None;
            }
        }
    }

    most_frequent(&dist_counts)
        .map(|d| d as f32)
        .unwrap_or(body_height as f32 * 1.2)
}

/// Highest-count key; ties break toward the smaller key for determinism.
fn most_frequent<K: Ord + Clone>(counts: &HashMap<K, usize>) -> Option<K> {
    counts
        .iter()
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(k, _)| k.clone())
}
