//! Line-level types.

use serde::{Deserialize, Serialize};

use super::Word;

/// One geometric text line: an ordered run of words sharing a baseline.
///
/// `height` doubles as the font-size proxy for all typographic heuristics.
/// Coordinates grow rightward (x) and downward (y). Lines are created once
/// by the extraction collaborator; the only stage that replaces them is the
/// vertical-text merger, which substitutes a whole synthetic line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Left edge
    pub x: f32,

    /// Baseline vertical position
    pub y: f32,

    /// Line width
    pub width: f32,

    /// Line height (font size proxy)
    pub height: f32,

    /// Ordered words on the line
    pub words: Vec<Word>,

    /// Font name of the dominant span
    #[serde(default)]
    pub font: String,

    /// Integer-packed RGB color of the dominant span
    #[serde(default)]
    pub color: u32,

    /// Raw style bitmask from the extractor
    #[serde(default)]
    pub flags: u32,
}

impl LineItem {
    /// Create a line from position, size and words.
    pub fn new(x: f32, y: f32, width: f32, height: f32, words: Vec<Word>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            words,
            font: String::new(),
            color: 0,
            flags: 0,
        }
    }

    /// Create a line and set its font name.
    pub fn with_font(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        words: Vec<Word>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            font: font.into(),
            ..Self::new(x, y, width, height, words)
        }
    }

    /// Combined text of all words, space-joined.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rounded height used by histogram-based heuristics.
    pub fn rounded_height(&self) -> i32 {
        self.height.round() as i32
    }

    /// Rounded left edge used by indentation heuristics.
    pub fn rounded_x(&self) -> i32 {
        self.x.round() as i32
    }
}
