//! Markdown rendering for classified documents.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{BlockType, LineBlock, Page, PageItem, ParseResult};
use crate::pipeline::DocStats;
use crate::text::is_digits;

use super::RenderOptions;

/// Punctuation that attaches to the preceding word without a space.
const NO_SPACE_BEFORE: &str = ".,!?;:)]}";

/// Convert a classified document to a single Markdown string.
pub fn to_markdown(doc: &ParseResult, stats: &DocStats, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(stats, options.clone()).render(doc)
}

/// Convert a classified document to one Markdown string per page.
pub fn to_markdown_pages(
    doc: &ParseResult,
    stats: &DocStats,
    options: &RenderOptions,
) -> Result<Vec<String>> {
    Ok(MarkdownRenderer::new(stats, options.clone()).render_pages(doc))
}

/// Markdown renderer.
///
/// Walks the finally-classified blocks per page and emits GFM: `#`
/// headings, `-` bullets with 3-space indent steps, fenced code, `[^n]`
/// footnote references and `[^n]:` definitions, pipe-table passthrough.
pub struct MarkdownRenderer<'a> {
    stats: &'a DocStats,
    options: RenderOptions,
    footnote_markers: Regex,
    footnote_number: Regex,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a renderer over the document statistics.
    pub fn new(stats: &'a DocStats, options: RenderOptions) -> Self {
        Self {
            stats,
            options,
            footnote_markers: Regex::new(r"^[\*_\[\]\^]+(\d+)[\*_\[\]\^]*\s*").unwrap(),
            footnote_number: Regex::new(r"^\(?\^?(\d+)\)?\.?\s*").unwrap(),
        }
    }

    /// Render the whole document.
    pub fn render(&self, doc: &ParseResult) -> Result<String> {
        let pages = self.render_pages(doc);
        let separator = if self.options.page_breaks {
            "\n\n---\n\n"
        } else {
            "\n"
        };
        let mut output = pages.join(separator);
        if self.options.include_frontmatter {
            output = format!("{}\n{}", doc.metadata.to_yaml_frontmatter(), output);
        }
        Ok(output)
    }

    /// Render each page to its own Markdown string.
    pub fn render_pages(&self, doc: &ParseResult) -> Vec<String> {
        doc.pages.iter().map(|p| self.render_page(p)).collect()
    }

    fn render_page(&self, page: &Page) -> String {
        let mut blocks: Vec<String> = Vec::new();
        for item in &page.items {
            match item {
                PageItem::Table(table) => blocks.push(table.markdown.clone()),
                PageItem::Block(block) => {
                    if let Some(rendered) = self.render_block(block) {
                        blocks.push(rendered);
                    }
                }
                // Raw lines never survive the gatherer; skip defensively.
                PageItem::Line(_) => {}
            }
        }

        let page_md = blocks.join("\n\n");
        if self.options.normalize_unicode {
            page_md.nfc().collect()
        } else {
            page_md
        }
    }

    fn render_block(&self, block: &LineBlock) -> Option<String> {
        if block.lines.iter().all(|l| l.words.is_empty()) {
            return None;
        }

        let is_heading = block.block_type.is_heading();
        let is_block_bold = !is_heading && self.all_words_bold(block);
        let skip_first_word = block.block_type == BlockType::List && starts_with_marker(block);

        let mut lines_text: Vec<String> = Vec::new();
        for (line_idx, line) in block.lines.iter().enumerate() {
            let mut line_str = String::new();
            for (i, word) in line.words.iter().enumerate() {
                if skip_first_word && line_idx == 0 && i == 0 {
                    continue;
                }

                let mut t = word.text.clone();

                // Superscript digits are footnote references.
                if word.is_superscript && is_digits(&t) {
                    t = format!("[^{t}]");
                }

                // Word-level styling, unless block-level bold already
                // covers it. Headings only take italics: the heading
                // marker carries the weight.
                if !is_block_bold && !is_heading {
                    if word.is_bold_italic() {
                        t = format!("**_{t}_**");
                    } else if word.is_bold || self.is_max_height_font(&line.font) {
                        t = format!("**{t}**");
                    } else if word.is_italic {
                        t = format!("_{t}_");
                    }
                } else if is_heading && word.is_italic && !word.is_bold {
                    t = format!("_{t}_");
                }

                if word.is_link {
                    let url = if t.starts_with("http") {
                        t.clone()
                    } else {
                        format!("http://{t}")
                    };
                    t = format!("[{t}]({url})");
                }

                let attaches = t
                    .chars()
                    .next()
                    .map(|c| NO_SPACE_BEFORE.contains(c))
                    .unwrap_or(false);
                if i > 0 && !attaches {
                    line_str.push(' ');
                }
                line_str.push_str(&t);
            }
            lines_text.push(merge_adjacent_markers(&line_str).trim().to_string());
        }

        let mut content = if block.block_type == BlockType::Code {
            lines_text.join("\n")
        } else {
            let merged = dehyphenate(&lines_text);
            merge_adjacent_markers(&merged.join(" "))
        };
        if is_block_bold {
            content = format!("**{content}**");
        }

        Some(self.apply_affixes(block, content))
    }

    /// Whether every word in the block is bold, or every line is set in
    /// the document's max-height font. Headings are exempt — the `#`
    /// prefix already carries the emphasis.
    fn all_words_bold(&self, block: &LineBlock) -> bool {
        block.lines.iter().all(|l| {
            l.words
                .iter()
                .all(|w| w.is_bold || self.is_max_height_font(&l.font))
        })
    }

    fn is_max_height_font(&self, font: &str) -> bool {
        !self.stats.max_height_font.is_empty() && font == self.stats.max_height_font
    }

    fn apply_affixes(&self, block: &LineBlock, content: String) -> String {
        match block.block_type {
            BlockType::Paragraph | BlockType::Table => content,
            BlockType::H1 => format!("# {content}"),
            BlockType::H2 => format!("## {content}"),
            BlockType::H3 => format!("### {content}"),
            BlockType::H4 => format!("#### {content}"),
            BlockType::H5 => format!("##### {content}"),
            BlockType::H6 => format!("###### {content}"),
            BlockType::Quote => format!("> {content}"),
            BlockType::Toc => format!("  - {content}"),
            BlockType::Code => format!("```\n{content}\n```"),
            BlockType::List => {
                let indent = " ".repeat(block.indent_level as usize * 3);
                format!("{indent}- {content}")
            }
            BlockType::Footnote => {
                // The number may carry style or reference markers
                // ("**1**", "[^1]"); strip those before rewriting the
                // prefix into definition syntax.
                let clean = self.footnote_markers.replace(&content, "$1 ");
                let rewritten = self.footnote_number.replace(&clean, "$1]: ");
                format!("[^{rewritten}")
            }
        }
    }
}

/// Collapse adjacent same-style markers: `**a** **b**` → `**a b**`.
fn merge_adjacent_markers(text: &str) -> String {
    text.replace("** **", " ").replace("_ _", " ")
}

/// Join lines, removing an end-of-line hyphen when it splits a lowercase
/// word across lines. `"exam-" + "ple"` merges to `"example"`; `"X-" +
/// "Pro"` stays apart so hyphenated compounds survive.
fn dehyphenate(lines: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for line in lines {
        let joins = merged
            .last()
            .map(|prev| {
                let chars: Vec<char> = prev.chars().collect();
                chars.len() >= 2
                    && chars[chars.len() - 1] == '-'
                    && chars[chars.len() - 2].is_lowercase()
                    && line.chars().next().map(char::is_lowercase).unwrap_or(false)
            })
            .unwrap_or(false);
        if joins {
            let prev = merged.last_mut().expect("checked non-empty");
            prev.pop();
            prev.push_str(line);
        } else {
            merged.push(line.clone());
        }
    }
    merged
}

/// Whether a list block opens with a marker token the renderer supplies
/// itself: a bullet glyph or a short numeric marker like `1.` or `12)`.
fn starts_with_marker(block: &LineBlock) -> bool {
    let Some(first_word) = block.lines.first().and_then(|l| l.words.first()) else {
        return false;
    };
    let text = first_word.text.as_str();
    if matches!(text, "-" | "•" | "–" | "*") {
        return true;
    }
    let stripped = text.trim_end_matches(['.', ')', ':']);
    text.chars().count() <= 3 && is_digits(stripped)
}
