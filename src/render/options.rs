//! Rendering options.

/// Options for Markdown rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Separate pages with a horizontal rule instead of a single newline
    pub page_breaks: bool,

    /// Include YAML frontmatter with document metadata
    pub include_frontmatter: bool,

    /// NFC-normalize the final text of each page
    pub normalize_unicode: bool,
}

impl RenderOptions {
    /// Create render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable horizontal-rule page separators.
    pub fn with_page_breaks(mut self, page_breaks: bool) -> Self {
        self.page_breaks = page_breaks;
        self
    }

    /// Enable or disable YAML frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable NFC normalization of the output.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_breaks: false,
            include_frontmatter: false,
            normalize_unicode: true,
        }
    }
}
