//! Rendering options and configuration.

/// Options for the text-based renderers (HTML, Markdown, plain text).
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata (Markdown only)
    pub include_frontmatter: bool,

    /// Emit the report title as the first heading
    pub include_title: bool,

    /// Character to use for unordered list markers (Markdown only)
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Wrap HTML output in a complete standalone page
    pub standalone_html: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the title heading.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Produce a full HTML page instead of a fragment.
    pub fn with_standalone_html(mut self, standalone: bool) -> Self {
        self.standalone_html = standalone;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            include_title: true,
            list_marker: '-',
            escape_special_chars: true,
            standalone_html: false,
        }
    }
}
