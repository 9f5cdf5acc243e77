//! Content blocks.

use serde::{Deserialize, Serialize};

/// Smallest independently rendered unit of a subsection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A line of plain text
    Paragraph {
        /// Text content
        text: String,
    },

    /// Consecutive bullet lines, markers stripped
    BulletList {
        /// One entry per bullet line
        items: Vec<String>,
    },

    /// A quotation with optional attribution
    Quote {
        /// Quoted text without quotation marks
        text: String,
        /// Person quoted
        speaker: Option<String>,
        /// Speaker's role, when the attribution has one
        title: Option<String>,
    },

    /// A line flagged for emphasis because it contains numbers
    MetricLine {
        /// Full line text
        text: String,
    },
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a bullet list block.
    pub fn bullets(items: Vec<String>) -> Self {
        Block::BulletList { items }
    }

    /// Create an unattributed quote.
    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote {
            text: text.into(),
            speaker: None,
            title: None,
        }
    }

    /// Create a metric line block.
    pub fn metric(text: impl Into<String>) -> Self {
        Block::MetricLine { text: text.into() }
    }

    /// Short name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::BulletList { .. } => "bullet_list",
            Block::Quote { .. } => "quote",
            Block::MetricLine { .. } => "metric_line",
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph { .. })
    }

    /// Check if this block is a bullet list.
    pub fn is_bullet_list(&self) -> bool {
        matches!(self, Block::BulletList { .. })
    }

    /// Check if this block is a quote.
    pub fn is_quote(&self) -> bool {
        matches!(self, Block::Quote { .. })
    }

    /// Check if this block is a metric line.
    pub fn is_metric(&self) -> bool {
        matches!(self, Block::MetricLine { .. })
    }

    /// Attribution as written after the quote ("Jane Doe, CFO").
    pub fn attribution(&self) -> Option<String> {
        match self {
            Block::Quote {
                speaker: Some(speaker),
                title: Some(title),
                ..
            } => Some(format!("{}, {}", speaker, title)),
            Block::Quote {
                speaker: Some(only),
                title: None,
                ..
            }
            | Block::Quote {
                speaker: None,
                title: Some(only),
                ..
            } => Some(only.clone()),
            _ => None,
        }
    }

    /// Text payloads of the block, one per source line.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Block::Paragraph { text } | Block::MetricLine { text } | Block::Quote { text, .. } => {
                vec![text.as_str()]
            }
            Block::BulletList { items } => items.iter().map(String::as_str).collect(),
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Quote { text, .. } => match self.attribution() {
                Some(attribution) => format!("\"{}\" - {}", text, attribution),
                None => format!("\"{}\"", text),
            },
            _ => self.texts().join("\n"),
        }
    }
}
