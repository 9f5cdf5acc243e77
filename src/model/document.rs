//! Document-level types.

use super::{Block, Section};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when the caller does not supply one.
pub const DEFAULT_REPORT_TITLE: &str = "Executive Summary";

/// A parsed summary report.
///
/// Built once per summary text and never mutated by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Report metadata (title, call type, etc.)
    pub metadata: Metadata,

    /// Text found before the first section heading
    pub preamble: Option<String>,

    /// Sections in order of appearance
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            preamble: None,
            sections: Vec::new(),
        }
    }

    /// Create an empty document carrying the given metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Self::new()
        }
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get a section by its 1-based order.
    pub fn get_section(&self, order: usize) -> Option<&Section> {
        if order == 0 {
            return None;
        }
        self.sections.get(order - 1)
    }

    /// Add a section, assigning it the next order.
    pub fn add_section(&mut self, mut section: Section) {
        section.order = self.sections.len() + 1;
        self.sections.push(section);
    }

    /// The preamble as a paragraph block, if present.
    pub fn preamble_block(&self) -> Option<Block> {
        self.preamble
            .as_ref()
            .map(|text| Block::Paragraph { text: text.clone() })
    }

    /// Check if nothing was found in the summary text.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.preamble.is_none()
    }

    /// Total number of blocks across all sections (preamble excluded).
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.block_count()).sum()
    }

    /// Iterate over every block in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections
            .iter()
            .flat_map(|s| s.subsections.iter())
            .flat_map(|sub| sub.blocks.iter())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref preamble) = self.preamble {
            parts.push(preamble.clone());
        }
        parts.extend(self.sections.iter().map(|s| s.plain_text()));
        parts.join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of call the transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    /// Quarterly or annual earnings call
    Earnings,
    /// Interview
    Interview,
    /// Internal or client meeting
    Meeting,
    /// Anything else
    Other,
}

impl CallType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CallType::Earnings => "Earnings Call",
            CallType::Interview => "Interview",
            CallType::Meeting => "Meeting",
            CallType::Other => "Other",
        }
    }

    /// Parse a call type from a loose name ("earnings", "Earnings Call", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earnings" | "earnings call" | "earnings_call" => Some(CallType::Earnings),
            "interview" => Some(CallType::Interview),
            "meeting" => Some(CallType::Meeting),
            "other" | "general" => Some(CallType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Report title
    pub title: String,

    /// Kind of call summarized
    pub call_type: Option<CallType>,

    /// Where the summary came from (file name, request id, ...)
    pub source: Option<String>,

    /// When the report was generated
    pub created: Option<DateTime<Utc>>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            call_type: None,
            source: None,
            created: None,
        }
    }
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("title: \"{}\"", escape_yaml(&self.title)));
        if let Some(call_type) = self.call_type {
            lines.push(format!("call_type: \"{}\"", call_type.label()));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
