//! Section and subsection types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A top-level numbered division of the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text as found (trimmed); empty for the fallback section
    pub title: String,

    /// Number written in the heading, if any
    pub number: Option<u32>,

    /// Heading text without its number and trailing colon
    pub label: String,

    /// Position in the document (1-indexed, order of appearance)
    pub order: usize,

    /// Subsections in order of appearance (never empty once built)
    pub subsections: Vec<Subsection>,
}

impl Section {
    /// Create a new section with the given heading text.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            label: title.clone(),
            title,
            number: None,
            order: 0,
            subsections: Vec::new(),
        }
    }

    /// Create the unnamed section used when no heading is detected.
    pub fn untitled() -> Self {
        Self::new(String::new())
    }

    /// Check if this is the unnamed fallback section.
    pub fn is_untitled(&self) -> bool {
        self.title.is_empty()
    }

    /// Number of blocks across all subsections.
    pub fn block_count(&self) -> usize {
        self.subsections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Get plain text content of the section, heading included.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if !self.title.is_empty() {
            parts.push(self.title.clone());
        }
        for sub in &self.subsections {
            let text = sub.plain_text();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join("\n\n")
    }
}

/// A lettered division within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Title text (colon stripped); empty for the default subsection
    pub title: String,

    /// Heading letter, if a lettered heading was found
    pub letter: Option<char>,

    /// Content blocks in order
    pub blocks: Vec<Block>,
}

impl Subsection {
    /// Create a lettered subsection.
    pub fn new(letter: char, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            letter: Some(letter),
            blocks: Vec::new(),
        }
    }

    /// Create the default, untitled subsection.
    pub fn untitled() -> Self {
        Self {
            title: String::new(),
            letter: None,
            blocks: Vec::new(),
        }
    }

    /// Check if this is a default subsection.
    pub fn is_untitled(&self) -> bool {
        self.letter.is_none()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Heading as displayed ("A. Event Details"), or `None` for the default subsection.
    pub fn heading(&self) -> Option<String> {
        self.letter.map(|letter| {
            if self.title.is_empty() {
                format!("{}.", letter)
            } else {
                format!("{}. {}", letter, self.title)
            }
        })
    }

    /// Get plain text content of the subsection.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(heading) = self.heading() {
            lines.push(heading);
        }
        lines.extend(self.blocks.iter().map(|b| b.plain_text()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_section() {
        let section = Section::untitled();
        assert!(section.is_untitled());
        assert_eq!(section.block_count(), 0);
    }

    #[test]
    fn test_subsection_heading() {
        assert_eq!(
            Subsection::new('A', "Event Details").heading().as_deref(),
            Some("A. Event Details")
        );
        assert_eq!(Subsection::new('B', "").heading().as_deref(), Some("B."));
        assert!(Subsection::untitled().heading().is_none());
    }

    #[test]
    fn test_section_plain_text() {
        let mut section = Section::new("1. OVERVIEW");
        let mut sub = Subsection::new('A', "Details");
        sub.push(Block::bullets(vec!["one".into(), "two".into()]));
        section.subsections.push(sub);

        let text = section.plain_text();
        assert!(text.starts_with("1. OVERVIEW"));
        assert!(text.contains("A. Details"));
        assert!(text.contains("one\ntwo"));
        assert_eq!(section.block_count(), 1);
    }
}
