//! Rendering result with metadata and statistics.

use crate::model::{Block, Metadata, Section, Subsection};
use serde::{Deserialize, Serialize};

use super::visitor::{BlockPosition, DocumentVisitor};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text, ...)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Report statistics
    pub stats: ReportStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ReportStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts of what a report contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Number of sections (including an untitled fallback section)
    pub section_count: u32,

    /// Number of lettered subsections
    pub subsection_count: u32,

    /// Number of paragraph blocks (the preamble counts as one)
    pub paragraph_count: u32,

    /// Number of bullet lists
    pub bullet_list_count: u32,

    /// Number of bullet items across all lists
    pub bullet_item_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of metric lines
    pub metric_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Number of PDF pages, when a paginated layout was produced
    pub page_count: u32,
}

impl ReportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Count one block and its text.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::BulletList { items } => {
                self.bullet_list_count += 1;
                self.bullet_item_count += items.len() as u32;
            }
            Block::Quote { .. } => self.quote_count += 1,
            Block::MetricLine { .. } => self.metric_count += 1,
        }
        for text in block.texts() {
            self.count_text(text);
        }
        if let Some(attribution) = block.attribution() {
            self.count_text(&attribution);
        }
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.paragraph_count + self.bullet_list_count + self.quote_count + self.metric_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReportStats) {
        self.section_count += other.section_count;
        self.subsection_count += other.subsection_count;
        self.paragraph_count += other.paragraph_count;
        self.bullet_list_count += other.bullet_list_count;
        self.bullet_item_count += other.bullet_item_count;
        self.quote_count += other.quote_count;
        self.metric_count += other.metric_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
        self.page_count += other.page_count;
    }
}

/// Visitor that collects [`ReportStats`] while walking a document.
#[derive(Debug, Default)]
pub struct StatsCollector {
    stats: ReportStats,
}

impl StatsCollector {
    /// Create a new collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected statistics.
    pub fn into_stats(self) -> ReportStats {
        self.stats
    }
}

impl DocumentVisitor for StatsCollector {
    fn visit_preamble(&mut self, text: &str) {
        self.stats.paragraph_count += 1;
        self.stats.count_text(text);
    }

    fn start_section(&mut self, section: &Section) {
        self.stats.section_count += 1;
        self.stats.count_text(&section.title);
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        if !subsection.is_untitled() {
            self.stats.subsection_count += 1;
            self.stats.count_text(&subsection.title);
        }
    }

    fn visit_block(&mut self, block: &Block, _position: BlockPosition) {
        self.stats.add_block(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::visitor::walk;

    #[test]
    fn test_count_text() {
        let mut stats = ReportStats::new();
        stats.count_text("Hello world");
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.char_count, 10);
    }

    #[test]
    fn test_collector() {
        let doc = crate::parse(
            "Opening remarks.\n1. OVERVIEW\nA. Highlights\n• one\n• two\n\"Solid.\" - CEO\n2. NUMBERS\nRevenue 10%",
        );
        let mut collector = StatsCollector::new();
        walk(&doc, &mut collector);
        let stats = collector.into_stats();

        assert_eq!(stats.section_count, 2);
        assert_eq!(stats.subsection_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.bullet_list_count, 1);
        assert_eq!(stats.bullet_item_count, 2);
        assert_eq!(stats.quote_count, 1);
        assert_eq!(stats.metric_count, 1);
        assert_eq!(stats.block_count(), 4);
    }

    #[test]
    fn test_merge() {
        let mut a = ReportStats {
            quote_count: 1,
            word_count: 10,
            ..Default::default()
        };
        let b = ReportStats {
            quote_count: 2,
            page_count: 3,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.quote_count, 3);
        assert_eq!(a.word_count, 10);
        assert_eq!(a.page_count, 3);
    }
}
