//! Document model builder.
//!
//! Runs normalization, section segmentation, subsection segmentation and
//! line classification, and assembles the results into a [`Document`].
//! Building is pure: the same text and options always give the same tree.

use super::classify::{LineClassifier, LineKind};
use super::normalize::Normalizer;
use super::sections::SectionSegmenter;
use super::subsections::SubsectionSegmenter;
use super::ParseOptions;
use crate::model::{Block, Document, Section, Subsection};

/// Builds documents from summary text.
pub struct DocumentBuilder {
    options: ParseOptions,
    normalizer: Option<Normalizer>,
    sections: SectionSegmenter,
    subsections: SubsectionSegmenter,
    classifier: LineClassifier,
}

impl DocumentBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a builder with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        let normalizer = options.normalize.clone().map(Normalizer::new);
        Self {
            options,
            normalizer,
            sections: SectionSegmenter::new(),
            subsections: SubsectionSegmenter::new(),
            classifier: LineClassifier::new(),
        }
    }

    /// Get the options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Build a document from summary text.
    ///
    /// Never fails. Empty or whitespace-only text gives a document with no
    /// sections and no preamble.
    pub fn build(&self, text: &str) -> Document {
        let mut doc = Document::with_metadata(self.options.metadata.clone());

        let normalized;
        let text = match self.normalizer {
            Some(ref normalizer) => {
                normalized = normalizer.process(text);
                normalized.as_str()
            }
            None => text,
        };

        let segmentation = self.sections.segment(text, self.options.grammar);
        doc.preamble = segmentation.preamble;

        for span in segmentation.sections {
            let section = match span.heading {
                Some(heading) => {
                    let mut section = Section {
                        title: heading.title,
                        number: heading.number,
                        label: heading.label,
                        order: 0,
                        subsections: Vec::new(),
                    };
                    for sub_span in self.subsections.segment(&span.body) {
                        section.subsections.push(Subsection {
                            title: sub_span.title,
                            letter: sub_span.letter,
                            blocks: self.build_blocks(&sub_span.body),
                        });
                    }
                    section
                }
                // Without section headings the whole text is one default
                // subsection; lettered lines stay ordinary body lines.
                None => {
                    let mut section = Section::untitled();
                    section.subsections.push(Subsection {
                        title: String::new(),
                        letter: None,
                        blocks: self.build_blocks(&span.body),
                    });
                    section
                }
            };

            doc.add_section(section);
        }

        log::debug!(
            "built document with {} sections and {} blocks",
            doc.section_count(),
            doc.block_count()
        );

        doc
    }

    /// Classify the lines of a subsection body into blocks.
    ///
    /// Blank lines only separate; consecutive bullet lines share one list.
    pub fn build_blocks(&self, body: &str) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.classifier.classify(line) {
                LineKind::Bullet(item) => {
                    if let Some(Block::BulletList { items }) = blocks.last_mut() {
                        items.push(item);
                        continue;
                    }
                    blocks.push(Block::BulletList { items: vec![item] });
                }
                other => blocks.push(other.into_block()),
            }
        }

        blocks
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
