//! Visitor pattern for walking a document.
//!
//! Every renderer consumes the document through [`walk`], which visits the
//! preamble, sections, subsections and blocks in document order. Visitors
//! only receive shared references, so no renderer can reorder, drop or
//! mutate content.
//!
//! # Example
//!
//! ```
//! use sumreport::model::Block;
//! use sumreport::render::visitor::{walk, BlockPosition, DocumentVisitor};
//!
//! struct QuoteCounter(usize);
//!
//! impl DocumentVisitor for QuoteCounter {
//!     fn visit_block(&mut self, block: &Block, _position: BlockPosition) {
//!         if block.is_quote() {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let doc = sumreport::parse("1. OVERVIEW\n\"Great quarter.\" - CEO");
//! let mut counter = QuoteCounter(0);
//! walk(&doc, &mut counter);
//! assert_eq!(counter.0, 1);
//! ```

use crate::model::{Block, Document, Section, Subsection};

/// Location of a block inside the document (all indices 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPosition {
    /// Section index
    pub section: usize,
    /// Subsection index within the section
    pub subsection: usize,
    /// Block index within the subsection
    pub block: usize,
}

/// Trait for visiting document elements in order.
///
/// All methods do nothing by default.
pub trait DocumentVisitor {
    /// Called once before anything else.
    fn start_document(&mut self, doc: &Document) {
        let _ = doc;
    }

    /// Called with the preamble text, if the document has one.
    fn visit_preamble(&mut self, text: &str) {
        let _ = text;
    }

    /// Called before a section's subsections.
    fn start_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// Called before a subsection's blocks.
    fn start_subsection(&mut self, subsection: &Subsection) {
        let _ = subsection;
    }

    /// Called for every block.
    fn visit_block(&mut self, block: &Block, position: BlockPosition) {
        let _ = (block, position);
    }

    /// Called after a subsection's blocks.
    fn end_subsection(&mut self, subsection: &Subsection) {
        let _ = subsection;
    }

    /// Called after a section's subsections.
    fn end_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// Called once after everything else.
    fn end_document(&mut self, doc: &Document) {
        let _ = doc;
    }
}

/// Walk a document, calling the visitor for every element in order.
pub fn walk<V: DocumentVisitor + ?Sized>(doc: &Document, visitor: &mut V) {
    visitor.start_document(doc);

    if let Some(ref preamble) = doc.preamble {
        visitor.visit_preamble(preamble);
    }

    for (section_index, section) in doc.sections.iter().enumerate() {
        visitor.start_section(section);
        for (subsection_index, subsection) in section.subsections.iter().enumerate() {
            visitor.start_subsection(subsection);
            for (block_index, block) in subsection.blocks.iter().enumerate() {
                visitor.visit_block(
                    block,
                    BlockPosition {
                        section: section_index,
                        subsection: subsection_index,
                        block: block_index,
                    },
                );
            }
            visitor.end_subsection(subsection);
        }
        visitor.end_section(section);
    }

    visitor.end_document(doc);
}

/// Composite visitor that forwards every call to each visitor in turn.
///
/// Lets several consumers (a renderer and a statistics collector, say)
/// share one pass over the document.
pub struct CompositeVisitor<'a> {
    visitors: Vec<&'a mut dyn DocumentVisitor>,
}

impl<'a> CompositeVisitor<'a> {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor(mut self, visitor: &'a mut dyn DocumentVisitor) -> Self {
        self.visitors.push(visitor);
        self
    }
}

impl Default for CompositeVisitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor<'_> {
    fn start_document(&mut self, doc: &Document) {
        for visitor in &mut self.visitors {
            visitor.start_document(doc);
        }
    }

    fn visit_preamble(&mut self, text: &str) {
        for visitor in &mut self.visitors {
            visitor.visit_preamble(text);
        }
    }

    fn start_section(&mut self, section: &Section) {
        for visitor in &mut self.visitors {
            visitor.start_section(section);
        }
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        for visitor in &mut self.visitors {
            visitor.start_subsection(subsection);
        }
    }

    fn visit_block(&mut self, block: &Block, position: BlockPosition) {
        for visitor in &mut self.visitors {
            visitor.visit_block(block, position);
        }
    }

    fn end_subsection(&mut self, subsection: &Subsection) {
        for visitor in &mut self.visitors {
            visitor.end_subsection(subsection);
        }
    }

    fn end_section(&mut self, section: &Section) {
        for visitor in &mut self.visitors {
            visitor.end_section(section);
        }
    }

    fn end_document(&mut self, doc: &Document) {
        for visitor in &mut self.visitors {
            visitor.end_document(doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct EventLog(Vec<String>);

    impl DocumentVisitor for EventLog {
        fn start_document(&mut self, _doc: &Document) {
            self.0.push("doc".into());
        }
        fn visit_preamble(&mut self, text: &str) {
            self.0.push(format!("pre:{}", text));
        }
        fn start_section(&mut self, section: &Section) {
            self.0.push(format!("sec:{}", section.title));
        }
        fn start_subsection(&mut self, subsection: &Subsection) {
            self.0.push(format!("sub:{}", subsection.title));
        }
        fn visit_block(&mut self, block: &Block, position: BlockPosition) {
            self.0.push(format!(
                "block:{}:{}.{}.{}",
                block.kind(),
                position.section,
                position.subsection,
                position.block
            ));
        }
        fn end_document(&mut self, _doc: &Document) {
            self.0.push("end".into());
        }
    }

    #[test]
    fn test_walk_order() {
        let doc = crate::parse("Intro\n1. ONE\nA. First\n- a\n12 units\n2. TWO\nplain");
        let mut log = EventLog::default();
        walk(&doc, &mut log);

        assert_eq!(
            log.0,
            vec![
                "doc",
                "pre:Intro",
                "sec:1. ONE",
                "sub:First",
                "block:bullet_list:0.0.0",
                "block:metric_line:0.0.1",
                "sec:2. TWO",
                "sub:",
                "block:paragraph:1.0.0",
                "end",
            ]
        );
    }

    #[test]
    fn test_composite_visitor_fans_out() {
        let doc = crate::parse("1. ONE\nx\ny");
        let mut first = EventLog::default();
        let mut second = EventLog::default();
        {
            let mut composite = CompositeVisitor::new()
                .with_visitor(&mut first)
                .with_visitor(&mut second);
            walk(&doc, &mut composite);
        }
        assert_eq!(first.0, second.0);
        assert_eq!(first.0.len(), 6);
    }
}
