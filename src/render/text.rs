//! Plain text rendering for summary reports.

use crate::error::Result;
use crate::model::{Block, Document, Section, Subsection};
use crate::parser::CANONICAL_BULLET;

use super::visitor::{walk, BlockPosition, DocumentVisitor};
use super::RenderOptions;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut renderer = TextRenderer {
        include_title: options.include_title,
        output: String::new(),
    };
    walk(doc, &mut renderer);

    let mut output = renderer.output.trim().to_string();
    output.push('\n');
    Ok(output)
}

struct TextRenderer {
    include_title: bool,
    output: String,
}

impl TextRenderer {
    fn separate(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }
}

impl DocumentVisitor for TextRenderer {
    fn start_document(&mut self, doc: &Document) {
        if self.include_title {
            let title = &doc.metadata.title;
            self.output.push_str(title);
            self.output.push('\n');
            self.output
                .push_str(&"=".repeat(title.chars().count().max(1)));
            self.output.push('\n');
        }
    }

    fn visit_preamble(&mut self, text: &str) {
        self.separate();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn start_section(&mut self, section: &Section) {
        self.separate();
        if !section.is_untitled() {
            self.output.push_str(&section.title);
            self.output.push('\n');
        }
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        if let Some(heading) = subsection.heading() {
            self.separate();
            self.output.push_str(&heading);
            self.output.push('\n');
        }
    }

    fn visit_block(&mut self, block: &Block, _position: BlockPosition) {
        match block {
            Block::BulletList { items } => {
                for item in items {
                    self.output.push(CANONICAL_BULLET);
                    self.output.push(' ');
                    self.output.push_str(item);
                    self.output.push('\n');
                }
            }
            _ => {
                self.output.push_str(&block.plain_text());
                self.output.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let doc = crate::parse(
            "Solid quarter.\n1. OVERVIEW\nA. Details\n- one\n- two\n\"Great.\" - Jane Doe, CFO\n2. OUTLOOK\nRevenue up 4%",
        );
        let text = to_text(&doc, &RenderOptions::default()).unwrap();
        let expected = "\
Executive Summary
=================

Solid quarter.

1. OVERVIEW

A. Details
• one
• two
\"Great.\" - Jane Doe, CFO

2. OUTLOOK
Revenue up 4%
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_to_text_without_title() {
        let doc = crate::parse("hello");
        let text = to_text(&doc, &RenderOptions::new().with_title(false)).unwrap();
        assert_eq!(text, "hello\n");
    }
}
