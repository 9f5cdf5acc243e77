//! Markdown rendering for summary reports.

use crate::error::Result;
use crate::model::{Block, Document, Section, Subsection};

use super::visitor::{walk, BlockPosition, CompositeVisitor, DocumentVisitor};
use super::{RenderOptions, RenderResult, StatsCollector};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    output: String,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        walk(doc, &mut self);
        Ok(self.finish())
    }

    /// Render a document to Markdown with report statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        let mut collector = StatsCollector::new();
        {
            let mut composite = CompositeVisitor::new()
                .with_visitor(&mut self)
                .with_visitor(&mut collector);
            walk(doc, &mut composite);
        }
        Ok(RenderResult::new(
            self.finish(),
            doc.metadata.clone(),
            collector.into_stats(),
        ))
    }

    fn finish(self) -> String {
        let mut output = self.output.trim().to_string();
        output.push('\n');
        output
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    /// Escape text that starts a line of block content.
    fn escape_line(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown_line(text)
        } else {
            text.to_string()
        }
    }

    fn push_paragraph(&mut self, text: &str) {
        let text = self.escape_line(text);
        self.output.push_str(&text);
        self.output.push_str("\n\n");
    }
}

impl DocumentVisitor for MarkdownRenderer {
    fn start_document(&mut self, doc: &Document) {
        if self.options.include_frontmatter {
            self.output.push_str(&doc.metadata.to_yaml_frontmatter());
            self.output.push('\n');
        }
        if self.options.include_title {
            let title = self.escape(&doc.metadata.title);
            self.output.push_str(&format!("# {}\n\n", title));
        }
    }

    fn visit_preamble(&mut self, text: &str) {
        for line in text.lines() {
            self.push_paragraph(line);
        }
    }

    fn start_section(&mut self, section: &Section) {
        if !section.is_untitled() {
            let title = self.escape(&section.title);
            self.output.push_str(&format!("## {}\n\n", title));
        }
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        if let Some(heading) = subsection.heading() {
            let heading = self.escape(&heading);
            self.output.push_str(&format!("### {}\n\n", heading));
        }
    }

    fn visit_block(&mut self, block: &Block, _position: BlockPosition) {
        match block {
            Block::Paragraph { text } => self.push_paragraph(text),
            Block::BulletList { items } => {
                let marker = self.options.list_marker;
                for item in items {
                    let item = self.escape_line(item);
                    self.output.push_str(&format!("{} {}\n", marker, item));
                }
                self.output.push('\n');
            }
            Block::Quote { text, .. } => {
                let text = self.escape_line(text);
                self.output.push_str(&format!("> {}\n", text));
                if let Some(attribution) = block.attribution() {
                    let attribution = self.escape(&attribution);
                    self.output.push_str(&format!(">\n> — {}\n", attribution));
                }
                self.output.push('\n');
            }
            Block::MetricLine { text } => {
                let text = self.escape(text);
                self.output.push_str(&format!("**{}**\n\n", text));
            }
        }
    }
}

/// Escape special Markdown characters in text.
///
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '<' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escape text placed at the start of a line.
///
/// Besides inline syntax, a leading `#`, `-`, `+`, `>` or `=` and the
/// delimiter of a leading number (`2.` or `2)`) are escaped so the line
/// cannot turn into a heading, list or quote.
fn escape_markdown_line(text: &str) -> String {
    let body = text.trim_start();
    let mut result = String::with_capacity(text.len() + 2);
    result.push_str(&text[..text.len() - body.len()]);

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = if matches!(body.chars().next(), Some('#' | '-' | '+' | '>' | '=')) {
        result.push('\\');
        body
    } else if digits > 0 && matches!(body[digits..].chars().next(), Some('.' | ')')) {
        result.push_str(&body[..digits]);
        result.push('\\');
        &body[digits..]
    } else {
        body
    };

    result.push_str(&escape_markdown(rest));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        to_markdown(&crate::parse(text), &RenderOptions::new()).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("$4.2B (up 12%)"), "$4.2B (up 12%)");
    }

    #[test]
    fn test_escape_line_start_markers() {
        assert_eq!(escape_markdown_line("-5% margin compression"), "\\-5% margin compression");
        assert_eq!(escape_markdown_line("2. Notes: kept"), "2\\. Notes: kept");
        assert_eq!(escape_markdown_line("10) Risks"), "10\\) Risks");
        assert_eq!(escape_markdown_line("# not a heading"), "\\# not a heading");
        assert_eq!(escape_markdown_line("+ more"), "\\+ more");
        assert_eq!(escape_markdown_line("2024 was strong"), "2024 was strong");
        assert_eq!(escape_markdown_line("Q3 grew 2. again"), "Q3 grew 2. again");
        assert_eq!(escape_markdown_line("*bold*"), "\\*bold\\*");
    }

    #[test]
    fn test_block_text_cannot_become_list_or_heading() {
        let md = render("1. OVERVIEW\n-adjusted figures were flat\n+ upside remains\n• 2. second point");
        let expected = "\
# Executive Summary

## 1. OVERVIEW

\\-adjusted figures were flat

\\+ upside remains

- 2\\. second point
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_render_structure() {
        let md = render("Intro line\n1. OVERVIEW\nA. Details\n• one\n• two\nRevenue 12%");
        let expected = "\
# Executive Summary

Intro line

## 1. OVERVIEW

### A. Details

- one
- two

**Revenue 12%**
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_render_quote() {
        let md = render("1. VOICES\n\"Growth was strong.\" - Jane Doe, CFO");
        assert!(md.contains("> Growth was strong.\n>\n> — Jane Doe, CFO\n"));
    }

    #[test]
    fn test_render_untitled_section() {
        let md = render("plain words");
        assert_eq!(md, "# Executive Summary\n\nplain words\n");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let doc = crate::parse_with_options(
            "1. OVERVIEW\nx",
            &crate::ParseOptions::new().with_title("Acme Q3"),
        );
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&doc, &options).unwrap();
        assert!(md.starts_with("---\ntitle: \"Acme Q3\"\n---\n"));
        assert!(md.contains("# Acme Q3"));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = crate::parse("1. OVERVIEW\n• a\n• b\n2. OUTLOOK\n\"Bright.\" - CEO");
        let result = to_markdown_with_stats(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(result.stats.section_count, 2);
        assert_eq!(result.stats.bullet_item_count, 2);
        assert_eq!(result.stats.quote_count, 1);
        assert!(result.content.contains("## 2. OUTLOOK"));
    }
}
