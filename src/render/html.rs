//! HTML rendering for on-screen display.
//!
//! Produces semantic markup: one `<section>` per report section, `<ul>` for
//! bullet lists, `<blockquote>` with a `<cite>` for quotes and a `metric`
//! class on metric lines so stylesheets can emphasize them.

use crate::error::Result;
use crate::model::{Block, Document, Section, Subsection};

use super::visitor::{walk, BlockPosition, CompositeVisitor, DocumentVisitor};
use super::{RenderOptions, RenderResult, StatsCollector};

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    HtmlRenderer::new(options.clone()).render_with_stats(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    output: String,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        walk(doc, &mut self);
        Ok(self.output)
    }

    /// Render a document to HTML with report statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        let mut collector = StatsCollector::new();
        {
            let mut composite = CompositeVisitor::new()
                .with_visitor(&mut self)
                .with_visitor(&mut collector);
            walk(doc, &mut composite);
        }
        Ok(RenderResult::new(
            self.output,
            doc.metadata.clone(),
            collector.into_stats(),
        ))
    }

    fn line(&mut self, indent: usize, html: &str) {
        for _ in 0..indent {
            self.output.push_str("  ");
        }
        self.output.push_str(html);
        self.output.push('\n');
    }
}

impl DocumentVisitor for HtmlRenderer {
    fn start_document(&mut self, doc: &Document) {
        if self.options.standalone_html {
            self.line(0, "<!DOCTYPE html>");
            self.line(0, "<html>");
            self.line(0, "<head>");
            self.line(1, "<meta charset=\"utf-8\">");
            let title = format!("<title>{}</title>", escape_html(&doc.metadata.title));
            self.line(1, &title);
            self.line(0, "</head>");
            self.line(0, "<body>");
        }

        let mut open = String::from("<article class=\"report\"");
        if let Some(call_type) = doc.metadata.call_type {
            let name = serde_json::to_value(call_type)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            open.push_str(&format!(" data-call-type=\"{}\"", escape_html(&name)));
        }
        open.push('>');
        self.line(0, &open);

        if self.options.include_title {
            self.line(1, "<header>");
            let title = format!("<h1>{}</h1>", escape_html(&doc.metadata.title));
            self.line(2, &title);
            if let Some(call_type) = doc.metadata.call_type {
                let label = format!("<p class=\"call-type\">{}</p>", escape_html(call_type.label()));
                self.line(2, &label);
            }
            self.line(1, "</header>");
        }
    }

    fn visit_preamble(&mut self, text: &str) {
        let html = format!(
            "<p class=\"overview\">{}</p>",
            escape_html(text).replace('\n', "<br>\n")
        );
        self.line(1, &html);
    }

    fn start_section(&mut self, section: &Section) {
        let open = format!("<section data-order=\"{}\">", section.order);
        self.line(1, &open);
        if !section.is_untitled() {
            let heading = format!("<h2>{}</h2>", escape_html(&section.title));
            self.line(2, &heading);
        }
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        if let Some(heading) = subsection.heading() {
            let heading = format!("<h3>{}</h3>", escape_html(&heading));
            self.line(2, &heading);
        }
    }

    fn visit_block(&mut self, block: &Block, _position: BlockPosition) {
        match block {
            Block::Paragraph { text } => {
                let html = format!("<p>{}</p>", escape_html(text));
                self.line(2, &html);
            }
            Block::BulletList { items } => {
                self.line(2, "<ul>");
                for item in items {
                    let html = format!("<li>{}</li>", escape_html(item));
                    self.line(3, &html);
                }
                self.line(2, "</ul>");
            }
            Block::Quote {
                text,
                speaker,
                title,
            } => {
                self.line(2, "<blockquote>");
                let html = format!("<p>{}</p>", escape_html(text));
                self.line(3, &html);
                let footer = match (speaker, title) {
                    (Some(speaker), Some(title)) => Some(format!(
                        "<cite>{}</cite>, {}",
                        escape_html(speaker),
                        escape_html(title)
                    )),
                    (Some(speaker), None) => Some(format!("<cite>{}</cite>", escape_html(speaker))),
                    (None, Some(title)) => Some(escape_html(title)),
                    (None, None) => None,
                };
                if let Some(footer) = footer {
                    self.line(3, &format!("<footer>{}</footer>", footer));
                }
                self.line(2, "</blockquote>");
            }
            Block::MetricLine { text } => {
                let html = format!("<p class=\"metric\"><strong>{}</strong></p>", escape_html(text));
                self.line(2, &html);
            }
        }
    }

    fn end_section(&mut self, _section: &Section) {
        self.line(1, "</section>");
    }

    fn end_document(&mut self, _doc: &Document) {
        self.line(0, "</article>");
        if self.options.standalone_html {
            self.line(0, "</body>");
            self.line(0, "</html>");
        }
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
