//! # sumreport
//!
//! Turns LLM-generated call summaries into structured reports.
//!
//! Summary text nominally follows a numbered outline (`1. EXECUTIVE
//! OVERVIEW`, `A. Event Details:`, bullets, quotes, numbers) but is never
//! validated. This library parses it deterministically into a
//! [`Document`] tree and renders that tree as HTML, Markdown, plain text,
//! JSON or a paginated PDF.
//!
//! ## Quick Start
//!
//! ```
//! use sumreport::{parse, render};
//!
//! let doc = parse("1. EXECUTIVE OVERVIEW\n• Revenue grew 12%\n\"A record quarter.\" - Jane Doe, CEO");
//! assert_eq!(doc.section_count(), 1);
//!
//! let html = render::to_html(&doc, &render::RenderOptions::default()).unwrap();
//! assert!(html.contains("<cite>Jane Doe</cite>"));
//! ```
//!
//! ## Features
//!
//! - **Total parsing**: every input string gives a document; nothing is dropped
//! - **Two heading grammars**: strict uppercase headings and loose colon headings
//! - **Line classification**: bullets, attributed quotes, metric lines, paragraphs
//! - **Multiple output formats**: HTML, Markdown, plain text, JSON, PDF
//! - **Paginated PDF**: page breaks only between blocks, atomic file export

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Block, CallType, Document, Metadata, Section, Subsection};
pub use parser::{DocumentBuilder, HeadingGrammar, NormalizeOptions, ParseOptions};
pub use render::{JsonFormat, PageSize, PdfOptions, RenderOptions, ReportStats};

use std::io::Read;
use std::path::Path;

/// Parse summary text with default options.
///
/// Never fails: empty input gives an empty document and text without any
/// recognizable heading becomes a single untitled section.
///
/// # Example
///
/// ```
/// let doc = sumreport::parse("1. OUTLOOK\n- Guidance raised");
/// assert_eq!(doc.sections[0].title, "1. OUTLOOK");
/// ```
pub fn parse(text: &str) -> Document {
    DocumentBuilder::new().build(text)
}

/// Parse summary text with custom options.
///
/// # Example
///
/// ```
/// use sumreport::{parse_with_options, CallType, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_title("Acme Q3 Earnings")
///     .with_call_type(CallType::Earnings);
/// let doc = parse_with_options("1. OVERVIEW\nSolid quarter.", &options);
/// assert_eq!(doc.metadata.title, "Acme Q3 Earnings");
/// ```
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Document {
    DocumentBuilder::with_options(options.clone()).build(text)
}

/// Read and parse a summary file.
///
/// The file name is recorded as the document source unless the options
/// already carry one.
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    let mut options = options.clone();
    if options.metadata.source.is_none() {
        options = options.with_source(path.display().to_string());
    }
    Ok(parse_with_options(&text, &options))
}

/// Read and parse summary text from a reader.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Document> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_with_options(&text, options))
}

/// Convert summary text to HTML.
pub fn to_html(text: &str) -> Result<String> {
    render::to_html(&parse(text), &RenderOptions::default())
}

/// Convert summary text to Markdown.
///
/// # Example
///
/// ```
/// let md = sumreport::to_markdown("1. RISKS\n- Currency exposure").unwrap();
/// assert!(md.contains("## 1. RISKS"));
/// ```
pub fn to_markdown(text: &str) -> Result<String> {
    render::to_markdown(&parse(text), &RenderOptions::default())
}

/// Convert summary text to plain text.
pub fn to_text(text: &str) -> Result<String> {
    render::to_text(&parse(text), &RenderOptions::default())
}

/// Convert summary text to JSON.
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parse(text), format)
}

/// Convert summary text to PDF bytes.
pub fn to_pdf(text: &str) -> Result<Vec<u8>> {
    render::to_pdf(&parse(text), &PdfOptions::default())
}

/// Convert summary text to a PDF file, written atomically.
///
/// # Example
///
/// ```no_run
/// sumreport::export_pdf("1. OVERVIEW\nStrong quarter.", "summary-report.pdf")?;
/// # Ok::<(), sumreport::Error>(())
/// ```
pub fn export_pdf<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    render::export_pdf(&parse(text), path, &PdfOptions::default())
}

/// Builder for parsing and rendering summaries.
///
/// # Example
///
/// ```
/// use sumreport::{CallType, Sumreport};
///
/// let report = Sumreport::new()
///     .with_title("Acme Q3")
///     .with_call_type(CallType::Earnings)
///     .with_frontmatter()
///     .parse("1. EXECUTIVE OVERVIEW\n• Revenue up 12%");
///
/// let markdown = report.to_markdown()?;
/// assert!(markdown.starts_with("---\n"));
/// # Ok::<(), sumreport::Error>(())
/// ```
pub struct Sumreport {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    pdf_options: PdfOptions,
}

impl Sumreport {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            pdf_options: PdfOptions::default(),
        }
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_title(title);
        self
    }

    /// Set the call type.
    pub fn with_call_type(mut self, call_type: CallType) -> Self {
        self.parse_options = self.parse_options.with_call_type(call_type);
        self
    }

    /// Set the heading grammar.
    pub fn with_grammar(mut self, grammar: HeadingGrammar) -> Self {
        self.parse_options = self.parse_options.with_grammar(grammar);
        self
    }

    /// Skip text normalization.
    pub fn raw(mut self) -> Self {
        self.parse_options = self.parse_options.raw();
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Replace all parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace all PDF options.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    /// Set the PDF page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.pdf_options = self.pdf_options.with_page_size(page_size);
        self
    }

    /// Enable or disable PDF page numbers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.pdf_options = self.pdf_options.with_page_numbers(enabled);
        self
    }

    /// Parse summary text.
    pub fn parse(self, text: &str) -> SumreportResult {
        let document = parse_with_options(text, &self.parse_options);
        SumreportResult {
            document,
            render_options: self.render_options,
            pdf_options: self.pdf_options,
        }
    }

    /// Read and parse a summary file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<SumreportResult> {
        let document = parse_file(path, &self.parse_options)?;
        Ok(SumreportResult {
            document,
            render_options: self.render_options,
            pdf_options: self.pdf_options,
        })
    }
}

impl Default for Sumreport {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed summary, ready to render.
pub struct SumreportResult {
    /// The parsed document
    pub document: Document,
    render_options: RenderOptions,
    pdf_options: PdfOptions,
}

impl SumreportResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.pdf_options)
    }

    /// Write a PDF file atomically.
    pub fn export_pdf<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::export_pdf(&self.document, path, &self.pdf_options)
    }

    /// Collect report statistics, including the PDF page count.
    pub fn stats(&self) -> Result<ReportStats> {
        let mut collector = render::StatsCollector::new();
        render::walk(&self.document, &mut collector);
        let mut stats = collector.into_stats();
        stats.page_count = render::paginate(&self.document, &self.pdf_options)?.page_count() as u32;
        Ok(stats)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sumreport_builder() {
        let builder = Sumreport::new()
            .with_title("Weekly Sync")
            .with_call_type(CallType::Meeting)
            .with_grammar(HeadingGrammar::Loose)
            .with_frontmatter()
            .with_page_size(PageSize::Letter);

        assert_eq!(builder.parse_options.metadata.title, "Weekly Sync");
        assert_eq!(builder.parse_options.grammar, HeadingGrammar::Loose);
        assert!(builder.render_options.include_frontmatter);
        assert_eq!(builder.pdf_options.page_size, PageSize::Letter);
    }

    #[test]
    fn test_sumreport_whole_options() {
        let parse = ParseOptions::new().with_title("Board Call").with_source("board.txt");
        let pdf = PdfOptions::default().with_margin(400.0);
        let report = Sumreport::new()
            .with_parse_options(parse)
            .with_pdf_options(pdf)
            .parse("1. OVERVIEW\nBody");

        assert_eq!(report.document().metadata.source.as_deref(), Some("board.txt"));
        assert!(matches!(report.stats(), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_sumreport_builder_default() {
        let builder = Sumreport::default();
        assert!(!builder.render_options.include_frontmatter);
        assert!(builder.parse_options.normalize.is_some());
    }

    #[test]
    fn test_sumreport_raw() {
        let builder = Sumreport::new().raw();
        assert!(builder.parse_options.normalize.is_none());
    }

    #[test]
    fn test_result_stats() {
        let report = Sumreport::new().parse("1. OVERVIEW\n• a\n• b\n2. QUOTES\n\"Hi.\" - CEO");
        let stats = report.stats().unwrap();
        assert_eq!(stats.section_count, 2);
        assert_eq!(stats.bullet_item_count, 2);
        assert_eq!(stats.quote_count, 1);
        assert_eq!(stats.page_count, 1);
    }

    #[test]
    fn test_parse_is_total() {
        for input in ["", "\n\n", "   ", "\u{feff}", "1.", "A.", "•", "\"\" -"] {
            let _ = parse(input);
        }
    }

    #[test]
    fn test_parse_reader() {
        let doc = parse_reader("1. OVERVIEW\nx".as_bytes(), &ParseOptions::default()).unwrap();
        assert_eq!(doc.section_count(), 1);
    }

    #[test]
    fn test_parse_file_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        std::fs::write(&path, "1. OVERVIEW\nx").unwrap();

        let doc = parse_file(&path, &ParseOptions::default()).unwrap();
        assert!(doc.metadata.source.unwrap().ends_with("summary.txt"));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/summary.txt", &ParseOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_convenience_functions() {
        let text = "1. OVERVIEW\n• Revenue 12%";
        assert!(to_html(text).unwrap().contains("<li>Revenue 12%</li>"));
        assert!(to_markdown(text).unwrap().contains("- Revenue 12%"));
        assert!(to_text(text).unwrap().contains("• Revenue 12%"));
        assert!(to_json(text, JsonFormat::Compact).unwrap().contains("bullet_list"));
        assert!(to_pdf(text).unwrap().starts_with(b"%PDF"));
    }
}
