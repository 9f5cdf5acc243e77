//! Paginated PDF rendering.
//!
//! Rendering happens in three steps:
//!
//! 1. [`layout`] flows the document onto fixed-size pages, wrapping text
//!    by the widths of the embedded [`fonts`] and inserting page breaks
//!    between blocks.
//! 2. [`writer`] serializes the laid-out pages with `lopdf`.
//! 3. [`export`] writes the bytes to disk atomically.

pub mod export;
pub mod fonts;
pub mod layout;
pub mod writer;

use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Document;

pub use export::{write_atomic, DEFAULT_PDF_FILE_NAME};
pub use fonts::{EmbeddedFont, FontSet};
pub use layout::{
    paginate, BlockRef, FontFace, LaidOutPage, LineRole, PaginatedDocument, Paginator, PlacedLine,
};
pub use writer::write_pdf;

/// Standard page sizes, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// ISO A4 (595 x 842 pt)
    #[default]
    A4,
    /// US Letter (612 x 792 pt)
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Parse a page size name ("a4", "letter").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSize::parse(s).ok_or_else(|| Error::InvalidOption(format!("page size '{}'", s.trim())))
    }
}

/// Options for PDF layout and output.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Page size
    pub page_size: PageSize,

    /// Margin on every side, in points
    pub margin: f32,

    /// Report title font size
    pub title_size: f32,

    /// Section heading font size
    pub section_size: f32,

    /// Subsection heading font size
    pub subsection_size: f32,

    /// Body text font size
    pub body_size: f32,

    /// Line height as a multiple of the font size
    pub line_spacing: f32,

    /// Vertical space after each block
    pub block_spacing: f32,

    /// Left indent of bullet items
    pub bullet_indent: f32,

    /// Left indent of quotes
    pub quote_indent: f32,

    /// Draw the report title at the top of the first page
    pub include_title: bool,

    /// Draw "Page N of M" footers
    pub page_numbers: bool,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Set the body font size.
    pub fn with_body_size(mut self, size: f32) -> Self {
        self.body_size = size.max(1.0);
        self
    }

    /// Enable or disable the title on the first page.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable or disable page number footers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Font size used for a line role.
    pub fn font_size(&self, role: LineRole) -> f32 {
        match role {
            LineRole::Title => self.title_size,
            LineRole::SectionHeading => self.section_size,
            LineRole::SubsectionHeading => self.subsection_size,
            _ => self.body_size,
        }
    }

    /// Height of one line of the given role.
    pub fn line_height(&self, role: LineRole) -> f32 {
        self.font_size(role) * self.line_spacing
    }

    /// Check that pages leave room for text.
    ///
    /// Fails with [`Error::InvalidOption`] when the margins leave no width
    /// for indented lines or no height for the tallest line.
    pub fn validate(&self) -> Result<()> {
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(Error::InvalidOption(format!(
                "line spacing {} must be positive",
                self.line_spacing
            )));
        }

        let (width, height) = self.page_size.dimensions();
        let deepest_indent = self.quote_indent + self.bullet_indent;
        let text_width = width - 2.0 * self.margin - deepest_indent;
        let text_height = height - 2.0 * self.margin - self.footer_height();
        let tallest = [LineRole::Title, LineRole::SectionHeading, LineRole::Paragraph]
            .into_iter()
            .map(|role| self.line_height(role))
            .fold(0.0, f32::max);

        if text_width <= 0.0 || text_height < tallest {
            return Err(Error::InvalidOption(format!(
                "margin of {}pt leaves no room for text on a {:?} page",
                self.margin, self.page_size
            )));
        }
        Ok(())
    }

    /// Space reserved at the bottom of each page for the footer.
    pub fn footer_height(&self) -> f32 {
        if self.page_numbers {
            self.body_size * 2.0
        } else {
            0.0
        }
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 56.0,
            title_size: 20.0,
            section_size: 15.0,
            subsection_size: 12.5,
            body_size: 11.0,
            line_spacing: 1.4,
            block_spacing: 6.0,
            bullet_indent: 16.0,
            quote_indent: 20.0,
            include_title: true,
            page_numbers: true,
        }
    }
}

/// Render a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &PdfOptions) -> Result<Vec<u8>> {
    let layout = paginate(doc, options)?;
    write_pdf(&layout, &doc.metadata, options)
}

/// Render a document and write it to `path` atomically.
///
/// Either the whole file is written or the target is left untouched.
pub fn export_pdf(doc: &Document, path: impl AsRef<Path>, options: &PdfOptions) -> Result<()> {
    let bytes = to_pdf(doc, options)?;
    write_atomic(path.as_ref(), &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size() {
        assert_eq!(PageSize::A4.dimensions(), (595.0, 842.0));
        assert_eq!(PageSize::parse("Letter"), Some(PageSize::Letter));
        assert_eq!(PageSize::parse("tabloid"), None);
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);

        let err = "tabloid".parse::<PageSize>().unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
        assert_eq!(err.to_string(), "Invalid option: page size 'tabloid'");
    }

    #[test]
    fn test_margins_must_leave_room_for_text() {
        assert!(PdfOptions::default().validate().is_ok());

        let doc = crate::parse("1. OVERVIEW\nBody");
        let options = PdfOptions::default().with_margin(300.0);
        assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
        assert!(matches!(to_pdf(&doc, &options), Err(Error::InvalidOption(_))));

        let mut options = PdfOptions::default();
        options.line_spacing = 0.0;
        assert!(matches!(paginate(&doc, &options), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_font_sizes_by_role() {
        let options = PdfOptions::default();
        assert_eq!(options.font_size(LineRole::Title), 20.0);
        assert_eq!(options.font_size(LineRole::Bullet), 11.0);
        assert!(options.line_height(LineRole::SectionHeading) > options.line_height(LineRole::Quote));
    }

    #[test]
    fn test_to_pdf_is_deterministic() {
        let doc = crate::parse("1. OVERVIEW\n• one\n\"Up.\" - CFO\nRevenue 7%");
        let options = PdfOptions::default();
        let first = to_pdf(&doc, &options).unwrap();
        let second = to_pdf(&doc, &options).unwrap();
        assert!(first.starts_with(b"%PDF-"));
        assert_eq!(first, second);
    }
}
