//! Manual line-flow pagination.
//!
//! The paginator keeps a vertical cursor on the current page. Each block is
//! wrapped into lines and placed as a unit: if it does not fit in the space
//! left, a new page is started first. Headings travel with the unit that
//! follows them. Only a block taller than a whole page
//! is split, line by line, across pages. Nothing is ever truncated, and the
//! wrapped fragments of a text concatenate back to the original text.

use crate::error::Result;
use crate::model::{Block, Document, Section, Subsection};
use crate::parser::CANONICAL_BULLET;
use crate::render::visitor::{walk, BlockPosition, DocumentVisitor};

use super::fonts::FontSet;
use super::PdfOptions;

/// Font face of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    /// DejaVu Sans
    Regular,
    /// DejaVu Sans Bold
    Bold,
    /// DejaVu Sans Oblique
    Italic,
}

impl FontFace {
    /// All faces, in resource order.
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];
}

/// What a placed line is part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Report title
    Title,
    /// Preamble text
    Preamble,
    /// Section heading
    SectionHeading,
    /// Subsection heading
    SubsectionHeading,
    /// Paragraph block
    Paragraph,
    /// Bullet list item
    Bullet,
    /// Quote text
    Quote,
    /// Quote attribution
    Attribution,
    /// Metric line
    Metric,
}

impl LineRole {
    /// Font face used for this role.
    pub fn face(&self) -> FontFace {
        match self {
            LineRole::Title
            | LineRole::SectionHeading
            | LineRole::SubsectionHeading
            | LineRole::Metric => FontFace::Bold,
            LineRole::Quote => FontFace::Italic,
            _ => FontFace::Regular,
        }
    }

    /// Check if this role is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            LineRole::Title | LineRole::SectionHeading | LineRole::SubsectionHeading
        )
    }
}

/// Reference from a placed line back to the block text it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockRef {
    /// Position of the block in the document
    pub position: BlockPosition,
    /// Bullet item index (0 for other blocks)
    pub item: usize,
}

/// A line of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// What the line is part of
    pub role: LineRole,
    /// Left edge of the text, in points from the left of the page
    pub x: f32,
    /// Baseline, in points from the bottom of the page
    pub y: f32,
    /// Font size in points
    pub font_size: f32,
    /// Marker drawn left of the text (bullet or attribution dash)
    pub marker: Option<char>,
    /// Text fragment, including any whitespace it was broken after
    pub text: String,
    /// Block the text belongs to (`None` for title, preamble and headings)
    pub block: Option<BlockRef>,
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutPage {
    /// 1-based page number
    pub number: usize,
    /// Lines from top to bottom
    pub lines: Vec<PlacedLine>,
}

/// A document flowed onto pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedDocument {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Pages in order (never empty)
    pub pages: Vec<LaidOutPage>,
}

impl PaginatedDocument {
    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Iterate over every placed line in order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Pages (1-based) on which a block has lines.
    pub fn pages_of(&self, position: BlockPosition) -> Vec<usize> {
        let mut pages: Vec<usize> = self
            .pages
            .iter()
            .filter(|page| {
                page.lines
                    .iter()
                    .any(|l| l.block.map(|b| b.position) == Some(position))
            })
            .map(|page| page.number)
            .collect();
        pages.dedup();
        pages
    }

    /// Reassemble the text of a block item from its placed fragments.
    ///
    /// Quote attributions are excluded; see [`attribution_text`](Self::attribution_text).
    pub fn item_text(&self, reference: BlockRef) -> String {
        self.lines()
            .filter(|l| l.block == Some(reference) && l.role != LineRole::Attribution)
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Reassemble the attribution of a quote block.
    pub fn attribution_text(&self, position: BlockPosition) -> String {
        self.lines()
            .filter(|l| {
                l.role == LineRole::Attribution && l.block.map(|b| b.position) == Some(position)
            })
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Pages (1-based) on which the preamble has lines.
    pub fn preamble_pages(&self) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|page| page.lines.iter().any(|l| l.role == LineRole::Preamble))
            .map(|page| page.number)
            .collect()
    }

    /// Reassemble the preamble text with its line breaks removed.
    pub fn preamble_text(&self) -> String {
        self.role_text(LineRole::Preamble)
    }

    /// Reassemble all text of a given role.
    pub fn role_text(&self, role: LineRole) -> String {
        self.lines()
            .filter(|l| l.role == role)
            .map(|l| l.text.as_str())
            .collect()
    }
}

/// Flow a document onto pages, measuring text with the embedded fonts.
pub fn paginate(doc: &Document, options: &PdfOptions) -> Result<PaginatedDocument> {
    options.validate()?;
    let mut paginator = Paginator::new(options, FontSet::standard()?);
    walk(doc, &mut paginator);
    Ok(paginator.finish())
}

/// A line waiting to be placed.
struct PendingLine {
    role: LineRole,
    indent: f32,
    marker: Option<char>,
    text: String,
    block: Option<BlockRef>,
    /// Vertical space left below the line
    space_after: f32,
}

/// Line-flow paginator, driven as a document visitor.
pub struct Paginator<'a> {
    options: &'a PdfOptions,
    fonts: &'a FontSet,
    width: f32,
    height: f32,
    /// Usable height between top margin and footer
    available: f32,
    pages: Vec<LaidOutPage>,
    current: Vec<PlacedLine>,
    /// Height used on the current page
    cursor: f32,
    /// Heading lines waiting for the content they introduce
    held: Vec<PendingLine>,
    held_space_before: f32,
}

impl<'a> Paginator<'a> {
    /// Create a paginator with the given options and fonts.
    pub fn new(options: &'a PdfOptions, fonts: &'a FontSet) -> Self {
        let (width, height) = options.page_size.dimensions();
        let available = (height - 2.0 * options.margin - options.footer_height()).max(1.0);
        Self {
            options,
            fonts,
            width,
            height,
            available,
            pages: Vec::new(),
            current: Vec::new(),
            cursor: 0.0,
            held: Vec::new(),
            held_space_before: 0.0,
        }
    }

    /// Finish layout and return the pages.
    pub fn finish(mut self) -> PaginatedDocument {
        if !self.held.is_empty() {
            self.emit(Vec::new(), 0.0);
        }
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        PaginatedDocument {
            width: self.width,
            height: self.height,
            pages: self.pages,
        }
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(LaidOutPage {
            number,
            lines: std::mem::take(&mut self.current),
        });
        self.cursor = 0.0;
    }

    /// Wrap a text into pending lines of one role.
    fn wrap(
        &self,
        role: LineRole,
        indent: f32,
        marker: Option<char>,
        text: &str,
        block: Option<BlockRef>,
    ) -> Vec<PendingLine> {
        let size = self.options.font_size(role);
        let font = self.fonts.get(role.face());
        let width = self.width - 2.0 * self.options.margin - indent;

        wrap_text(text, width, |c| font.advance(c) * size / 1000.0)
            .into_iter()
            .enumerate()
            .map(|(i, fragment)| PendingLine {
                role,
                indent,
                marker: if i == 0 { marker } else { None },
                text: fragment,
                block,
                space_after: 0.0,
            })
            .collect()
    }

    /// Keep heading lines back so they are placed together with the next unit.
    fn hold(&mut self, mut lines: Vec<PendingLine>, space_before: f32, space_after: f32) {
        if lines.is_empty() {
            return;
        }
        match self.held.last_mut() {
            Some(previous) => previous.space_after += space_before,
            None => self.held_space_before = space_before,
        }
        if let Some(last) = lines.last_mut() {
            last.space_after += space_after;
        }
        self.held.append(&mut lines);
    }

    /// Place a unit of lines that should stay on one page.
    ///
    /// Held heading lines go first, on the same page as the unit when both
    /// fit together. When only the unit fits on a page by itself, the
    /// headings end the current page and the unit starts the next one. A
    /// unit is split across pages only when it is taller than a page.
    fn emit(&mut self, lines: Vec<PendingLine>, space_before: f32) {
        let held = std::mem::take(&mut self.held);
        if held.is_empty() && lines.is_empty() {
            return;
        }
        let space_before = if held.is_empty() {
            space_before
        } else {
            self.held_space_before
        };

        if self.cursor > 0.0 {
            self.cursor += space_before;
        }

        let held_height = self.unit_height(&held);
        let unit_height = self.unit_height(&lines);
        let separate = !held.is_empty()
            && !lines.is_empty()
            && held_height + unit_height > self.available
            && unit_height <= self.available;

        if separate {
            if self.cursor > 0.0 && self.cursor + held_height > self.available {
                self.new_page();
            }
            self.place_unit(held, held_height);
            self.new_page();
            self.place_unit(lines, unit_height);
            return;
        }

        if self.cursor > 0.0 && self.cursor + held_height + unit_height > self.available {
            self.new_page();
        }
        self.place_unit(held, held_height);
        self.place_unit(lines, unit_height);
    }

    /// Total height of a unit, spacing included.
    fn unit_height(&self, lines: &[PendingLine]) -> f32 {
        lines
            .iter()
            .map(|l| self.options.line_height(l.role) + l.space_after)
            .sum()
    }

    fn place_unit(&mut self, lines: Vec<PendingLine>, height: f32) {
        let overflow = height > self.available;
        if overflow {
            log::debug!(
                "block of {} lines is taller than a page, splitting across pages",
                lines.len()
            );
        }

        for line in lines {
            let line_height = self.options.line_height(line.role);
            if overflow && self.cursor > 0.0 && self.cursor + line_height > self.available {
                self.new_page();
            }
            self.place(line, line_height);
        }
    }

    fn place(&mut self, line: PendingLine, line_height: f32) {
        let font_size = self.options.font_size(line.role);
        let top = self.height - self.options.margin - self.cursor;
        self.current.push(PlacedLine {
            role: line.role,
            x: self.options.margin + line.indent,
            y: top - font_size,
            font_size,
            marker: line.marker,
            text: line.text,
            block: line.block,
        });
        self.cursor += line_height + line.space_after;
    }
}

impl DocumentVisitor for Paginator<'_> {
    fn start_document(&mut self, doc: &Document) {
        if self.options.include_title {
            let lines = self.wrap(LineRole::Title, 0.0, None, &doc.metadata.title, None);
            self.hold(lines, 0.0, self.options.block_spacing * 2.0);
        }
    }

    fn visit_preamble(&mut self, text: &str) {
        let lines = text
            .lines()
            .flat_map(|line| self.wrap(LineRole::Preamble, 0.0, None, line, None))
            .collect();
        self.emit(lines, 0.0);
        self.cursor += self.options.block_spacing;
    }

    fn start_section(&mut self, section: &Section) {
        if section.is_untitled() {
            return;
        }
        let lines = self.wrap(LineRole::SectionHeading, 0.0, None, &section.title, None);
        self.hold(
            lines,
            self.options.block_spacing * 2.0,
            self.options.block_spacing / 2.0,
        );
    }

    fn start_subsection(&mut self, subsection: &Subsection) {
        if let Some(heading) = subsection.heading() {
            let lines = self.wrap(LineRole::SubsectionHeading, 0.0, None, &heading, None);
            self.hold(lines, self.options.block_spacing, 0.0);
        }
    }

    fn visit_block(&mut self, block: &Block, position: BlockPosition) {
        let reference = |item: usize| Some(BlockRef { position, item });

        let lines = match block {
            Block::Paragraph { text } => self.wrap(LineRole::Paragraph, 0.0, None, text, reference(0)),
            Block::MetricLine { text } => self.wrap(LineRole::Metric, 0.0, None, text, reference(0)),
            Block::BulletList { items } => {
                let indent = self.options.bullet_indent;
                items
                    .iter()
                    .enumerate()
                    .flat_map(|(i, item)| {
                        self.wrap(LineRole::Bullet, indent, Some(CANONICAL_BULLET), item, reference(i))
                    })
                    .collect()
            }
            Block::Quote { text, .. } => {
                let indent = self.options.quote_indent;
                let mut lines = self.wrap(LineRole::Quote, indent, None, text, reference(0));
                if let Some(attribution) = block.attribution() {
                    lines.extend(self.wrap(
                        LineRole::Attribution,
                        indent + self.options.bullet_indent,
                        Some('—'),
                        &attribution,
                        reference(0),
                    ));
                }
                lines
            }
        };

        self.emit(lines, 0.0);
        self.cursor += self.options.block_spacing;
    }
}

/// Break text into fragments no wider than `max_width`.
///
/// `advance` gives the width of each character. Breaks after whitespace
/// where possible; a word longer than a line is cut, and every fragment
/// holds at least one character. Each fragment keeps the whitespace it was
/// broken after, so the fragments concatenate to exactly `text`. Always
/// returns at least one fragment.
pub fn wrap_text(text: &str, max_width: f32, advance: impl Fn(char) -> f32) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut rest = text;

    while let Some(limit) = overflow_index(rest, max_width, &advance) {
        let split = match rest[limit..].chars().next() {
            // The break falls right on whitespace: keep it on this line.
            Some(c) if c.is_whitespace() => limit + c.len_utf8(),
            _ => match rest[..limit].rfind(char::is_whitespace) {
                Some(pos) if pos > 0 => {
                    let width = rest[pos..].chars().next().map_or(1, char::len_utf8);
                    pos + width
                }
                _ => limit,
            },
        };

        fragments.push(rest[..split].to_string());
        rest = &rest[split..];
    }

    if !rest.is_empty() || fragments.is_empty() {
        fragments.push(rest.to_string());
    }

    fragments
}

/// Byte index of the first character that runs past `max_width`.
fn overflow_index(text: &str, max_width: f32, advance: &impl Fn(char) -> f32) -> Option<usize> {
    let mut width = 0.0;
    for (i, c) in text.char_indices() {
        width += advance(c);
        if width > max_width {
            return Some(if i == 0 { c.len_utf8() } else { i });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_keeps_all_characters() {
        let text = "The quick brown fox jumps over the lazy dog";
        let fragments = wrap_text(text, 10.0, |_| 1.0);
        assert_eq!(fragments.concat(), text);
        assert!(fragments.iter().all(|f| f.chars().count() <= 11));
        assert_eq!(fragments[0], "The quick ");
    }

    #[test]
    fn test_wrap_text_cuts_long_words() {
        let fragments = wrap_text("abcdefghij", 4.0, |_| 1.0);
        assert_eq!(fragments, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_short_and_empty() {
        assert_eq!(wrap_text("short", 80.0, |_| 1.0), vec!["short"]);
        assert_eq!(wrap_text("", 80.0, |_| 1.0), vec![""]);
    }

    #[test]
    fn test_wrap_text_multibyte() {
        let text = "Umsatz über Erwartung – stark";
        let fragments = wrap_text(text, 7.0, |_| 1.0);
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn test_single_page_layout() {
        let doc = crate::parse("1. OVERVIEW\nA. Details\n• one\n• two\n\"Up.\" - Jane Doe, CFO\nRevenue 7%");
        let layout = paginate(&doc, &PdfOptions::default()).unwrap();
        assert_eq!(layout.page_count(), 1);

        let roles: Vec<LineRole> = layout.lines().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![
                LineRole::Title,
                LineRole::SectionHeading,
                LineRole::SubsectionHeading,
                LineRole::Bullet,
                LineRole::Bullet,
                LineRole::Quote,
                LineRole::Attribution,
                LineRole::Metric,
            ]
        );

        let pos = |block| BlockPosition {
            section: 0,
            subsection: 0,
            block,
        };
        assert_eq!(layout.item_text(BlockRef { position: pos(0), item: 1 }), "two");
        assert_eq!(layout.attribution_text(pos(1)), "Jane Doe, CFO");

        let ys: Vec<f32> = layout.lines().map(|l| l.y).collect();
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let layout = paginate(&Document::new(), &PdfOptions::default().with_title(false)).unwrap();
        assert_eq!(layout.page_count(), 1);
        assert!(layout.pages[0].lines.is_empty());
    }

    #[test]
    fn test_block_that_fits_a_page_is_not_split_by_headings() {
        let mut text = String::from("1. OVERVIEW\nA. Details\n");
        for i in 0..44 {
            text.push_str(&format!("• item {}\n", i));
        }
        let options = PdfOptions::default().with_title(false);
        let layout = paginate(&crate::parse(&text), &options).unwrap();

        let position = BlockPosition {
            section: 0,
            subsection: 0,
            block: 0,
        };
        assert_eq!(layout.pages_of(position), vec![2]);
        let first_page: Vec<LineRole> = layout.pages[0].lines.iter().map(|l| l.role).collect();
        assert_eq!(
            first_page,
            vec![LineRole::SectionHeading, LineRole::SubsectionHeading]
        );
    }

    #[test]
    fn test_preamble_is_placed_as_one_unit() {
        let lines: Vec<String> = (0..45).map(|i| format!("Opening note {}", i)).collect();
        let text = format!("{}\n1. OVERVIEW\nBody", lines.join("\n"));
        let doc = crate::parse(&text);
        let layout = paginate(&doc, &PdfOptions::default()).unwrap();

        assert_eq!(layout.preamble_pages(), vec![2]);
        assert_eq!(layout.preamble_text(), lines.concat());
        assert_eq!(layout.pages[0].lines.len(), 1);
        assert_eq!(layout.pages[0].lines[0].role, LineRole::Title);
    }

    #[test]
    fn test_heading_kept_with_next_line() {
        let mut text = String::from("1. OVERVIEW\n");
        for i in 0..200 {
            text.push_str(&format!("Line {}\n", i));
            if i % 17 == 0 {
                text.push_str(&format!("{}. SECTION {}\n", i + 2, i));
            }
        }
        let layout = paginate(&crate::parse(&text), &PdfOptions::default()).unwrap();
        assert!(layout.page_count() > 1);
        for page in &layout.pages {
            let last = page.lines.last().unwrap();
            assert!(!last.role.is_heading());
        }
    }
}
