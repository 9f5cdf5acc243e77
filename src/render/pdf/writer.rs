//! PDF serialization with `lopdf`.
//!
//! Text is set in the embedded DejaVu fonts as composite (Type0) fonts with
//! `Identity-H` encoding. Every distinct character gets a two-byte CID, the
//! same in all faces, and one shared `ToUnicode` map turns CIDs back into
//! text, so any Unicode text can be drawn and extracted again. Characters
//! the fonts have no glyph for are drawn as the missing-glyph box and
//! reported with `log::warn!`.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat};
use ttf_parser::GlyphId;

use crate::error::Result;
use crate::model::Metadata;

use super::fonts::{EmbeddedFont, FontSet};
use super::layout::{FontFace, PaginatedDocument, PlacedLine};
use super::PdfOptions;

const PRODUCER: &str = concat!("sumreport ", env!("CARGO_PKG_VERSION"));

/// Entries per `beginbfchar` block; the CMap format allows at most 100.
const BFCHAR_CHUNK: usize = 100;

/// Serialize a laid-out document to PDF bytes.
pub fn write_pdf(
    layout: &PaginatedDocument,
    metadata: &Metadata,
    options: &PdfOptions,
) -> Result<Vec<u8>> {
    let fonts = FontSet::standard()?;
    let mut pdf = PdfDocument::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut encoder = CidEncoder::default();
    let page_total = layout.page_count();
    let mut kids: Vec<Object> = Vec::with_capacity(page_total);

    for page in &layout.pages {
        let mut operations = Vec::new();
        for line in &page.lines {
            draw_line(&mut operations, line, &mut encoder);
        }

        if options.page_numbers {
            let footer = format!("Page {} of {}", page.number, page_total);
            let size = options.body_size * 0.8;
            let width = fonts.get(FontFace::Regular).text_width(&footer, size);
            let x = ((layout.width - width) / 2.0).max(0.0);
            let y = options.margin / 2.0;
            let text = encoder.encode(FontFace::Regular, &footer);
            draw_text(&mut operations, FontFace::Regular, size, x, y, text);
        }

        let content = Content { operations };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let to_unicode_id = pdf.add_object(Stream::new(dictionary! {}, encoder.to_unicode_cmap()));
    let mut font_resources = Dictionary::new();
    for face in FontFace::ALL {
        if encoder.uses(face) {
            let font_id = add_font(&mut pdf, fonts.get(face), face, &encoder, to_unicode_id);
            font_resources.set(font_resource(face), font_id);
        }
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => font_resources,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_total as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.width.into(), layout.height.into()],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(info_dict(metadata));
    pdf.trailer.set("Info", info_id);

    for face in FontFace::ALL {
        let font = fonts.get(face);
        let missing = encoder
            .chars_of(face)
            .filter(|c| !c.is_whitespace() && font.glyph(*c).is_none())
            .count();
        if missing > 0 {
            log::warn!(
                "{} characters have no glyph in {} and are drawn as boxes",
                missing,
                font.name
            );
        }
    }

    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    log::debug!(
        "wrote PDF with {} pages, {} distinct characters ({} bytes)",
        page_total,
        encoder.chars.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Add the Type0 font, its CID font and the embedded font program.
fn add_font(
    pdf: &mut PdfDocument,
    font: &EmbeddedFont,
    face: FontFace,
    encoder: &CidEncoder,
    to_unicode_id: ObjectId,
) -> ObjectId {
    let data = font.data();
    let file = Stream::new(dictionary! { "Length1" => data.len() as i64 }, data.to_vec());
    let file_id = pdf.add_object(file);

    // Symbolic off, nonsymbolic on; italic when slanted.
    let flags = if face == FontFace::Italic { 32 | 64 } else { 32 };
    let bbox: Vec<Object> = font.bounding_box().iter().map(|v| (*v).into()).collect();
    let descriptor_id = pdf.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => font.name,
        "Flags" => flags,
        "FontBBox" => bbox,
        "ItalicAngle" => font.italic_angle(),
        "Ascent" => font.ascent(),
        "Descent" => font.descent(),
        "CapHeight" => font.cap_height(),
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    // CID -> glyph id, two bytes per CID starting at CID 0.
    let mut gid_map = vec![0u8, 0u8];
    let mut widths: Vec<Object> = Vec::with_capacity(encoder.chars.len());
    for c in &encoder.chars {
        let glyph = font.glyph(*c).map_or(0, |g| g.0);
        gid_map.extend_from_slice(&glyph.to_be_bytes());
        widths.push((font.advance(*c).round() as i64).into());
    }
    let gid_map_id = pdf.add_object(Stream::new(dictionary! {}, gid_map));

    let mut cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => font.name,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => font.glyph_advance(GlyphId(0)).round() as i64,
        "CIDToGIDMap" => gid_map_id,
    };
    if !widths.is_empty() {
        cid_font.set("W", vec![Object::Integer(1), Object::Array(widths)]);
    }
    let cid_font_id = pdf.add_object(cid_font);

    pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => font.name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![cid_font_id.into()],
        "ToUnicode" => to_unicode_id,
    })
}

fn info_dict(metadata: &Metadata) -> Dictionary {
    let mut info = dictionary! {
        "Title" => text_string(&metadata.title),
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(call_type) = metadata.call_type {
        info.set("Subject", text_string(call_type.label()));
    }
    if let Some(created) = metadata.created {
        let date = format!("D:{}Z", created.format("%Y%m%d%H%M%S"));
        info.set("CreationDate", Object::string_literal(date));
    }
    info
}

/// A PDF text string: literal for ASCII, UTF-16BE with byte order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
        FontFace::Italic => "F3",
    }
}

fn draw_line(operations: &mut Vec<Operation>, line: &PlacedLine, encoder: &mut CidEncoder) {
    let face = line.role.face();
    if let Some(marker) = line.marker {
        let mut buf = [0u8; 4];
        let marker = encoder.encode(FontFace::Regular, marker.encode_utf8(&mut buf));
        let x = (line.x - line.font_size).max(0.0);
        draw_text(operations, FontFace::Regular, line.font_size, x, line.y, marker);
    }
    let text = line.text.trim_end();
    if !text.is_empty() {
        let text = encoder.encode(face, text);
        draw_text(operations, face, line.font_size, line.x, line.y, text);
    }
}

fn draw_text(
    operations: &mut Vec<Operation>,
    face: FontFace,
    size: f32,
    x: f32,
    y: f32,
    text: Vec<u8>,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font_resource(face).into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
    operations.push(Operation::new("Tj", vec![Object::String(text, StringFormat::Hexadecimal)]));
    operations.push(Operation::new("ET", vec![]));
}

/// Assigns two-byte CIDs to characters in order of first use.
///
/// CID 0 is the missing glyph; CID `n` is `chars[n - 1]`.
#[derive(Debug, Default)]
struct CidEncoder {
    cids: HashMap<char, u16>,
    chars: Vec<char>,
    /// CIDs drawn in each face
    used: HashMap<FontFace, BTreeSet<u16>>,
}

impl CidEncoder {
    fn encode(&mut self, face: FontFace, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let cid = self.cid(c);
            self.used.entry(face).or_default().insert(cid);
            bytes.extend_from_slice(&cid.to_be_bytes());
        }
        bytes
    }

    fn cid(&mut self, c: char) -> u16 {
        if let Some(cid) = self.cids.get(&c) {
            return *cid;
        }
        match u16::try_from(self.chars.len() + 1) {
            Ok(cid) => {
                self.chars.push(c);
                self.cids.insert(c, cid);
                cid
            }
            Err(_) => 0,
        }
    }

    fn uses(&self, face: FontFace) -> bool {
        self.used.contains_key(&face)
    }

    /// Distinct characters drawn in a face.
    fn chars_of(&self, face: FontFace) -> impl Iterator<Item = char> + '_ {
        self.used
            .get(&face)
            .into_iter()
            .flatten()
            .filter_map(|cid| self.chars.get(usize::from(*cid).checked_sub(1)?).copied())
    }

    /// CMap from CIDs back to Unicode.
    fn to_unicode_cmap(&self) -> Vec<u8> {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let entries: Vec<(usize, &char)> = self.chars.iter().enumerate().collect();
        for chunk in entries.chunks(BFCHAR_CHUNK) {
            let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
            for (index, c) in chunk {
                let mut units = [0u16; 2];
                let hex: String = c
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{:04X}", u))
                    .collect();
                let _ = writeln!(cmap, "<{:04X}> <{}>", index + 1, hex);
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CIDResource defineresource pop\n\
             end\n\
             end\n",
        );
        cmap.into_bytes()
    }
}
