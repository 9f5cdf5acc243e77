//! Embedded TrueType fonts.
//!
//! Reports are set in DejaVu Sans, which covers Latin, Greek, Cyrillic and
//! most symbols found in summaries. The font files are compiled into the
//! library and parsed once with `ttf-parser`; layout measures text with
//! their real advance widths and the writer embeds them in the PDF.

use once_cell::sync::Lazy;
use ttf_parser::{Face, GlyphId};

use crate::error::{Error, Result};

use super::layout::FontFace;

static REGULAR: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");
static ITALIC: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Oblique.ttf");

static STANDARD: Lazy<std::result::Result<FontSet, String>> = Lazy::new(|| {
    let fonts = FontSet {
        regular: EmbeddedFont::load("DejaVuSans", REGULAR)?,
        bold: EmbeddedFont::load("DejaVuSans-Bold", BOLD)?,
        italic: EmbeddedFont::load("DejaVuSans-Oblique", ITALIC)?,
    };
    log::debug!(
        "loaded {} bytes of embedded fonts",
        REGULAR.len() + BOLD.len() + ITALIC.len()
    );
    Ok(fonts)
});

/// A parsed font program.
///
/// Metrics are in glyph space: 1000 units per em.
pub struct EmbeddedFont {
    /// PostScript name used as `BaseFont`
    pub name: &'static str,
    data: &'static [u8],
    face: Face<'static>,
    scale: f32,
}

impl EmbeddedFont {
    fn load(name: &'static str, data: &'static [u8]) -> std::result::Result<Self, String> {
        let face = Face::parse(data, 0).map_err(|e| format!("{}: {}", name, e))?;
        let units = face.units_per_em();
        if units == 0 {
            return Err(format!("{}: zero units per em", name));
        }
        Ok(Self {
            name,
            data,
            scale: 1000.0 / f32::from(units),
            face,
        })
    }

    /// The raw font file.
    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    /// Glyph for a character, if the font has one.
    pub fn glyph(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c)
    }

    /// Advance width of a character in glyph space.
    ///
    /// Characters without a glyph take the width of the missing-glyph box.
    pub fn advance(&self, c: char) -> f32 {
        let glyph = self.glyph(c).unwrap_or(GlyphId(0));
        self.glyph_advance(glyph)
    }

    /// Advance width of a glyph in glyph space.
    pub fn glyph_advance(&self, glyph: GlyphId) -> f32 {
        self.face
            .glyph_hor_advance(glyph)
            .map_or(0.0, |w| f32::from(w) * self.scale)
    }

    /// Width of a text at the given font size, in points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c)).sum::<f32>() * size / 1000.0
    }

    fn scaled(&self, value: i16) -> i64 {
        (f32::from(value) * self.scale).round() as i64
    }

    /// Height above the baseline.
    pub fn ascent(&self) -> i64 {
        self.scaled(self.face.ascender())
    }

    /// Depth below the baseline (negative).
    pub fn descent(&self) -> i64 {
        self.scaled(self.face.descender())
    }

    /// Height of capital letters.
    pub fn cap_height(&self) -> i64 {
        self.scaled(self.face.capital_height().unwrap_or(self.face.ascender()))
    }

    /// Bounding box of all glyphs: `[x_min, y_min, x_max, y_max]`.
    pub fn bounding_box(&self) -> [i64; 4] {
        let rect = self.face.global_bounding_box();
        [
            self.scaled(rect.x_min),
            self.scaled(rect.y_min),
            self.scaled(rect.x_max),
            self.scaled(rect.y_max),
        ]
    }

    /// Slant of the font in degrees counter-clockwise from vertical.
    pub fn italic_angle(&self) -> f32 {
        self.face.italic_angle()
    }
}

/// The three faces used by reports.
pub struct FontSet {
    regular: EmbeddedFont,
    bold: EmbeddedFont,
    italic: EmbeddedFont,
}

impl FontSet {
    /// The bundled DejaVu Sans fonts, parsed on first use.
    pub fn standard() -> Result<&'static FontSet> {
        STANDARD.as_ref().map_err(|e| Error::Font(e.clone()))
    }

    /// Font for a face.
    pub fn get(&self, face: FontFace) -> &EmbeddedFont {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_fonts_load() {
        let fonts = FontSet::standard().unwrap();
        assert_eq!(fonts.get(FontFace::Bold).name, "DejaVuSans-Bold");
        assert!(fonts.get(FontFace::Regular).ascent() > 0);
        assert!(fonts.get(FontFace::Regular).descent() < 0);
        assert!(fonts.get(FontFace::Italic).italic_angle() < 0.0);
    }

    #[test]
    fn test_fonts_cover_cyrillic_and_symbols() {
        let regular = FontSet::standard().unwrap().get(FontFace::Regular);
        for c in ['A', 'é', 'Ж', 'ы', '•', '—', '€', '“'] {
            assert!(regular.glyph(c).is_some(), "no glyph for {:?}", c);
        }
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let regular = FontSet::standard().unwrap().get(FontFace::Regular);
        let small = regular.text_width("Revenue", 10.0);
        let large = regular.text_width("Revenue", 20.0);
        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 0.01);
        assert!(regular.advance('W') > regular.advance('i'));
    }

    #[test]
    fn test_bold_runs_wider() {
        let fonts = FontSet::standard().unwrap();
        let text = "Executive Overview";
        assert!(
            fonts.get(FontFace::Bold).text_width(text, 12.0)
                > fonts.get(FontFace::Regular).text_width(text, 12.0)
        );
    }
}
