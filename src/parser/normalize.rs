//! Input normalization applied to model replies before segmentation.
//!
//! Model output drifts between runs: mixed line endings, several bullet
//! glyphs, curly quotes around attributed quotations, long runs of blank
//! lines. This pass brings those to one canonical form. It never removes a
//! line that has visible content, and running it twice gives the same result
//! as running it once.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::classify::CANONICAL_BULLET;

/// Glyphs rewritten to the canonical bullet.
const ALTERNATE_BULLETS: [char; 4] = ['●', '◦', '▪', '‣'];

/// Options for input normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Convert CRLF and lone CR line endings to LF
    pub normalize_line_endings: bool,

    /// Remove byte order marks and zero-width spaces
    pub strip_invisible: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Standardize bullet characters (●, ◦, ▪, ‣ → •)
    pub standardize_bullets: bool,

    /// Rewrite curly-quoted attributions to `"text" - Speaker`
    pub repair_quotes: bool,

    /// Maximum consecutive blank lines kept (0 = unlimited)
    pub max_blank_lines: u8,
}

impl NormalizeOptions {
    /// Only fix line endings and invisible characters.
    pub fn minimal() -> Self {
        Self {
            normalize_line_endings: true,
            strip_invisible: true,
            normalize_unicode: false,
            standardize_bullets: false,
            repair_quotes: false,
            max_blank_lines: 0,
        }
    }

    /// Everything the relay used to do to model replies, plus NFC.
    pub fn standard() -> Self {
        Self {
            normalize_line_endings: true,
            strip_invisible: true,
            normalize_unicode: true,
            standardize_bullets: true,
            repair_quotes: true,
            max_blank_lines: 1,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Normalization pipeline.
pub struct Normalizer {
    options: NormalizeOptions,
    quote_regex: Regex,
    blank_run_regex: Regex,
}

impl Normalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        let max = options.max_blank_lines.max(1) as usize;
        Self {
            options,
            quote_regex: Regex::new(r#"["“”]([^"“”\n]+)["“”][ \t]*[-–—][ \t]*([^"\n]+)"#)
                .unwrap(),
            // A blank line is a newline followed by optional horizontal whitespace.
            blank_run_regex: Regex::new(&format!(r"\n(?:[ \t]*\n){{{},}}", max + 1)).unwrap(),
        }
    }

    /// Process text through the normalization pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_line_endings {
            result = result.replace("\r\n", "\n").replace('\r', "\n");
        }

        if self.options.strip_invisible {
            result = result
                .chars()
                .filter(|c| !matches!(c, '\u{FEFF}' | '\u{200B}'))
                .collect();
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.standardize_bullets {
            result = self.standardize_bullets(&result);
        }

        if self.options.repair_quotes {
            result = self
                .quote_regex
                .replace_all(&result, "\"$1\" - $2")
                .to_string();
        }

        if self.options.max_blank_lines > 0 {
            let replacement = "\n".repeat(self.options.max_blank_lines as usize + 1);
            result = self
                .blank_run_regex
                .replace_all(&result, replacement.as_str())
                .to_string();
        }

        result
    }

    fn standardize_bullets(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if ALTERNATE_BULLETS.contains(&c) {
                    CANONICAL_BULLET
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        let normalizer = Normalizer::new(NormalizeOptions::minimal());
        assert_eq!(normalizer.process("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_strip_bom() {
        let normalizer = Normalizer::new(NormalizeOptions::minimal());
        assert_eq!(normalizer.process("\u{FEFF}1. OVERVIEW"), "1. OVERVIEW");
    }

    #[test]
    fn test_unicode_normalization() {
        let normalizer = Normalizer::default();
        let decomposed = "cafe\u{0301}";
        assert_eq!(normalizer.process(decomposed), "caf\u{e9}");
    }

    #[test]
    fn test_bullet_standardization() {
        let normalizer = Normalizer::default();
        let result = normalizer.process("● Item 1\n◦ Item 2\n▪ Item 3\n• Item 4");
        assert_eq!(result, "• Item 1\n• Item 2\n• Item 3\n• Item 4");
    }

    #[test]
    fn test_quote_repair() {
        let normalizer = Normalizer::default();
        let result = normalizer.process("“Demand stayed firm.” — Jane Doe, CFO");
        assert_eq!(result, "\"Demand stayed firm.\" - Jane Doe, CFO");
    }

    #[test]
    fn test_quote_without_attribution_untouched() {
        let normalizer = Normalizer::default();
        let text = "He called it “a turning point” for the business.";
        assert_eq!(normalizer.process(text), text);
    }

    #[test]
    fn test_collapse_blank_lines() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.process("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalizer.process("a\n  \n\t\n\nb"), "a\n\nb");
        assert_eq!(normalizer.process("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_unlimited_blank_lines() {
        let normalizer = Normalizer::new(NormalizeOptions::minimal());
        assert_eq!(normalizer.process("a\n\n\n\nb"), "a\n\n\n\nb");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = Normalizer::default();
        let text = "1. OVERVIEW\r\n\r\n\r\n● one\r\n“Quote here.” – Bob\n\n\n\nend";
        let once = normalizer.process(text);
        let twice = normalizer.process(&once);
        assert_eq!(once, twice);
    }
}
