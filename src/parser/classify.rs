//! Line classification.
//!
//! Each trimmed, non-blank line of a subsection body gets exactly one kind.
//! Rules are evaluated in order and the first match wins:
//!
//! 1. quote: `"text" - Speaker, Title` (straight or curly quotes, optional bullet marker)
//! 2. bullet: leading `•`, `●`, `◦`, `▪`, `‣`, or `-`/`*` followed by whitespace
//! 3. metric: contains an ASCII digit
//! 4. paragraph: anything else

use regex::Regex;

use crate::model::Block;

/// Bullet glyph used when rendering bullet items.
pub const CANONICAL_BULLET: char = '•';

/// Classification of a single line with its extracted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Attributed quotation
    Quote {
        /// Quoted text without quotation marks
        text: String,
        /// Part of the attribution before the first comma
        speaker: Option<String>,
        /// Part of the attribution after the first comma
        title: Option<String>,
    },
    /// Bullet item, marker stripped
    Bullet(String),
    /// Line containing numeric content
    Metric(String),
    /// Plain text
    Paragraph(String),
}

impl LineKind {
    /// Check if this is a bullet item.
    pub fn is_bullet(&self) -> bool {
        matches!(self, LineKind::Bullet(_))
    }

    /// Convert into a standalone block. Bullets become a one-item list.
    pub fn into_block(self) -> Block {
        match self {
            LineKind::Quote {
                text,
                speaker,
                title,
            } => Block::Quote {
                text,
                speaker,
                title,
            },
            LineKind::Bullet(item) => Block::BulletList { items: vec![item] },
            LineKind::Metric(text) => Block::MetricLine { text },
            LineKind::Paragraph(text) => Block::Paragraph { text },
        }
    }
}

/// Ordered-rule line classifier.
pub struct LineClassifier {
    quote_regex: Regex,
    bullet_regex: Regex,
}

impl LineClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self {
            quote_regex: Regex::new(
                r#"^(?:[•●◦▪‣*-][ \t]*)?["“”](.+?)["“”][ \t]*[-–—][ \t]*(.+)$"#,
            )
            .unwrap(),
            bullet_regex: Regex::new(r"^(?:[•●◦▪‣][ \t]*|[-*][ \t]+)(.*)$").unwrap(),
        }
    }

    /// Classify one line. The line is trimmed first.
    pub fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();

        if let Some(caps) = self.quote_regex.captures(line) {
            let text = caps[1].trim().to_string();
            let (speaker, title) = split_attribution(&caps[2]);
            return LineKind::Quote {
                text,
                speaker,
                title,
            };
        }

        if let Some(caps) = self.bullet_regex.captures(line) {
            return LineKind::Bullet(caps[1].trim().to_string());
        }

        if line.chars().any(|c| c.is_ascii_digit()) {
            return LineKind::Metric(line.to_string());
        }

        LineKind::Paragraph(line.to_string())
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Split "Jane Doe, CFO" into speaker and title at the first comma.
fn split_attribution(attribution: &str) -> (Option<String>, Option<String>) {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match attribution.split_once(',') {
        Some((speaker, title)) => (non_empty(speaker), non_empty(title)),
        None => (non_empty(attribution), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineKind {
        LineClassifier::new().classify(line)
    }

    #[test]
    fn test_quote_with_speaker_and_title() {
        assert_eq!(
            classify("\"Growth was strong.\" - Jane Doe, CFO"),
            LineKind::Quote {
                text: "Growth was strong.".into(),
                speaker: Some("Jane Doe".into()),
                title: Some("CFO".into()),
            }
        );
    }

    #[test]
    fn test_quote_curly_and_dash_variants() {
        assert_eq!(
            classify("“We doubled capacity.” — Sam Lee"),
            LineKind::Quote {
                text: "We doubled capacity.".into(),
                speaker: Some("Sam Lee".into()),
                title: None,
            }
        );
    }

    #[test]
    fn test_quote_title_keeps_later_commas() {
        let kind = classify("\"Fine.\" - Ana Ruiz, VP, Investor Relations");
        assert_eq!(
            kind,
            LineKind::Quote {
                text: "Fine.".into(),
                speaker: Some("Ana Ruiz".into()),
                title: Some("VP, Investor Relations".into()),
            }
        );
    }

    #[test]
    fn test_bulleted_quote_is_quote() {
        assert!(matches!(
            classify("• \"Margins held up.\" - CEO"),
            LineKind::Quote { .. }
        ));
    }

    #[test]
    fn test_quote_wins_over_metric() {
        assert!(matches!(
            classify("\"Revenue rose 12%.\" - Jane Doe"),
            LineKind::Quote { .. }
        ));
    }

    #[test]
    fn test_quote_without_attribution_is_not_quote() {
        assert_eq!(
            classify("\"Just a quote\""),
            LineKind::Paragraph("\"Just a quote\"".into())
        );
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(classify("• one"), LineKind::Bullet("one".into()));
        assert_eq!(classify("●two"), LineKind::Bullet("two".into()));
        assert_eq!(classify("- three"), LineKind::Bullet("three".into()));
        assert_eq!(classify("*  four"), LineKind::Bullet("four".into()));
    }

    #[test]
    fn test_bullet_wins_over_metric() {
        assert_eq!(
            classify("- Revenue up 12%"),
            LineKind::Bullet("Revenue up 12%".into())
        );
    }

    #[test]
    fn test_negative_number_is_not_bullet() {
        assert_eq!(
            classify("-5% margin compression"),
            LineKind::Metric("-5% margin compression".into())
        );
    }

    #[test]
    fn test_emphasis_is_not_bullet() {
        assert_eq!(
            classify("**Outlook** remains cautious"),
            LineKind::Paragraph("**Outlook** remains cautious".into())
        );
    }

    #[test]
    fn test_metric_and_paragraph() {
        assert_eq!(
            classify("  Revenue reached $4.2B  "),
            LineKind::Metric("Revenue reached $4.2B".into())
        );
        assert_eq!(
            classify("Management sounded confident."),
            LineKind::Paragraph("Management sounded confident.".into())
        );
    }

    #[test]
    fn test_into_block() {
        assert_eq!(
            LineKind::Bullet("x".into()).into_block(),
            Block::BulletList {
                items: vec!["x".into()]
            }
        );
        assert_eq!(
            LineKind::Metric("1".into()).into_block(),
            Block::MetricLine { text: "1".into() }
        );
    }

    #[test]
    fn test_split_attribution() {
        assert_eq!(
            split_attribution(" Jane Doe , CFO "),
            (Some("Jane Doe".into()), Some("CFO".into()))
        );
        assert_eq!(split_attribution("Jane"), (Some("Jane".into()), None));
        assert_eq!(split_attribution("Jane,"), (Some("Jane".into()), None));
    }
}
