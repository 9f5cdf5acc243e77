//! Top-level section segmentation.
//!
//! Two heading grammars are recognized:
//!
//! - strict: `1. EXECUTIVE OVERVIEW` (uppercase words, optional trailing colon)
//! - loose: `1. Executive Overview:` (free text ending in a colon, optionally
//!   followed by inline body text)
//!
//! Segmentation is positional: each heading ends the previous section's body.
//! Heading numbers are recorded but never validated.

use regex::Regex;

use super::HeadingGrammar;

/// A recognized section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    /// Heading text as found, without trailing colon or inline text
    pub title: String,
    /// Number written in the heading
    pub number: Option<u32>,
    /// Heading text without the number
    pub label: String,
}

/// A heading with the body text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    /// The heading, or `None` for the fallback section
    pub heading: Option<SectionHeading>,
    /// Body lines joined with `\n`
    pub body: String,
}

/// Result of splitting a summary into sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segmentation {
    /// Non-blank lines before the first heading
    pub preamble: Option<String>,
    /// Sections in order of appearance
    pub sections: Vec<SectionSpan>,
    /// Grammar that produced the headings (`None` if no heading was found)
    pub grammar: Option<HeadingGrammar>,
}

/// Splits summary text into numbered sections.
pub struct SectionSegmenter {
    strict_regex: Regex,
    loose_regex: Regex,
}

impl SectionSegmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        Self {
            strict_regex: Regex::new(r"^(\d+)\.\s+([A-Z][A-Z0-9 &/'’(),\-]*?)\s*:?\s*$").unwrap(),
            loose_regex: Regex::new(r"^(\d+)\.\s+([^:]*?[^:\s])\s*:(?:\s+(.*))?$").unwrap(),
        }
    }

    /// Split text into a preamble and sections.
    pub fn segment(&self, text: &str, grammar: HeadingGrammar) -> Segmentation {
        if text.trim().is_empty() {
            return Segmentation::default();
        }

        let lines: Vec<&str> = text.lines().collect();

        let (grammar, headings) = match grammar {
            HeadingGrammar::Auto => {
                let strict = self.find_headings(&lines, HeadingGrammar::Strict);
                if strict.is_empty() {
                    (
                        HeadingGrammar::Loose,
                        self.find_headings(&lines, HeadingGrammar::Loose),
                    )
                } else {
                    (HeadingGrammar::Strict, strict)
                }
            }
            fixed => (fixed, self.find_headings(&lines, fixed)),
        };

        if headings.is_empty() {
            log::debug!("no section heading found, using a single untitled section");
            return Segmentation {
                preamble: None,
                sections: vec![SectionSpan {
                    heading: None,
                    body: text.to_string(),
                }],
                grammar: None,
            };
        }

        log::debug!(
            "found {} section headings with {:?} grammar",
            headings.len(),
            grammar
        );

        let preamble = collect_preamble(&lines[..headings[0].0]);

        let mut sections = Vec::with_capacity(headings.len());
        for (i, (line_index, heading, inline)) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|(next, _, _)| *next)
                .unwrap_or(lines.len());

            let mut body_lines: Vec<&str> = Vec::new();
            if let Some(inline) = inline {
                body_lines.push(inline.as_str());
            }
            body_lines.extend_from_slice(&lines[line_index + 1..end]);

            sections.push(SectionSpan {
                heading: Some(heading.clone()),
                body: body_lines.join("\n"),
            });
        }

        Segmentation {
            preamble,
            sections,
            grammar: Some(grammar),
        }
    }

    /// Match a single line against one grammar.
    ///
    /// Returns the heading and any inline text after the heading's colon.
    pub fn match_heading(
        &self,
        line: &str,
        grammar: HeadingGrammar,
    ) -> Option<(SectionHeading, Option<String>)> {
        let line = strip_decoration(line);

        match grammar {
            HeadingGrammar::Strict => {
                let caps = self.strict_regex.captures(&line)?;
                Some((make_heading(&caps[1], &caps[2]), None))
            }
            HeadingGrammar::Loose => {
                let caps = self.loose_regex.captures(&line)?;
                let inline = caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty());
                Some((make_heading(&caps[1], &caps[2]), inline))
            }
            HeadingGrammar::Auto => self
                .match_heading(&line, HeadingGrammar::Strict)
                .or_else(|| self.match_heading(&line, HeadingGrammar::Loose)),
        }
    }

    fn find_headings(
        &self,
        lines: &[&str],
        grammar: HeadingGrammar,
    ) -> Vec<(usize, SectionHeading, Option<String>)> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                self.match_heading(line, grammar)
                    .map(|(heading, inline)| (i, heading, inline))
            })
            .collect()
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn make_heading(number: &str, label: &str) -> SectionHeading {
    let label = label.trim().to_string();
    SectionHeading {
        title: format!("{}. {}", number, label),
        number: number.parse().ok(),
        label,
    }
}

/// Remove Markdown heading hashes and bold/underline wrappers around a line.
pub(crate) fn strip_decoration(line: &str) -> String {
    let line = line.trim().trim_start_matches('#').trim();

    for wrapper in ["**", "__"] {
        if let Some(rest) = line.strip_prefix(wrapper) {
            return rest.replacen(wrapper, "", 1).trim().to_string();
        }
    }

    line.to_string()
}

fn collect_preamble(lines: &[&str]) -> Option<String> {
    let kept: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n"))
    }
}
