//! Lettered subsection segmentation within a section body.

use regex::Regex;

use super::sections::strip_decoration;

/// A lettered heading (or the default subsection) with its body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsectionSpan {
    /// Heading letter, `None` for the default subsection
    pub letter: Option<char>,
    /// Title text, colon stripped
    pub title: String,
    /// Body lines joined with `\n`
    pub body: String,
}

/// Splits a section body at `A.`, `B.`, ... headings.
pub struct SubsectionSegmenter {
    heading_regex: Regex,
}

impl SubsectionSegmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        Self {
            heading_regex: Regex::new(r"^([A-Z])\.\s+([^:]*?)\s*(?::(?:\s+(.*))?)?$").unwrap(),
        }
    }

    /// Split a section body into subsections.
    ///
    /// Always returns at least one span. Text before the first lettered
    /// heading becomes a leading default subsection when it has content.
    pub fn segment(&self, body: &str) -> Vec<SubsectionSpan> {
        let lines: Vec<&str> = body.lines().collect();

        let headings: Vec<(usize, char, String, Option<String>)> = lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                self.match_heading(line)
                    .map(|(letter, title, inline)| (i, letter, title, inline))
            })
            .collect();

        if headings.is_empty() {
            return vec![SubsectionSpan {
                letter: None,
                title: String::new(),
                body: body.to_string(),
            }];
        }

        let mut spans = Vec::with_capacity(headings.len() + 1);

        let leading = &lines[..headings[0].0];
        if leading.iter().any(|l| !l.trim().is_empty()) {
            spans.push(SubsectionSpan {
                letter: None,
                title: String::new(),
                body: leading.join("\n"),
            });
        }

        for (i, (line_index, letter, title, inline)) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|(next, ..)| *next)
                .unwrap_or(lines.len());

            let mut body_lines: Vec<&str> = Vec::new();
            if let Some(inline) = inline {
                body_lines.push(inline.as_str());
            }
            body_lines.extend_from_slice(&lines[line_index + 1..end]);

            spans.push(SubsectionSpan {
                letter: Some(*letter),
                title: title.clone(),
                body: body_lines.join("\n"),
            });
        }

        spans
    }

    /// Match a lettered heading line.
    ///
    /// Returns the letter, the title, and any inline text after the colon.
    pub fn match_heading(&self, line: &str) -> Option<(char, String, Option<String>)> {
        let line = strip_decoration(line);
        let caps = self.heading_regex.captures(&line)?;

        let letter = caps[1].chars().next()?;
        let title = caps[2].trim().to_string();
        if title.is_empty() {
            return None;
        }
        let inline = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());

        Some((letter, title, inline))
    }
}

impl Default for SubsectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(body: &str) -> Vec<SubsectionSpan> {
        SubsectionSegmenter::new().segment(body)
    }

    #[test]
    fn test_default_subsection() {
        let spans = segment("• one\n• two");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].letter, None);
        assert_eq!(spans[0].title, "");
        assert_eq!(spans[0].body, "• one\n• two");
    }

    #[test]
    fn test_empty_body() {
        let spans = segment("");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].body, "");
    }

    #[test]
    fn test_lettered_subsections() {
        let spans = segment("A. Event Details:\n• Q3 call\nB. Participants\n• CEO");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].letter, Some('A'));
        assert_eq!(spans[0].title, "Event Details");
        assert_eq!(spans[0].body, "• Q3 call");
        assert_eq!(spans[1].letter, Some('B'));
        assert_eq!(spans[1].title, "Participants");
        assert_eq!(spans[1].body, "• CEO");
    }

    #[test]
    fn test_inline_text_after_colon() {
        let spans = segment("A. Summary: Results beat guidance.\nMore detail");
        assert_eq!(spans[0].title, "Summary");
        assert_eq!(spans[0].body, "Results beat guidance.\nMore detail");
    }

    #[test]
    fn test_leading_text_becomes_default_subsection() {
        let spans = segment("Overview paragraph.\n\nA. Details\nx");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].letter, None);
        assert_eq!(spans[0].body, "Overview paragraph.\n");
        assert_eq!(spans[1].letter, Some('A'));
    }

    #[test]
    fn test_blank_leading_text_is_skipped() {
        let spans = segment("\n  \nA. Details\nx");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].letter, Some('A'));
    }

    #[test]
    fn test_decorated_subheading() {
        let spans = segment("**A. Event Details:**\nbody");
        assert_eq!(spans[0].letter, Some('A'));
        assert_eq!(spans[0].title, "Event Details");
    }

    #[test]
    fn test_lowercase_letter_is_not_heading() {
        let spans = segment("a. not a heading");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].letter, None);
    }
}
