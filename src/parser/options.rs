//! Parsing options and configuration.

use super::NormalizeOptions;
use crate::model::{CallType, Metadata};
use chrono::{DateTime, Utc};

/// Options for parsing summary text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Which section heading grammar to use
    pub grammar: HeadingGrammar,

    /// Input normalization applied before segmentation (`None` = raw input)
    pub normalize: Option<NormalizeOptions>,

    /// Metadata attached to the resulting document
    pub metadata: Metadata,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading grammar.
    pub fn with_grammar(mut self, grammar: HeadingGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Only accept `1. UPPERCASE` headings.
    pub fn strict(mut self) -> Self {
        self.grammar = HeadingGrammar::Strict;
        self
    }

    /// Only accept `1. Title:` headings.
    pub fn loose(mut self) -> Self {
        self.grammar = HeadingGrammar::Loose;
        self
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = Some(options);
        self
    }

    /// Parse the text exactly as given.
    pub fn raw(mut self) -> Self {
        self.normalize = None;
        self
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = title.into();
        self
    }

    /// Set the call type.
    pub fn with_call_type(mut self, call_type: CallType) -> Self {
        self.metadata.call_type = Some(call_type);
        self
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.metadata.created = Some(created);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            grammar: HeadingGrammar::Auto,
            normalize: Some(NormalizeOptions::standard()),
            metadata: Metadata::default(),
        }
    }
}

/// Grammar used to recognize numbered section headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingGrammar {
    /// Try the strict grammar first; fall back to the loose one if it finds nothing
    #[default]
    Auto,
    /// `1. EXECUTIVE OVERVIEW`
    Strict,
    /// `1. Executive Overview:`
    Loose,
}

impl HeadingGrammar {
    /// Parse a grammar name ("auto", "strict", "loose").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(HeadingGrammar::Auto),
            "strict" | "upper" | "uppercase" => Some(HeadingGrammar::Strict),
            "loose" | "colon" => Some(HeadingGrammar::Loose),
            _ => None,
        }
    }
}
