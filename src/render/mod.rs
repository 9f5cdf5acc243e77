//! Rendering module for converting documents to various output formats.
//!
//! Every renderer is an independent consumer of the same read-only
//! [`Document`](crate::model::Document), driven by [`visitor::walk`].

mod html;
mod json;
mod markdown;
mod options;
pub mod pdf;
mod result;
mod text;
pub mod visitor;

pub use html::{escape_html, to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use pdf::{export_pdf, paginate, to_pdf, PageSize, PaginatedDocument, PdfOptions};
pub use result::{RenderResult, ReportStats, StatsCollector};
pub use text::to_text;
pub use visitor::{walk, BlockPosition, CompositeVisitor, DocumentVisitor};
