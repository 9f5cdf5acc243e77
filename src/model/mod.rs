//! Document model for parsed summary reports.
//!
//! This module defines the intermediate representation that bridges
//! summary parsing and rendering: Document → Section → Subsection → Block.
//! Renderers only ever read it.

mod block;
mod document;
mod section;

pub use block::Block;
pub use document::{CallType, Document, Metadata, DEFAULT_REPORT_TITLE};
pub use section::{Section, Subsection};
