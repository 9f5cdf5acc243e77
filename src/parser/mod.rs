//! Summary text parsing.

mod builder;
pub mod classify;
mod normalize;
mod options;
pub mod sections;
pub mod subsections;

pub use builder::DocumentBuilder;
pub use classify::{LineClassifier, LineKind, CANONICAL_BULLET};
pub use normalize::{NormalizeOptions, Normalizer};
pub use options::{HeadingGrammar, ParseOptions};
pub use sections::{SectionHeading, SectionSegmenter, SectionSpan, Segmentation};
pub use subsections::{SubsectionSegmenter, SubsectionSpan};
