//! Parser module - turns articles into measurable features

pub mod document;
pub mod features;
pub mod markup;

pub use document::{load_document, parse_document, DocumentError};
pub use features::{FeatureExtractor, FeatureSet};
