//! Named-entity recognition seam.
//!
//! The extractor owns one [`EntityRecognizer`] for its whole lifetime. The
//! built-in [`HeuristicRecognizer`] is regex based; a model-backed recognizer
//! can be plugged in through [`crate::FieldExtractor::with_recognizer`].

mod heuristic;

pub use heuristic::HeuristicRecognizer;

/// Kind of a recognized entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Organization,
    Location,
}

/// An entity span found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Finds entities in document text.
pub trait EntityRecognizer: Send + Sync {
    /// Entities in order of appearance.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}
