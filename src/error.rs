// File: src/error.rs
use thiserror::Error;

/// A symptom payload that is not a sequence of strings.
///
/// Individual malformed entries (empty strings, numeric-looking tokens) are
/// NOT errors: they normalize like any other string and simply never match a
/// vocabulary entry. Only the structure of the payload can be invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("symptom payload must be an array of strings, found {found}")]
    NotAnArray { found: &'static str },
    #[error("symptom entry at index {index} must be a string, found {found}")]
    NotAString { index: usize, found: &'static str },
}

/// A feature vector whose width does not match the vocabulary the classifier
/// was trained against. This is the classic integration fault between an
/// encoder and a model artifact, so it is checked on every scoring call
/// instead of silently mis-indexing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("feature vector has width {got}, classifier was trained on width {expected}")]
pub struct ShapeMismatchError {
    pub expected: usize,
    pub got: usize,
}

/// Failures of the offline fit phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainingError {
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("{examples} feature vectors but {labels} labels")]
    LengthMismatch { examples: usize, labels: usize },
}

/// Failures while saving or loading the trained artifact.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("artifact i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact encoding failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("artifact is inconsistent: vocabulary has {vocabulary} tokens, classifier expects {classifier}")]
    Inconsistent { vocabulary: usize, classifier: usize },
}
