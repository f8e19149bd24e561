// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A normalized symptom string: lowercase, trimmed, internal spaces replaced
/// with underscores. Produced only by `vocabulary::normalize`.
pub type SymptomToken = String;

/// An opaque disease label. The set of diseases is fixed to the class set the
/// classifier was trained on.
pub type Disease = String;

/// Binary presence encoding of a symptom set over the vocabulary.
/// One entry per vocabulary position, each 0 or 1. Built fresh per request
/// and never mutated after construction.
pub type FeatureVector = Vec<u8>;

/// One scored diagnosis suggestion, enriched with reference data.
/// Represents P(D|S) for one disease D given the submitted symptom set S.
/// Probability is always in (0, 1]; zero-probability diseases are filtered
/// out before a candidate is ever built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub disease: Disease,
    pub probability: f64,
    pub description: String,
    /// Recommended precautions, at most 4, in catalog order.
    pub precautions: Vec<String>,
}
