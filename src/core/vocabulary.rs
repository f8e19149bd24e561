// --- File: src/core/vocabulary.rs
use crate::core::types::{FeatureVector, SymptomToken};
use crate::error::EncodingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Canonical symptom spelling: lowercase, trimmed, internal spaces replaced
/// with underscores. Must match the normalization applied at training time
/// exactly, or request tokens will never hit a vocabulary entry.
/// Idempotent: normalizing an already-normalized token is a no-op.
pub fn normalize(raw: &str) -> SymptomToken {
    raw.to_lowercase().trim().replace(' ', "_")
}

/// The result of encoding one symptom list: the presence vector plus the
/// number of entries that matched nothing in the vocabulary. Unknown tokens
/// are never an error; the count exists so callers can log them.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub vector: FeatureVector,
    pub dropped: usize,
}

/// The fixed, ordered set of symptom tokens learned at training time.
/// Order is lexicographic over the union of all observed tokens, so encoding
/// is reproducible from the training data alone. Immutable once built and
/// shared read-only across all inference requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomVocabulary {
    tokens: Vec<SymptomToken>,
    index: HashMap<SymptomToken, usize>,
}

impl SymptomVocabulary {
    /// Builds the vocabulary from every symptom string observed in training.
    /// Inputs are normalized and deduplicated; the sorted union becomes the
    /// feature axis.
    pub fn from_observed<I, S>(observed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<SymptomToken> =
            observed.into_iter().map(|s| normalize(s.as_ref())).collect();
        let tokens: Vec<SymptomToken> = unique.into_iter().collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), i))
            .collect();
        Self { tokens, index }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[SymptomToken] {
        &self.tokens
    }

    /// Feature position of a token, if it was seen at training time.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Encodes a symptom list into a presence vector over the vocabulary.
    ///
    /// Pure function of (vocabulary, input). Each input string is normalized,
    /// duplicates collapse to a single 1, and tokens outside the vocabulary
    /// contribute no signal at all - they only increment `dropped`.
    /// O(n) over the input length.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> Encoding {
        let mut vector = vec![0u8; self.tokens.len()];
        let mut dropped = 0;
        for raw in symptoms {
            match self.index.get(&normalize(raw.as_ref())) {
                Some(&position) => vector[position] = 1,
                None => dropped += 1,
            }
        }
        Encoding { vector, dropped }
    }
}

/// Extracts the symptom list from an untyped request payload.
///
/// This is where the structural contract lives: the payload must be an array
/// of strings. A missing field (`Null`) is an empty list, since an empty
/// symptom set is a valid query. Anything else is an `EncodingError` naming
/// the offending entry, so the caller can report exactly what was wrong.
pub fn symptom_list(value: &Value) -> Result<Vec<String>, EncodingError> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        other => {
            return Err(EncodingError::NotAnArray {
                found: json_type_name(other),
            })
        }
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(s) => Ok(s.clone()),
            other => Err(EncodingError::NotAString {
                index,
                found: json_type_name(other),
            }),
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
