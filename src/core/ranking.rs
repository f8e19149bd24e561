// --- File: src/core/ranking.rs
use crate::core::types::Disease;
use std::cmp::Ordering;

/// How many candidates an inference response carries at most.
pub const DEFAULT_TOP_K: usize = 5;

/// Selects the top-k nonzero candidates from a scored class set.
///
/// The sort is stable and descending, so classes tied on probability keep the
/// classifier's original order and repeated calls with identical input return
/// identical output. Entries with probability exactly 0 never survive, even
/// inside the top-k window, which can leave fewer than k results (or none -
/// a valid outcome, not an error). Sorting happens on the raw probabilities,
/// before any display rounding.
pub fn rank(classes: &[Disease], probs: &[f64], top_k: usize) -> Vec<(Disease, f64)> {
    let mut scored: Vec<(Disease, f64)> = classes
        .iter()
        .cloned()
        .zip(probs.iter().copied())
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .filter(|&(_, probability)| probability > 0.0)
        .take(top_k)
        .collect()
}

/// Display form of a probability: a percentage with two decimal places.
pub fn as_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
