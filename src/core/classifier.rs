// --- File: src/core/classifier.rs
use crate::core::types::{Disease, FeatureVector};
use crate::error::{ShapeMismatchError, TrainingError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Laplace smoothing constant for unseen (class, symptom) pairs.
const SMOOTHING_ALPHA: f64 = 1.0;

/// A trainable probabilistic classifier over presence vectors.
///
/// Two lifecycle phases: `fit` runs once, offline, and produces an immutable
/// value; `predict_probabilities` runs on the request path and must return a
/// posterior for every trained class, zero-valued or not, parallel to
/// `classes()`. Scoring a vector of the wrong width is a contract violation
/// and must error rather than mis-index.
pub trait Classifier: Sized {
    fn fit(examples: &[FeatureVector], labels: &[Disease]) -> Result<Self, TrainingError>;

    /// Trained class labels in a fixed, stable order.
    fn classes(&self) -> &[Disease];

    /// Width of the feature axis this classifier was fitted against.
    fn n_features(&self) -> usize;

    fn predict_probabilities(
        &self,
        vector: &FeatureVector,
    ) -> Result<Vec<f64>, ShapeMismatchError>;
}

/// Multinomial naive Bayes fitted in log space.
///
/// `class_log_prior[c]` is ln P(c) from label frequencies;
/// `feature_log_prob[c][i]` is ln P(symptom i | c) with Laplace smoothing.
/// Classes are ordered lexicographically so repeated training runs over the
/// same data produce identical artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<Disease>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl Classifier for MultinomialNb {
    fn fit(examples: &[FeatureVector], labels: &[Disease]) -> Result<Self, TrainingError> {
        if examples.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                examples: examples.len(),
                labels: labels.len(),
            });
        }
        if examples.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }
        let n_features = examples[0].len();

        // Per-class example count and per-feature occurrence count,
        // keyed by label so class order comes out sorted.
        let mut per_class: BTreeMap<&str, (u64, Vec<u64>)> = BTreeMap::new();
        for (vector, label) in examples.iter().zip(labels) {
            let (count, feature_counts) = per_class
                .entry(label.as_str())
                .or_insert_with(|| (0, vec![0; n_features]));
            *count += 1;
            for (i, &present) in vector.iter().enumerate() {
                feature_counts[i] += u64::from(present);
            }
        }

        let n_examples = examples.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut class_log_prior = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());
        for (label, (count, feature_counts)) in per_class {
            let total: u64 = feature_counts.iter().sum();
            let denominator = total as f64 + SMOOTHING_ALPHA * n_features as f64;
            classes.push(label.to_string());
            class_log_prior.push((count as f64 / n_examples).ln());
            feature_log_prob.push(
                feature_counts
                    .iter()
                    .map(|&c| ((c as f64 + SMOOTHING_ALPHA) / denominator).ln())
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    fn classes(&self) -> &[Disease] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    /// Posterior P(c | vector) for every trained class.
    ///
    /// Joint log-likelihood is the class prior plus the log-probability of
    /// each present symptom; the result is normalized with log-sum-exp so the
    /// returned vector always sums to 1.0 across the full class set. An
    /// all-zero vector therefore yields exactly the prior distribution.
    fn predict_probabilities(
        &self,
        vector: &FeatureVector,
    ) -> Result<Vec<f64>, ShapeMismatchError> {
        if vector.len() != self.n_features {
            return Err(ShapeMismatchError {
                expected: self.n_features,
                got: vector.len(),
            });
        }

        let joint: Vec<f64> = (0..self.classes.len())
            .map(|c| {
                let mut score = self.class_log_prior[c];
                for (i, &present) in vector.iter().enumerate() {
                    if present != 0 {
                        score += self.feature_log_prob[c][i];
                    }
                }
                score
            })
            .collect();

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + joint.iter().map(|&s| (s - max).exp()).sum::<f64>().ln();
        Ok(joint.iter().map(|&s| (s - log_norm).exp()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Features: [fever, itching, nausea]. Two flu rows, one pox row.
    fn fitted() -> MultinomialNb {
        let examples: Vec<FeatureVector> = vec![
            vec![1, 0, 1],
            vec![1, 0, 0],
            vec![0, 1, 0],
        ];
        let labels: Vec<Disease> = vec!["flu".into(), "flu".into(), "chicken pox".into()];
        MultinomialNb::fit(&examples, &labels).unwrap()
    }

    #[test]
    fn classes_are_sorted_and_stable() {
        let nb = fitted();
        assert_eq!(nb.classes(), ["chicken pox", "flu"]);
        assert_eq!(nb.n_features(), 3);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let nb = fitted();
        for vector in [vec![0, 0, 0], vec![1, 0, 0], vec![1, 1, 1]] {
            let probs = nb.predict_probabilities(&vector).unwrap();
            assert_eq!(probs.len(), 2);
            let mass: f64 = probs.iter().sum();
            assert!((mass - 1.0).abs() < 1e-9, "mass was {mass}");
        }
    }

    #[test]
    fn present_symptoms_drive_the_posterior() {
        let nb = fitted();
        let probs = nb.predict_probabilities(&vec![1, 0, 0]).unwrap();
        let flu = nb.classes().iter().position(|c| c == "flu").unwrap();
        assert!(probs[flu] > probs[1 - flu]);

        let probs = nb.predict_probabilities(&vec![0, 1, 0]).unwrap();
        let pox = nb.classes().iter().position(|c| c == "chicken pox").unwrap();
        assert!(probs[pox] > probs[1 - pox]);
    }

    #[test]
    fn all_zero_vector_yields_the_prior_distribution() {
        let nb = fitted();
        let probs = nb.predict_probabilities(&vec![0, 0, 0]).unwrap();
        let flu = nb.classes().iter().position(|c| c == "flu").unwrap();
        assert!((probs[flu] - 2.0 / 3.0).abs() < 1e-9);
        assert!((probs[1 - flu] - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn predictions_are_deterministic() {
        let nb = fitted();
        let vector = vec![1, 1, 0];
        assert_eq!(
            nb.predict_probabilities(&vector).unwrap(),
            nb.predict_probabilities(&vector).unwrap()
        );
    }

    #[test]
    fn wrong_width_vector_is_rejected() {
        let nb = fitted();
        assert_eq!(
            nb.predict_probabilities(&vec![1, 0]),
            Err(ShapeMismatchError {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn fit_rejects_empty_and_mismatched_input() {
        assert_eq!(
            MultinomialNb::fit(&[], &[]).unwrap_err(),
            TrainingError::EmptyTrainingSet
        );
        assert_eq!(
            MultinomialNb::fit(&[vec![1]], &[]).unwrap_err(),
            TrainingError::LengthMismatch {
                examples: 1,
                labels: 0
            }
        );
    }
}
