use crate::catalog::ReferenceCatalog;
use crate::core::classifier::{Classifier, MultinomialNb};
use crate::core::ranking;
use crate::core::types::RankedCandidate;
use crate::core::vocabulary::SymptomVocabulary;
use crate::error::{PersistenceError, ShapeMismatchError};
use crate::persistence::load_model;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The immutable output of the fit phase: a vocabulary and the classifier
/// fitted against exactly that vocabulary. Held as one value so the pair can
/// never be loaded or swapped independently - a mismatched pair is
/// unrepresentable by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel<C = MultinomialNb> {
    pub vocabulary: SymptomVocabulary,
    pub classifier: C,
}

// The serving context: everything one inference request reads, composed into
// a single value built at startup and shared read-only across requests.
// No ambient globals; tests construct one directly from in-memory parts.
pub struct DiagnosisEngine<C: Classifier = MultinomialNb> {
    model: TrainedModel<C>,
    catalog: ReferenceCatalog,
}

impl DiagnosisEngine<MultinomialNb> {
    /// Loads the serving context from the trained artifact and the two
    /// reference tables. The artifact's vocabulary/classifier pairing is
    /// verified during load; a tampered or stale artifact is rejected here,
    /// before any traffic is accepted.
    pub fn from_files(
        model_path: &Path,
        description_path: &Path,
        precaution_path: &Path,
    ) -> Result<Self, PersistenceError> {
        let model = load_model(model_path)?;
        let catalog = ReferenceCatalog::from_files(description_path, precaution_path)?;
        Ok(Self::new(model, catalog))
    }
}

impl<C: Classifier> DiagnosisEngine<C> {
    pub fn new(model: TrainedModel<C>, catalog: ReferenceCatalog) -> Self {
        Self { model, catalog }
    }

    pub fn model(&self) -> &TrainedModel<C> {
        &self.model
    }

    /// Scores a raw symptom list and returns the top-k nonzero candidates,
    /// enriched with catalog descriptions and precautions.
    ///
    /// Pure read over shared immutable state: encode, score, rank, enrich.
    /// Unknown symptoms never fail the request; their count is logged so a
    /// silently useless query is still visible in the traces. A shape
    /// mismatch cannot happen when the model came from a verified artifact,
    /// but the check is kept on every call rather than assumed away.
    pub fn diagnose<S: AsRef<str>>(
        &self,
        symptoms: &[S],
        top_k: usize,
    ) -> Result<Vec<RankedCandidate>, ShapeMismatchError> {
        let encoding = self.model.vocabulary.encode(symptoms);
        if encoding.dropped > 0 {
            tracing::debug!(
                dropped = encoding.dropped,
                "ignored symptoms outside the trained vocabulary"
            );
        }

        let probs = self.model.classifier.predict_probabilities(&encoding.vector)?;
        let ranked = ranking::rank(self.model.classifier.classes(), &probs, top_k);

        Ok(ranked
            .into_iter()
            .map(|(disease, probability)| RankedCandidate {
                description: self.catalog.description(&disease).to_string(),
                precautions: self.catalog.precautions(&disease).to_vec(),
                disease,
                probability,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::Classifier;
    use crate::core::ranking::DEFAULT_TOP_K;
    use crate::training::{fit_model, TrainingExample};

    fn example(symptoms: &[&str], disease: &str) -> TrainingExample {
        TrainingExample {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            disease: disease.to_string(),
        }
    }

    fn engine() -> DiagnosisEngine {
        let model = fit_model(&[
            example(&["itching", "skin rash"], "Fungal infection"),
            example(&["itching", "skin rash", "nodal eruptions"], "Fungal infection"),
            example(&["continuous sneezing", "shivering"], "Allergy"),
        ])
        .unwrap();
        let mut catalog = ReferenceCatalog::default();
        catalog.insert_description("Fungal infection", "A common fungal condition.");
        catalog.insert_precautions(
            "Fungal infection",
            &["bath twice", "use clean cloths"],
        );
        DiagnosisEngine::new(model, catalog)
    }

    #[test]
    fn diagnose_returns_enriched_ranked_candidates() {
        let engine = engine();
        let results = engine
            .diagnose(&["Itching", " skin_rash ", "itching"], DEFAULT_TOP_K)
            .unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].disease, "Fungal infection");
        assert_eq!(results[0].description, "A common fungal condition.");
        assert_eq!(
            results[0].precautions,
            vec!["bath twice".to_string(), "use clean cloths".to_string()]
        );
        assert!(results.windows(2).all(|w| w[0].probability >= w[1].probability));
        assert!(results.iter().all(|c| c.probability > 0.0));
        assert!(results.len() <= DEFAULT_TOP_K);
    }

    #[test]
    fn candidates_without_reference_data_get_fallbacks() {
        let engine = engine();
        let results = engine
            .diagnose(&["continuous sneezing", "shivering"], DEFAULT_TOP_K)
            .unwrap();
        assert_eq!(results[0].disease, "Allergy");
        assert_eq!(results[0].description, "No description available.");
        assert!(results[0].precautions.is_empty());
    }

    #[test]
    fn unknown_only_symptoms_fall_back_to_the_prior() {
        let engine = engine();
        let results = engine
            .diagnose(&["no such symptom", "another mystery"], DEFAULT_TOP_K)
            .unwrap();
        // All-zero vector: the classifier answers with its prior, and the
        // majority class from training leads.
        assert_eq!(results[0].disease, "Fungal infection");
    }

    #[test]
    fn empty_symptom_list_is_not_an_error() {
        let engine = engine();
        assert!(engine.diagnose::<&str>(&[], DEFAULT_TOP_K).is_ok());
    }

    #[test]
    fn shape_mismatch_still_surfaces_through_the_classifier() {
        let engine = engine();
        let wrong_width = vec![1u8; engine.model().vocabulary.len() + 1];
        assert!(engine
            .model()
            .classifier
            .predict_probabilities(&wrong_width)
            .is_err());
    }
}
