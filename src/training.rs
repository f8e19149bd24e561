// File: src/training.rs
use crate::core::classifier::Classifier;
use crate::core::engine::TrainedModel;
use crate::core::types::{Disease, FeatureVector};
use crate::core::vocabulary::SymptomVocabulary;
use crate::error::TrainingError;
use crate::tabular::Table;
use std::io;
use std::path::Path;

/// One labeled training row: the raw symptom strings for a single observed
/// disease instance. Normalization is the encoder's job, not the loader's.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub symptoms: Vec<String>,
    pub disease: Disease,
}

/// Reads the training table: one `Disease` label column plus any number of
/// columns whose headers start with `Symptom`, sparsely filled per row.
/// Empty cells are padding and are stripped here, so the core only ever sees
/// flat (symptom-list, label) pairs.
pub fn load_dataset(path: &Path) -> io::Result<Vec<TrainingExample>> {
    let table = Table::from_file(path)?;
    let disease_col = table.column("Disease").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "training table is missing the 'Disease' column",
        )
    })?;
    let symptom_cols = table.columns_with_prefix("Symptom");

    Ok(table
        .rows
        .iter()
        .filter_map(|row| {
            let disease = row.get(disease_col)?.trim();
            if disease.is_empty() {
                return None;
            }
            let symptoms = symptom_cols
                .iter()
                .filter_map(|&col| row.get(col))
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
                .collect();
            Some(TrainingExample {
                symptoms,
                disease: disease.to_string(),
            })
        })
        .collect())
}

/// The offline fit phase, end to end: builds the vocabulary from the union
/// of all observed symptom tokens, encodes every example over it, and fits
/// the classifier on the resulting matrix. Returns the paired artifact,
/// ready for atomic persistence.
pub fn fit_model<C: Classifier>(
    examples: &[TrainingExample],
) -> Result<TrainedModel<C>, TrainingError> {
    if examples.is_empty() {
        return Err(TrainingError::EmptyTrainingSet);
    }

    let vocabulary = SymptomVocabulary::from_observed(
        examples
            .iter()
            .flat_map(|example| example.symptoms.iter().map(String::as_str)),
    );
    let matrix: Vec<FeatureVector> = examples
        .iter()
        .map(|example| vocabulary.encode(&example.symptoms).vector)
        .collect();
    let labels: Vec<Disease> = examples
        .iter()
        .map(|example| example.disease.clone())
        .collect();

    let classifier = C::fit(&matrix, &labels)?;
    Ok(TrainedModel {
        vocabulary,
        classifier,
    })
}
