// File: src/persistence.rs
use crate::core::classifier::Classifier;
use crate::core::engine::TrainedModel;
use crate::error::PersistenceError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the trained artifact atomically: serialize into a temp file in the
/// destination directory, then persist over the final name. A crash
/// mid-write leaves any previous artifact untouched, so the serving process
/// never observes a half-written model.
pub fn save_model(model: &TrainedModel, path: &Path) -> Result<(), PersistenceError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, model)?;

    temp_file
        .persist(path)
        .map_err(|e| PersistenceError::Io(e.error))?;
    Ok(())
}

/// Loads the artifact and verifies the vocabulary/classifier pairing before
/// handing it out. A mismatched pair is a configuration fault; it is
/// rejected here, at load time, never discovered at request time.
pub fn load_model(path: &Path) -> Result<TrainedModel, PersistenceError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let model: TrainedModel = bincode::deserialize_from(reader)?;

    if model.classifier.n_features() != model.vocabulary.len() {
        return Err(PersistenceError::Inconsistent {
            vocabulary: model.vocabulary.len(),
            classifier: model.classifier.n_features(),
        });
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::SymptomVocabulary;
    use crate::training::{fit_model, TrainingExample};

    fn trained() -> TrainedModel {
        fit_model(&[
            TrainingExample {
                symptoms: vec!["itching".into(), "skin rash".into()],
                disease: "Fungal infection".into(),
            },
            TrainingExample {
                symptoms: vec!["continuous sneezing".into()],
                disease: "Allergy".into(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn save_then_load_round_trips_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("model.bin");

        let model = trained();
        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.vocabulary.tokens(), model.vocabulary.tokens());
        assert_eq!(loaded.classifier.classes(), model.classifier.classes());

        let vector = model.vocabulary.encode(&["itching"]).vector;
        assert_eq!(
            loaded.classifier.predict_probabilities(&vector).unwrap(),
            model.classifier.predict_probabilities(&vector).unwrap()
        );
    }

    #[test]
    fn mismatched_artifacts_are_rejected_at_load_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        // Pair the fitted classifier with a wider vocabulary than it was
        // trained against, as a stale or hand-edited artifact would.
        let mut model = trained();
        model.vocabulary = SymptomVocabulary::from_observed([
            "itching",
            "skin rash",
            "continuous sneezing",
            "an extra token",
        ]);
        save_model(&model, &path).unwrap();

        assert!(matches!(
            load_model(&path),
            Err(PersistenceError::Inconsistent { .. })
        ));
    }

    #[test]
    fn loading_a_missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_model(&dir.path().join("absent.bin")),
            Err(PersistenceError::Io(_))
        ));
    }
}
