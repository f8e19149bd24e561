// Offline trainer: fits the classifier from the tabular dataset and writes
// the (vocabulary, classifier) artifact atomically. Runs to completion
// before any inference traffic is accepted.
// Usage: train_model [dataset.csv] [model.bin]
use diagnosis_core::core::classifier::{Classifier, MultinomialNb};
use diagnosis_core::persistence::save_model;
use diagnosis_core::training::{fit_model, load_dataset};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DATASET_PATH: &str = "dataset.csv";
const MODEL_PATH: &str = "model.bin";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let dataset = PathBuf::from(args.next().unwrap_or_else(|| DATASET_PATH.to_string()));
    let model_path = PathBuf::from(args.next().unwrap_or_else(|| MODEL_PATH.to_string()));

    match run(&dataset, &model_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("training failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(dataset: &Path, model_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(path = %dataset.display(), "loading training dataset");
    let examples = load_dataset(dataset)?;
    tracing::info!(rows = examples.len(), "fitting classifier");

    let model = fit_model::<MultinomialNb>(&examples)?;
    tracing::info!(
        diseases = model.classifier.classes().len(),
        symptoms = model.vocabulary.len(),
        "model fitted"
    );

    save_model(&model, model_path)?;
    tracing::info!(path = %model_path.display(), "model saved");
    Ok(())
}
