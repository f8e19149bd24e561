// Interactive console client for the diagnosis engine. Enter a
// comma-separated symptom list, get the ranked candidates with their
// reference data. Mainly useful for poking at a freshly trained model
// without starting the HTTP service.
use crossterm::style::Stylize;
use diagnosis_core::core::ranking::{as_percentage, DEFAULT_TOP_K};
use diagnosis_core::DiagnosisEngine;
use std::io::{stdin, stdout, Write};
use std::path::Path;

const MODEL_PATH: &str = "model.bin";
const DESCRIPTION_PATH: &str = "symptom_Description.csv";
const PRECAUTION_PATH: &str = "symptom_precaution.csv";

fn main() {
    let engine = match DiagnosisEngine::from_files(
        Path::new(MODEL_PATH),
        Path::new(DESCRIPTION_PATH),
        Path::new(PRECAUTION_PATH),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] Could not load the trained model: {e}");
            std::process::exit(1);
        }
    };

    println!("Disease Diagnosis Console. Enter comma-separated symptoms, 'exit' to quit.");
    println!("---------------------------------------------------------------");

    loop {
        print!("\nsymptoms> ");
        stdout().flush().unwrap();

        let mut input = String::new();
        if stdin().read_line(&mut input).unwrap() == 0 {
            break;
        }
        let line = input.trim();
        if line == "exit" {
            break;
        }

        let symptoms: Vec<String> = line
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        match engine.diagnose(&symptoms, DEFAULT_TOP_K) {
            Ok(candidates) if candidates.is_empty() => {
                println!("{}", "No confident match.".yellow());
            }
            Ok(candidates) => {
                for (i, candidate) in candidates.iter().enumerate() {
                    println!(
                        "  {}. {} ({})",
                        i + 1,
                        candidate.disease.as_str().green().bold(),
                        as_percentage(candidate.probability)
                    );
                    println!("     {}", candidate.description);
                    for precaution in &candidate.precautions {
                        println!("       - {precaution}");
                    }
                }
            }
            Err(e) => eprintln!("[ERROR] {e}"),
        }
    }
}
