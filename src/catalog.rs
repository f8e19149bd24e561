// File: src/catalog.rs
use crate::tabular::Table;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Fallback shown for diseases the description table does not cover.
const NO_DESCRIPTION: &str = "No description available.";

/// At most this many precautions are carried per disease.
const MAX_PRECAUTIONS: usize = 4;

/// Static disease reference data: description text and an ordered precaution
/// list per disease. Built once at startup from the two reference tables and
/// immutable for the process lifetime. Lookups never fail; absent diseases
/// get a fixed fallback. O(1) average per lookup.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    descriptions: HashMap<String, String>,
    precautions: HashMap<String, Vec<String>>,
}

impl ReferenceCatalog {
    /// Loads the catalog from the description and precaution tables.
    /// The description table needs `Disease` and `Description` columns; the
    /// precaution table needs `Disease` plus up to four `Precaution_*`
    /// columns. Empty precaution cells (row padding) are skipped.
    pub fn from_files(description_path: &Path, precaution_path: &Path) -> io::Result<Self> {
        let mut catalog = Self::default();

        let descriptions = Table::from_file(description_path)?;
        let disease_col = required_column(&descriptions, "Disease")?;
        let description_col = required_column(&descriptions, "Description")?;
        for row in &descriptions.rows {
            if let (Some(disease), Some(description)) =
                (row.get(disease_col), row.get(description_col))
            {
                catalog.insert_description(disease, description);
            }
        }

        let precautions = Table::from_file(precaution_path)?;
        let disease_col = required_column(&precautions, "Disease")?;
        let precaution_cols = precautions.columns_with_prefix("Precaution");
        for row in &precautions.rows {
            let Some(disease) = row.get(disease_col) else {
                continue;
            };
            let steps: Vec<&str> = precaution_cols
                .iter()
                .filter_map(|&col| row.get(col))
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .take(MAX_PRECAUTIONS)
                .collect();
            catalog.insert_precautions(disease, &steps);
        }

        Ok(catalog)
    }

    pub fn insert_description(&mut self, disease: &str, description: &str) {
        self.descriptions
            .insert(disease.to_string(), description.to_string());
    }

    pub fn insert_precautions(&mut self, disease: &str, steps: &[&str]) {
        self.precautions.insert(
            disease.to_string(),
            steps
                .iter()
                .take(MAX_PRECAUTIONS)
                .map(|s| s.to_string())
                .collect(),
        );
    }

    /// Description for a disease, or the fixed fallback. Never fails.
    pub fn description(&self, disease: &str) -> &str {
        self.descriptions
            .get(disease)
            .map(String::as_str)
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Ordered precautions for a disease, empty when unknown. Never fails.
    pub fn precautions(&self, disease: &str) -> &[String] {
        self.precautions
            .get(disease)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn required_column(table: &Table, name: &str) -> io::Result<usize> {
    table.column(name).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("reference table is missing the '{name}' column"),
        )
    })
}
