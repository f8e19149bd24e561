// File: src/tabular.rs
//! Minimal reader for the comma-separated training and reference tables.
//! Handles quoted fields (embedded commas, doubled quotes) and nothing more;
//! the data files are small and read exactly once at startup.

use std::fs;
use std::io;
use std::path::Path;

/// A parsed table: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut records = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(split_record);
        let headers = records.next().unwrap_or_default();
        let rows = records.collect();
        Self { headers, rows }
    }

    /// Index of an exactly-named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of every column whose header starts with `prefix`, in order.
    pub fn columns_with_prefix(&self, prefix: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Splits one record into fields. Quotes delimit fields that contain commas;
/// a doubled quote inside a quoted field is a literal quote.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows() {
        let table = Table::parse("Disease,Symptom_1,Symptom_2\nFlu,fever,chills\n");
        assert_eq!(table.headers, ["Disease", "Symptom_1", "Symptom_2"]);
        assert_eq!(table.rows, vec![vec!["Flu", "fever", "chills"]]);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas_and_quotes() {
        let table = Table::parse(
            "Disease,Description\nFlu,\"An infection, usually \"\"seasonal\"\".\"\n",
        );
        assert_eq!(
            table.rows[0][1],
            "An infection, usually \"seasonal\"."
        );
    }

    #[test]
    fn empty_trailing_cells_are_preserved() {
        let table = Table::parse("Disease,Symptom_1,Symptom_2\nFlu,fever,\n");
        assert_eq!(table.rows[0], vec!["Flu", "fever", ""]);
    }

    #[test]
    fn prefix_column_lookup() {
        let table = Table::parse("Disease,Symptom_1,Symptom_2,Notes\n");
        assert_eq!(table.column("Disease"), Some(0));
        assert_eq!(table.columns_with_prefix("Symptom"), vec![1, 2]);
    }
}
