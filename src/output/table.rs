//! CSV input and output
//!
//! The input table is kept whole so the enriched file carries every original column,
//! with the website and email columns filled in (appended when missing).

use crate::config::OutputConfig;
use crate::pipeline::{CompanyRecord, EnrichedRecord};
use crate::EnricherError;
use std::path::Path;

/// A CSV table with a known company name column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    name_index: usize,
}

impl InputTable {
    /// Builds a table, locating `name_column` among the headers
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        name_column: &str,
    ) -> Result<Self, EnricherError> {
        let name_index = headers
            .iter()
            .position(|h| header_matches(h, name_column))
            .ok_or_else(|| EnricherError::MissingColumn(name_column.to_string()))?;

        Ok(Self {
            headers,
            rows,
            name_index,
        })
    }

    /// One record per row; missing or blank cells give an empty name
    pub fn records(&self) -> Vec<CompanyRecord> {
        self.rows
            .iter()
            .map(|row| {
                let name = row.get(self.name_index).map(|s| s.trim()).unwrap_or("");
                CompanyRecord::new(name)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a CSV file with a header row
///
/// # Returns
///
/// * `Ok(InputTable)` - The parsed table
/// * `Err(EnricherError::InputNotFound)` - The file does not exist
/// * `Err(EnricherError::MissingColumn)` - No header equals `name_column`
pub fn read_table(path: &Path, name_column: &str) -> Result<InputTable, EnricherError> {
    if !path.exists() {
        return Err(EnricherError::InputNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    InputTable::new(headers, rows, name_column)
}

/// Header names are compared ignoring surrounding whitespace
fn header_matches(header: &str, column: &str) -> bool {
    header.trim() == column.trim()
}

/// Returns the index of `column`, appending it to the headers if absent
fn column_index(headers: &mut Vec<String>, column: &str) -> usize {
    match headers.iter().position(|h| header_matches(h, column)) {
        Some(index) => index,
        None => {
            headers.push(column.to_string());
            headers.len() - 1
        }
    }
}

/// Writes the input table back out with the website and email columns filled in
///
/// Existing website/email columns are overwritten; otherwise they are appended.
/// Rows with more cells than the header keep every cell: the header is widened with
/// unnamed columns first, so the appended columns never land on row data. Absent
/// values are written as empty cells. Parent directories are created.
pub fn write_enriched(
    path: &Path,
    table: &InputTable,
    records: &[EnrichedRecord],
    config: &OutputConfig,
) -> Result<(), EnricherError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut headers = table.headers.clone();
    let widest = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    if widest > headers.len() {
        tracing::warn!(
            "Some rows have {} cells but the header has {}, keeping the extra cells under unnamed columns",
            widest,
            headers.len()
        );
        headers.resize(widest, String::new());
    }
    let website_index = column_index(&mut headers, &config.website_column);
    let email_index = column_index(&mut headers, &config.email_column);

    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(&headers)?;

    for (row, record) in table.rows.iter().zip(records) {
        let mut cells = row.clone();
        cells.resize(headers.len(), String::new());
        cells[website_index] = record.url.clone().unwrap_or_default();
        cells[email_index] = record.email.clone().unwrap_or_default();
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("companies.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn enriched(name: &str, url: Option<&str>, email: Option<&str>) -> EnrichedRecord {
        EnrichedRecord {
            name: name.to_string(),
            url: url.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_read_table() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "Company Name,City\nAcme Corp,Berlin\n,Paris\n");

        let table = read_table(&path, "Company Name").unwrap();
        assert_eq!(table.headers, vec!["Company Name", "City"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records(),
            vec![CompanyRecord::new("Acme Corp"), CompanyRecord::new("")]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_table(&dir.path().join("nope.csv"), "Company Name");
        assert!(matches!(result, Err(EnricherError::InputNotFound(_))));
    }

    #[test]
    fn test_read_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "Name,City\nAcme,Berlin\n");

        let result = read_table(&path, "Company Name");
        assert!(matches!(result, Err(EnricherError::MissingColumn(c)) if c == "Company Name"));
    }

    #[test]
    fn test_short_rows_give_empty_names() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "City,Company Name\nBerlin\n");

        let table = read_table(&path, "Company Name").unwrap();
        assert_eq!(table.records(), vec![CompanyRecord::new("")]);
    }

    #[test]
    fn test_write_appends_columns() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "Company Name,City\nAcme Corp,Berlin\nGlobex,Paris\n");
        let table = read_table(&input, "Company Name").unwrap();

        let output = dir.path().join("data").join("out.csv");
        let records = vec![
            enriched("Acme Corp", Some("https://acme.io"), Some("info@acme.io")),
            enriched("Globex", None, None),
        ];
        write_enriched(&output, &table, &records, &OutputConfig::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Company Name,City,Website,Email\n\
             Acme Corp,Berlin,https://acme.io,info@acme.io\n\
             Globex,Paris,,\n"
        );
    }

    #[test]
    fn test_write_overwrites_existing_columns() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "Company Name,Email\nAcme Corp,old@acme.io\n");
        let table = read_table(&input, "Company Name").unwrap();

        let output = dir.path().join("out.csv");
        let records = vec![enriched("Acme Corp", Some("https://acme.io"), None)];
        write_enriched(&output, &table, &records, &OutputConfig::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Company Name,Email,Website\nAcme Corp,,https://acme.io\n"
        );
    }

    #[test]
    fn test_padded_headers_match_like_the_name_column() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, " Company Name , Email \nAcme Corp,old@acme.io\n");
        let table = read_table(&input, "Company Name").unwrap();
        assert_eq!(table.records(), vec![CompanyRecord::new("Acme Corp")]);

        let output = dir.path().join("out.csv");
        let records = vec![enriched("Acme Corp", None, Some("info@acme.io"))];
        write_enriched(&output, &table, &records, &OutputConfig::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            " Company Name , Email ,Website\nAcme Corp,info@acme.io,\n"
        );
    }

    #[test]
    fn test_long_rows_keep_extra_cells() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "Company Name,City\nAcme Corp,Berlin,note one,note two\nGlobex,Paris\n",
        );
        let table = read_table(&input, "Company Name").unwrap();

        let output = dir.path().join("out.csv");
        let records = vec![
            enriched("Acme Corp", Some("https://acme.io"), Some("info@acme.io")),
            enriched("Globex", Some("https://globex.com"), None),
        ];
        write_enriched(&output, &table, &records, &OutputConfig::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Company Name,City,,,Website,Email\n\
             Acme Corp,Berlin,note one,note two,https://acme.io,info@acme.io\n\
             Globex,Paris,,,https://globex.com,\n"
        );
    }
}
