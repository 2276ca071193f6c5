//! CSV parser with per-column type inference.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use sha2::{Digest, Sha256};

use super::source::SourceMetadata;
use crate::error::{PipelineError, Result};
use crate::table::{Column, Table};

/// Cell contents treated as missing values.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text files into typed tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Handle is dropped at the end of this block
        let contents = {
            let mut file = File::open(path).map_err(io_err)?;
            let mut contents = Vec::new();
            file.read_to_end(&mut contents).map_err(io_err)?;
            contents
        };

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => unique_headers(record?.iter()),
                None => return Err(PipelineError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut headers = headers;

        for (row_idx, result) in records.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;

            // Headerless input takes its width from the first row
            if headers.is_empty() && !self.config.has_header {
                headers = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
                cells = vec![Vec::new(); headers.len()];
            }

            if record.len() > headers.len() {
                return Err(PipelineError::Parse {
                    row: row_idx + 1,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        record.len()
                    ),
                });
            }

            for (col_idx, column) in cells.iter_mut().enumerate() {
                column.push(record.get(col_idx).and_then(cell_value));
            }
        }

        if headers.is_empty() {
            return Err(PipelineError::EmptyData("No columns found".to_string()));
        }

        let columns: IndexMap<String, Column> = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| (name, infer_column(values)))
            .collect();

        Ok(Table::from_columns(columns))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a raw cell represents a missing value.
pub fn is_null_value(value: &str) -> bool {
    NULL_TOKENS.contains(&value.trim())
}

fn cell_value(raw: &str) -> Option<String> {
    if is_null_value(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Name blank headers `Unnamed: {i}` and suffix repeats with `.1`, `.2`, ...
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (idx, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

/// A column is numeric when it has rows and every present cell parses as a float.
fn infer_column(values: Vec<Option<String>>) -> Column {
    if values.is_empty() {
        return Column::Text(values);
    }

    let parsed: Option<Vec<f64>> = values
        .iter()
        .map(|cell| match cell {
            Some(s) => s.trim().parse::<f64>().ok(),
            None => Some(f64::NAN),
        })
        .collect();

    match parsed {
        Some(numbers) => Column::Numeric(numbers),
        None => Column::Text(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnKind;

    #[test]
    fn test_parse_csv_types() {
        let parser = Parser::new();
        let data = b"compound,retention_time,intensity\ncaffeine,1.2,1500\ntheobromine,2.4,900";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.column_names(), vec!["compound", "retention_time", "intensity"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("compound").unwrap().kind(), ColumnKind::Text);
        assert_eq!(table.numeric_column("retention_time").unwrap(), &[1.2, 2.4]);
        assert_eq!(table.numeric_column("intensity").unwrap(), &[1500.0, 900.0]);
    }

    #[test]
    fn test_missing_values_in_numeric_column() {
        let parser = Parser::new();
        let data = b"intensity\n10\nNA\n30\n";
        let table = parser.parse_bytes(data).unwrap();

        let values = table.numeric_column("intensity").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], 10.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 30.0);
    }

    #[test]
    fn test_mixed_column_is_text() {
        let parser = Parser::new();
        let data = b"sample\n1\nblank\n3\n";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(
            table.column("sample"),
            Some(&Column::Text(vec![
                Some("1".to_string()),
                Some("blank".to_string()),
                Some("3".to_string()),
            ]))
        );
    }

    #[test]
    fn test_short_rows_padded() {
        let parser = Parser::new();
        let data = b"a,b\n1,2\n3\n";
        let table = parser.parse_bytes(data).unwrap();

        let b = table.numeric_column("b").unwrap();
        assert_eq!(b[0], 2.0);
        assert!(b[1].is_nan());
    }

    #[test]
    fn test_long_row_is_error() {
        let parser = Parser::new();
        let data = b"a,b\n1,2\n3,4,5\n";
        let err = parser.parse_bytes(data).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { row: 2, .. }));
    }

    #[test]
    fn test_empty_input_is_error() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b""),
            Err(PipelineError::EmptyData(_))
        ));
    }

    #[test]
    fn test_header_only() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"retention_time,intensity\n").unwrap();
        assert_eq!(table.shape(), (0, 2));
        assert!(!table.column("intensity").unwrap().is_numeric());
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"peak,peak,,peak\n1,2,3,4\n").unwrap();
        assert_eq!(
            table.column_names(),
            vec!["peak", "peak.1", "Unnamed: 2", "peak.2"]
        );
    }

    #[test]
    fn test_headerless_input() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4\n").unwrap();
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(2),
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"x\n1\n2\n3\n4\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_is_null_value() {
        assert!(is_null_value(""));
        assert!(is_null_value("NA"));
        assert!(is_null_value("N/A"));
        assert!(is_null_value("null"));
        assert!(is_null_value("NULL"));
        assert!(is_null_value(" NaN "));
        assert!(!is_null_value("na"));
        assert!(!is_null_value("value"));
        assert!(!is_null_value("0"));
    }
}
