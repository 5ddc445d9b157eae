//! CSV file reading into all-text DataFrames.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::{has_open_quote, normalize_headers, parse_csv_line};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Rejects files starting with a UTF-16 byte-order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read < 2 {
        return Ok(());
    }
    let encoding = match buffer {
        [0xFF, 0xFE] => "UTF-16 LE",
        [0xFE, 0xFF] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// Header fields read from the first physical line of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderLine {
    fields: Vec<String>,
    /// False when a quoted header continues past the first line; the field
    /// list is then partial.
    complete: bool,
}

/// Reads and splits the first line of the file.
fn read_header_line(path: &Path) -> Result<HeaderLine> {
    let mut reader = BufReader::new(open(path)?);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if bytes == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let line = line.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
    let complete = !has_open_quote(line);
    let fields = parse_csv_line(line);
    if complete && fields.iter().all(|field| field.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(HeaderLine { fields, complete })
}

/// Reads a CSV file with one header row into a frame of `String` columns.
///
/// Headers are normalized (BOM stripped, whitespace trimmed and collapsed).
/// A header with no data rows yields an empty frame, not an error.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    let header = read_header_line(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let raw: Vec<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    if header.complete && header.fields.len() != raw.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header line has {} fields but the parser found {} columns",
                header.fields.len(),
                raw.len()
            ),
        });
    }
    let names = normalize_headers(&raw, path)?;
    let mut columns = df.take_columns();
    for (column, name) in columns.iter_mut().zip(&names) {
        column.rename(name.as_str().into());
    }
    let df = DataFrame::new(columns)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok(df)
}

/// Reads the raw appointment report.
pub fn read_report(path: &Path) -> Result<DataFrame> {
    read_table(path)
}

/// Reads the reference (help) sheet.
pub fn read_reference(path: &Path) -> Result<DataFrame> {
    read_table(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_header_line_strips_bom() {
        let file = create_temp_csv("\u{feff}A,B,C\r\n1,2,3\r\n".as_bytes());
        let header = read_header_line(file.path()).unwrap();
        assert_eq!(header.fields, vec!["A", "B", "C"]);
        assert!(header.complete);
    }

    #[test]
    fn test_read_header_line_open_quote_is_partial() {
        let file = create_temp_csv(b"\"\nVisit Type\",State\nNew,TX\n");
        let header = read_header_line(file.path()).unwrap();
        assert!(!header.complete);
    }

    #[test]
    fn test_read_table_multiline_quoted_header() {
        let file = create_temp_csv(b"\"Visit\nType\",State\nNew Patient,TX\n");
        let df = read_table(file.path()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["Visit Type", "State"]);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_read_header_line_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_header_line(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_header_line_blank_header() {
        let file = create_temp_csv(b" , ,\n1,2,3\n");
        let result = read_header_line(file.path());
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_table(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
