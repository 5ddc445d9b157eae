//! Header line parsing and normalization.

use std::collections::HashSet;
use std::path::Path;

use hx_model::normalize_header;

use crate::error::{IngestError, Result};

/// Splits one CSV line into fields, honouring double-quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => in_quotes = true,
            '"' => {
                // "" inside quotes is a literal quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// True when `line` ends inside a quoted field, so the record continues on
/// the next line.
pub fn has_open_quote(line: &str) -> bool {
    line.chars().filter(|&c| c == '"').count() % 2 == 1
}

/// Normalizes every header and rejects names that collide afterwards.
///
/// Headers that normalize to nothing are named `column_<n>` (one-based).
pub fn normalize_headers<S: AsRef<str>>(raw: &[S], path: &Path) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(index, name)| {
            let mut name = normalize_header(name.as_ref());
            if name.is_empty() {
                name = format!("column_{}", index + 1);
            }
            if !seen.insert(name.clone()) {
                return Err(IngestError::DuplicateColumn {
                    column: name,
                    path: path.to_path_buf(),
                });
            }
            Ok(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_simple() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"Smith, John\",b,\"say \"\"hi\"\"\"");
        assert_eq!(result, vec!["Smith, John", "b", "say \"hi\""]);
    }

    #[test]
    fn test_parse_csv_line_keeps_empty_fields() {
        assert_eq!(parse_csv_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_has_open_quote() {
        assert!(has_open_quote("\"Visit"));
        assert!(!has_open_quote("\"Visit Type\",State"));
        assert!(!has_open_quote("\"say \"\"hi\"\"\",b"));
    }

    #[test]
    fn test_normalize_headers_collapses_whitespace() {
        let raw = ["  Visit   Type ", "\u{feff}Appointment State", " "];
        let names = normalize_headers(&raw, Path::new("r.csv")).unwrap();
        assert_eq!(names, vec!["Visit Type", "Appointment State", "column_3"]);
    }

    #[test]
    fn test_normalize_headers_rejects_collisions() {
        let result = normalize_headers(&["Visit Type", "Visit  Type"], Path::new("r.csv"));
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { ref column, .. }) if column == "Visit Type"
        ));
    }
}
