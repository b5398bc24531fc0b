use serde_json::Value;

use crate::catalog::catalog_model::RawRecord;
use crate::source::error::SourceError;

const CANDIDATE_DELIMITERS: [char; 3] = [',', '\t', ';'];

// ============================================================================
// Format dispatch
// ============================================================================

/// Parse fetched text into raw records.
///
/// Text starting with `[` is read as a JSON array of objects; anything else
/// as delimited text with a header row.
pub fn parse_records(text: &str, location: &str) -> Result<Vec<RawRecord>, SourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim_start().starts_with('[') {
        parse_json_records(text, location)
    } else {
        parse_delimited(text, location)
    }
}

pub fn parse_json_records(text: &str, location: &str) -> Result<Vec<RawRecord>, SourceError> {
    let rows: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(text).map_err(|source| SourceError::Json {
            location: location.to_string(),
            source,
        })?;

    Ok(rows.into_iter().map(RawRecord::from).collect())
}

// ============================================================================
// Delimited text
// ============================================================================

/// Parse delimited text. The first non-blank row is the header; empty cells
/// are left out of the record, cells beyond the header width are ignored.
pub fn parse_delimited(text: &str, location: &str) -> Result<Vec<RawRecord>, SourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = detect_delimiter(text);

    let rows = split_rows(text, delimiter).map_err(|reason| SourceError::malformed(location, reason))?;
    let mut rows = rows.into_iter().filter(|row| !is_blank_row(row));

    let header: Vec<String> = match rows.next() {
        Some(row) => row.into_iter().map(|cell| cell.trim().to_string()).collect(),
        None => return Err(SourceError::malformed(location, "no header row")),
    };

    if header.iter().all(|h| h.is_empty()) {
        return Err(SourceError::malformed(location, "header row has no column names"));
    }

    Ok(rows.map(|row| build_record(&header, row)).collect())
}

/// Pick the delimiter that occurs most often (outside quotes) in the header
/// line. Comma wins ties and is the fallback.
pub fn detect_delimiter(text: &str) -> char {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");

    let mut counts = CANDIDATE_DELIMITERS.map(|d| (d, 0usize));
    let mut in_quotes = false;
    for c in header.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        for (d, n) in counts.iter_mut() {
            if c == *d {
                *n += 1;
            }
        }
    }

    counts
        .iter()
        .fold((',', 0), |best, &(d, n)| if n > best.1 { (d, n) } else { best })
        .0
}

fn build_record(header: &[String], row: Vec<String>) -> RawRecord {
    let mut record = RawRecord::new();
    for (column, cell) in header.iter().zip(row) {
        if column.is_empty() || cell.trim().is_empty() {
            continue;
        }
        record.push(column.clone(), Value::String(cell));
    }
    record
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Split text into rows of cells, honoring double-quoted fields (which may
/// contain delimiters, newlines and `""` escapes).
fn split_rows(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut field_quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 0;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !field_quoted && field.trim().is_empty() => {
                field.clear();
                field_quoted = true;
                in_quotes = true;
                quote_line = line;
            }
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                field_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                field_quoted = false;
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(format!("unterminated quoted field starting on line {}", quote_line));
    }

    if !field.is_empty() || field_quoted || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
