//! CSV parsing for uploaded files.
//!
//! Quote-aware, header-first parsing. The contract is deliberately loose:
//! the expected sales columns (Order Date, Customer ID, Product, Category,
//! Quantity, Unit Price) are advisory and checked only by the chart builder.
//! Here a file is accepted as long as it is UTF-8 tabular data with a header
//! row and rectangular rows.

use crate::error::{AppError, AppResult};
use crate::models::DataTable;

/// Parse raw upload bytes into a table.
///
/// `MalformedCsv` when the bytes are not UTF-8, there is no header row, a
/// header name is empty, or a data row's field count differs from the
/// header's. Zero data rows is a valid (empty) table.
pub fn parse_csv(bytes: &[u8]) -> AppResult<DataTable> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| AppError::MalformedCsv("file is not valid UTF-8 text".to_string()))?;

    let mut records = parse_records(text)
        .into_iter()
        .filter(|r| r.len() > 1 || !r[0].trim().is_empty());

    let headers = records
        .next()
        .ok_or_else(|| AppError::MalformedCsv("file contains no header row".to_string()))?;

    if headers.iter().any(|h| h.trim().is_empty()) {
        return Err(AppError::MalformedCsv(
            "header row contains an empty column name".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for (idx, row) in records.enumerate() {
        if row.len() != headers.len() {
            return Err(AppError::MalformedCsv(format!(
                "row {} has {} fields, expected {}",
                idx + 2,
                row.len(),
                headers.len()
            )));
        }
        rows.push(row);
    }

    Ok(DataTable { headers, rows })
}

/// Split the whole text into records, honoring double quotes and `""`
/// escapes. Quote state spans line boundaries, so a quoted field may
/// contain newlines; a newline ends a record only outside quotes.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                record.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {
                // CRLF; the '\n' terminates the record
            }
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => {
                field.push(c);
            }
        }
    }

    // Final record when the file does not end with a newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
