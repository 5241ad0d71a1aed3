//! Parsed tabular data.

use serde::Serialize;
use utoipa::ToSchema;

/// A parsed CSV: one header row plus zero or more data rows, every row the
/// same width as the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Number of data rows (the header does not count).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Case-insensitive lookup of a column index by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// First `n` data rows, cloned for a preview.
    pub fn preview(&self, n: usize) -> Vec<Vec<String>> {
        self.rows.iter().take(n).cloned().collect()
    }
}
