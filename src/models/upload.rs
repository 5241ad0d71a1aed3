//! Upload log and preview models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One row of the upload log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadEntry {
    pub filename: String,
    pub upload_time: DateTime<Utc>,
}

/// Bounded preview of a freshly uploaded CSV, returned from the upload
/// endpoint so the caller can confirm what was parsed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadPreview {
    pub filename: String,
    /// Total data rows in the file (not just the preview)
    pub rows: usize,
    pub columns: Vec<String>,
    /// First N rows, N from configuration
    pub preview: Vec<Vec<String>>,
}
