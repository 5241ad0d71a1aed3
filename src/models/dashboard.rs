//! Dashboard snapshot models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One chart-ready dataset: label/value pairs under a title.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Headline figures computed from the latest upload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalesTotals {
    pub revenue: f64,
    pub units: f64,
    pub customers: u64,
}

/// Summary values computed from the latest upload for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub username: String,
    pub total_uploads: u64,
    pub latest_filename: String,
    pub latest_upload_time: DateTime<Utc>,
    /// Headline totals; absent when the chart builder fell back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<SalesTotals>,
    /// Chart datasets from the visualization collaborator. Empty when the
    /// collaborator failed and `fallback_rows` is populated instead.
    pub charts: Vec<ChartSeries>,
    /// Raw first rows of the latest file, only present when chart building
    /// failed (e.g. the advisory sales columns are absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_rows: Option<Vec<Vec<String>>>,
}

/// Dashboard retrieval outcome. The two non-`ready` variants are explicit
/// empty states, not errors: the caller renders a prompt, never a failure.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardData {
    /// User has never uploaded anything
    NoUploadsYet,
    /// The log references a blob that is gone from disk; re-upload required
    FileMissing { filename: String },
    /// Latest upload parsed and summarized
    Ready(DashboardSnapshot),
}
