//! Pipeline controller: upload intake and dashboard assembly.
//!
//! Every operation here requires an already-authenticated username; the
//! `SessionAuth` extractor supplies it at the HTTP layer.

use chrono::Utc;
use tracing::{info, warn};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{DashboardData, DashboardSnapshot, DataTable, UploadPreview};
use crate::services::csv;
use crate::services::history::HistoryCache;
use crate::services::storage::FileStore;
use crate::services::visualize::ChartBuilder;

/// Accept one uploaded CSV for a user.
///
/// Order of operations: store the blob, parse it, then append the log row.
/// A parse failure deletes the just-stored blob so the dashboard can never
/// reach unparseable data. A log failure after a successful write leaves
/// the blob in place: at-least-once storage, best-effort logging (the log
/// only drives display ordering).
pub async fn handle_upload(
    pool: &DbPool,
    files: &FileStore,
    history: &HistoryCache,
    username: &str,
    filename: &str,
    bytes: &[u8],
    preview_rows: usize,
) -> AppResult<UploadPreview> {
    files.store(username, filename, bytes).await?;

    let table = match csv::parse_csv(bytes) {
        Ok(table) => table,
        Err(parse_err) => {
            // Roll the blob back; a cleanup failure is logged, not surfaced,
            // since the parse error is what the caller needs to see
            if let Err(rm_err) = files.remove(username, filename).await {
                warn!(
                    "Failed to remove unparseable upload {}/{}: {}",
                    username, filename, rm_err
                );
            }
            return Err(parse_err);
        }
    };

    let entry = pool.insert_upload(username, filename, Utc::now()).await?;
    history.invalidate(username);

    info!(
        "Stored upload '{}' for '{}' ({} rows)",
        filename,
        username,
        table.row_count()
    );

    Ok(UploadPreview {
        filename: entry.filename,
        rows: table.row_count(),
        columns: table.headers.clone(),
        preview: table.preview(preview_rows),
    })
}

/// Assemble the dashboard for a user.
///
/// `NoUploadsYet` and `FileMissing` are states, not errors: both map to a
/// prompt in the caller's UI.
pub async fn dashboard(
    pool: &DbPool,
    files: &FileStore,
    history: &HistoryCache,
    charts: &dyn ChartBuilder,
    username: &str,
    preview_rows: usize,
) -> AppResult<DashboardData> {
    let uploads = history.list_uploads(pool, username).await?;

    let Some(latest) = uploads.first() else {
        return Ok(DashboardData::NoUploadsYet);
    };

    let bytes = match files.load(username, &latest.filename).await {
        Ok(bytes) => bytes,
        Err(AppError::NotFound(_)) => {
            return Ok(DashboardData::FileMissing {
                filename: latest.filename.clone(),
            });
        }
        Err(e) => return Err(e),
    };

    let table = csv::parse_csv(&bytes)?;
    let snapshot =
        build_snapshot(charts, username, uploads.len() as u64, latest, &table, preview_rows);

    Ok(DashboardData::Ready(snapshot))
}

fn build_snapshot(
    charts: &dyn ChartBuilder,
    username: &str,
    total_uploads: u64,
    latest: &crate::models::UploadEntry,
    table: &DataTable,
    preview_rows: usize,
) -> DashboardSnapshot {
    let mut snapshot = DashboardSnapshot {
        username: username.to_string(),
        total_uploads,
        latest_filename: latest.filename.clone(),
        latest_upload_time: latest.upload_time,
        totals: None,
        charts: Vec::new(),
        fallback_rows: None,
    };

    match charts.build(table) {
        Ok(report) => {
            snapshot.totals = Some(report.totals);
            snapshot.charts = report.charts;
        }
        Err(e) => {
            // Collaborator failed; show raw rows instead of charts
            warn!("Chart builder failed for '{}': {}", username, e);
            snapshot.fallback_rows = Some(table.preview(preview_rows));
        }
    }

    snapshot
}
