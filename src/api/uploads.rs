//! Upload endpoints: CSV intake and upload history.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures_util::StreamExt;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SessionAuth;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{UploadEntry, UploadPreview};
use crate::services::{dashboard, FileStore, HistoryCache};

/// Upload history response.
#[derive(Serialize, ToSchema)]
pub struct UploadListResponse {
    pub uploads: Vec<UploadEntry>,
    pub total: usize,
}

/// Upload a sales CSV.
///
/// Multipart form with a single `file` field. The filename is preserved
/// verbatim inside the caller's namespace; re-uploading a filename
/// overwrites the stored file and appends a new history row.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    tag = "Uploads",
    responses(
        (status = 201, description = "Upload accepted", body = UploadPreview),
        (status = 400, description = "Missing file or invalid filename", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse),
        (status = 422, description = "File is not parseable CSV", body = crate::error::ErrorResponse)
    ),
    security(("session_token" = []))
)]
#[post("/uploads")]
pub async fn upload_csv(
    auth: SessionAuth,
    mut payload: Multipart,
    pool: web::Data<DbPool>,
    files: web::Data<FileStore>,
    history: web::Data<Arc<HistoryCache>>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| AppError::InvalidInput("Missing content disposition".to_string()))?;

        if content_disposition.get_name() != Some("file") {
            // Drain and ignore unknown fields
            while let Some(chunk) = field.next().await {
                let _ = chunk;
            }
            continue;
        }

        let filename = content_disposition
            .get_filename()
            .ok_or_else(|| AppError::InvalidInput("Missing filename".to_string()))?
            .to_string();

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;

            if bytes.len() + data.len() > config.max_upload_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "Upload exceeds {} bytes",
                    config.max_upload_size
                )));
            }
            bytes.extend_from_slice(&data);
        }

        upload = Some((filename, bytes));
    }

    let (filename, bytes) = upload
        .ok_or_else(|| AppError::InvalidInput("Missing 'file' field in upload".to_string()))?;

    let preview = dashboard::handle_upload(
        &pool,
        &files,
        &history,
        &auth.username,
        &filename,
        &bytes,
        config.preview_rows,
    )
    .await?;

    Ok(HttpResponse::Created().json(preview))
}

/// List the caller's upload history, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/uploads",
    tag = "Uploads",
    responses(
        (status = 200, description = "Upload history", body = UploadListResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    security(("session_token" = []))
)]
#[get("/uploads")]
pub async fn list_uploads(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    history: web::Data<Arc<HistoryCache>>,
) -> AppResult<HttpResponse> {
    let uploads = history.list_uploads(&pool, &auth.username).await?;
    let total = uploads.len();

    Ok(HttpResponse::Ok().json(UploadListResponse { uploads, total }))
}

/// Configure upload routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_csv).service(list_uploads);
}
