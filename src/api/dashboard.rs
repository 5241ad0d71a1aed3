//! Dashboard endpoint.

use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::auth::SessionAuth;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::DashboardData;
use crate::services::{dashboard, ChartBuilder, FileStore, HistoryCache};

/// Fetch the dashboard for the authenticated user.
///
/// Always 200 for a live session: `no_uploads_yet` and `file_missing` are
/// states the UI turns into prompts, not errors.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard state", body = DashboardData),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    security(("session_token" = []))
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    files: web::Data<FileStore>,
    history: web::Data<Arc<HistoryCache>>,
    charts: web::Data<Arc<dyn ChartBuilder>>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let data = dashboard::dashboard(
        &pool,
        &files,
        &history,
        charts.get_ref().as_ref(),
        &auth.username,
        config.preview_rows,
    )
    .await?;

    Ok(HttpResponse::Ok().json(data))
}

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_dashboard);
}
