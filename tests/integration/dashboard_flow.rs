//! Integration tests for the dashboard endpoint.

use tempfile::TempDir;

use crate::helpers::{get_json, login, signup, test_app, upload, SALES_CSV};

#[actix_rt::test]
async fn test_dashboard_before_any_upload() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    let (status, body) = get_json(&app, &token, "/api/v1/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "no_uploads_yet");
}

#[actix_rt::test]
async fn test_dashboard_ready_after_sales_upload() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;
    upload(&app, &token, "sales.csv", SALES_CSV).await;

    let (status, body) = get_json(&app, &token, "/api/v1/dashboard").await;
    assert_eq!(status, 200, "dashboard failed: {}", body);
    assert_eq!(body["state"], "ready");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["total_uploads"], 1);
    assert_eq!(body["latest_filename"], "sales.csv");

    // 3 rows x (2*10 + 1*5 + 1*10) across 2 customers
    assert_eq!(body["totals"]["revenue"], 35.0);
    assert_eq!(body["totals"]["units"], 4.0);
    assert_eq!(body["totals"]["customers"], 2);

    let charts = body["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 3);
    assert!(body.get("fallback_rows").is_none());
}

#[actix_rt::test]
async fn test_dashboard_reports_missing_blob() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;
    upload(&app, &token, "sales.csv", SALES_CSV).await;

    // Blob disappears out from under the log
    std::fs::remove_file(dir.path().join("uploads/alice/sales.csv")).unwrap();

    let (status, body) = get_json(&app, &token, "/api/v1/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "file_missing");
    assert_eq!(body["filename"], "sales.csv");
}

#[actix_rt::test]
async fn test_dashboard_falls_back_without_sales_columns() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;
    upload(&app, &token, "plain.csv", b"a,b\n1,2\n3,4\n").await;

    let (status, body) = get_json(&app, &token, "/api/v1/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "ready");
    assert!(body["charts"].as_array().unwrap().is_empty());
    assert!(body.get("totals").is_none());
    assert_eq!(body["fallback_rows"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_dashboard_tracks_the_latest_upload() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    upload(&app, &token, "january.csv", SALES_CSV).await;
    upload(
        &app,
        &token,
        "february.csv",
        b"Order Date,Customer ID,Product,Category,Quantity,Unit Price\n\
          2024-02-01,C9,Doodad,Misc,4,2.5\n",
    )
    .await;

    let (status, body) = get_json(&app, &token, "/api/v1/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "ready");
    assert_eq!(body["total_uploads"], 2);
    assert_eq!(body["latest_filename"], "february.csv");
    assert_eq!(body["totals"]["revenue"], 10.0);
}
