//! Integration tests for CSV upload and history.

use tempfile::TempDir;

use crate::helpers::{get_json, login, signup, test_app, upload, SALES_CSV};

#[actix_rt::test]
async fn test_upload_returns_bounded_preview() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    let (status, body) = upload(&app, &token, "sales.csv", SALES_CSV).await;
    assert_eq!(status, 201, "upload failed: {}", body);
    assert_eq!(body["filename"], "sales.csv");
    assert_eq!(body["rows"], 3);
    assert_eq!(body["columns"].as_array().unwrap().len(), 6);
    assert_eq!(body["preview"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_history_lists_uploads_newest_first() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    upload(&app, &token, "first.csv", b"a,b\n1,2\n").await;
    upload(&app, &token, "second.csv", b"a,b\n3,4\n").await;

    let (status, body) = get_json(&app, &token, "/api/v1/uploads").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2);

    let uploads = body["uploads"].as_array().unwrap();
    assert_eq!(uploads[0]["filename"], "second.csv");
    assert_eq!(uploads[1]["filename"], "first.csv");
    assert!(uploads[0]["upload_time"].as_str() >= uploads[1]["upload_time"].as_str());
}

#[actix_rt::test]
async fn test_history_count_is_fresh_right_after_upload() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    // Warm the cache with an empty history first
    let (_, body) = get_json(&app, &token, "/api/v1/uploads").await;
    assert_eq!(body["total"], 0);

    upload(&app, &token, "sales.csv", SALES_CSV).await;

    // Write-invalidation means the count is correct immediately
    let (_, body) = get_json(&app, &token, "/api/v1/uploads").await;
    assert_eq!(body["total"], 1);
}

#[actix_rt::test]
async fn test_garbage_upload_is_rejected_and_rolled_back() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    let (status, body) = upload(&app, &token, "data.csv", &[0xff, 0xfe, 0x01, 0x02]).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "MALFORMED_CSV");

    // No blob left on disk, no history row recorded
    assert!(!dir.path().join("uploads/alice/data.csv").exists());
    let (_, body) = get_json(&app, &token, "/api/v1/uploads").await;
    assert_eq!(body["total"], 0);
}

#[actix_rt::test]
async fn test_reupload_same_filename_appends_history() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    upload(&app, &token, "sales.csv", b"a,b\n1,2\n").await;
    upload(&app, &token, "sales.csv", b"a,b\n9,9\n").await;

    let (_, body) = get_json(&app, &token, "/api/v1/uploads").await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["uploads"][0]["filename"], "sales.csv");
    assert_eq!(body["uploads"][1]["filename"], "sales.csv");

    // Blob was overwritten in place
    let stored = std::fs::read(dir.path().join("uploads/alice/sales.csv")).unwrap();
    assert_eq!(stored, b"a,b\n9,9\n");
}

#[actix_rt::test]
async fn test_upload_rejects_path_traversal_filename() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    let (status, body) = upload(&app, &token, "..csv-escape", b"a,b\n1,2\n").await;
    // '..' anywhere in the name is rejected before touching the filesystem
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_oversized_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    // test_config caps uploads at 1MiB
    let mut big = b"a,b\n".to_vec();
    big.extend(std::iter::repeat(b'x').take(1024 * 1024 + 1));

    let (status, body) = upload(&app, &token, "big.csv", &big).await;
    assert_eq!(status, 413, "unexpected: {}", body);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
}

#[actix_rt::test]
async fn test_users_cannot_see_each_others_history() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    signup(&app, "bob", "password2").await;
    let alice = login(&app, "alice", "password1").await;
    let bob = login(&app, "bob", "password2").await;

    upload(&app, &alice, "sales.csv", SALES_CSV).await;

    let (_, body) = get_json(&app, &bob, "/api/v1/uploads").await;
    assert_eq!(body["total"], 0);
}
