//! Shared test helpers: app construction and request shorthand.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use tempfile::TempDir;

use salesboard_lib::api;
use salesboard_lib::config::{Config, Environment};
use salesboard_lib::db::DbPool;
use salesboard_lib::services::{
    ChartBuilder, FileStore, HistoryCache, SalesChartBuilder, SessionStore,
};

/// A parseable sales CSV with 3 rows.
pub const SALES_CSV: &[u8] = b"Order Date,Customer ID,Product,Category,Quantity,Unit Price\n\
    2024-01-01,C1,Widget,Tools,2,10.0\n\
    2024-01-02,C2,Gadget,Toys,1,5.0\n\
    2024-01-03,C1,Widget,Tools,1,10.0\n";

/// Test configuration rooted in a temp directory.
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: format!(
            "sqlite://{}/test.db?mode=rwc",
            dir.path().to_string_lossy()
        ),
        data_dir: dir.path().join("uploads"),
        static_dir: None,
        max_upload_size: 1024 * 1024,
        session_ttl_secs: 3600,
        history_cache_ttl_secs: 600,
        preview_rows: 5,
        db_timeout_secs: 5,
    }
}

/// Build a fully wired test app over a fresh database and blob store.
pub async fn test_app(
    dir: &TempDir,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let config = test_config(dir);

    let pool = DbPool::new(&config).await.expect("connect test db");
    pool.run_migrations().await.expect("run migrations");

    let files = FileStore::new(config.data_dir.clone())
        .await
        .expect("create blob store");
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_secs,
    )));
    let history = Arc::new(HistoryCache::new(Duration::from_secs(
        config.history_cache_ttl_secs,
    )));
    let charts: Arc<dyn ChartBuilder> = Arc::new(SalesChartBuilder);

    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(files))
            .app_data(web::Data::new(sessions))
            .app_data(web::Data::new(history))
            .app_data(web::Data::new(charts))
            .app_data(web::Data::new(config))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_auth_routes)
                    .configure(api::configure_upload_routes)
                    .configure(api::configure_dashboard_routes),
            ),
    )
    .await
}

/// POST /auth/signup; returns the response status and body.
pub async fn signup<S>(app: &S, username: &str, password: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({"username": username, "password": password}))
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

/// POST /auth/login; returns the session token, panicking on failure.
pub async fn login<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let (status, body) = try_login(app, username, password).await;
    assert_eq!(status, 200, "login failed: {}", body);
    body["token"].as_str().expect("token in response").to_string()
}

/// POST /auth/login without asserting success.
pub async fn try_login<S>(app: &S, username: &str, password: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": username, "password": password}))
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

/// POST /uploads with a single multipart `file` field.
pub async fn upload<S>(app: &S, token: &str, filename: &str, content: &[u8]) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let boundary = "----salesboard-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
             Content-Type: text/csv\r\n\r\n",
            boundary, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let req = test::TestRequest::post()
        .uri("/api/v1/uploads")
        .insert_header(("X-Session-Token", token))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(body)
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

/// Authenticated GET; returns status and JSON body.
pub async fn get_json<S>(app: &S, token: &str, uri: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-Session-Token", token))
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}
