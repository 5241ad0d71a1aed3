//! Account endpoints: signup, login, logout.

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::UserAccount;
use crate::services::{accounts, SessionStore};

/// Signup request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the bearer token, shown exactly once.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

/// Create a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserAccount),
        (status = 400, description = "Invalid username or password policy violation", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/signup")]
pub async fn signup(
    pool: web::Data<DbPool>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let account = accounts::register(&pool, &body.username, &body.password).await?;
    Ok(HttpResponse::Created().json(account))
}

/// Authenticate and open a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    sessions: web::Data<Arc<SessionStore>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    if !accounts::verify_credentials(&pool, &body.username, &body.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    // Drop expired sessions before issuing a new one
    sessions.purge_expired();

    let (token, expires_at) = sessions.create(&body.username);
    info!("User '{}' logged in", body.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        expires_at,
        username: body.username.clone(),
    }))
}

/// Close the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    security(("session_token" = []))
)]
#[post("/auth/logout")]
pub async fn logout(
    sessions: web::Data<Arc<SessionStore>>,
    auth: SessionAuth,
) -> AppResult<HttpResponse> {
    sessions.revoke(auth.token.expose_secret());
    info!("User '{}' logged out", auth.username);
    Ok(HttpResponse::NoContent().finish())
}

/// Configure auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login).service(logout);
}
