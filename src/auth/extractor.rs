//! Actix-web extractor for session authentication.
//!
//! # Security
//! - The incoming token is wrapped in `SecretString` immediately
//! - Tokens are never logged; the store holds only SHA-256 digests
//! - Memory is zeroized when the request completes

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use secrecy::{ExposeSecret, SecretString};
use std::future::{ready, Ready};
use std::sync::Arc;

use crate::config::SESSION_TOKEN_HEADER;
use crate::error::ErrorResponse;
use crate::services::SessionStore;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "NOT_AUTHENTICATED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a live session.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: SessionAuth) -> impl Responder {
///     // auth.username is the authenticated user
/// }
/// ```
pub struct SessionAuth {
    pub username: String,
    /// The raw token, kept so logout can revoke it.
    pub token: SecretString,
}

impl FromRequest for SessionAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let store = match req.app_data::<web::Data<Arc<SessionStore>>>() {
            Some(store) => store,
            None => {
                return ready(Err(AuthError {
                    message: "Internal configuration error".to_string(),
                }));
            }
        };

        let provided: Option<SecretString> = extract_secret_header(req, SESSION_TOKEN_HEADER);

        match provided {
            Some(token) => match store.validate(token.expose_secret()) {
                Ok(session) => ready(Ok(SessionAuth {
                    username: session.username,
                    token,
                })),
                Err(e) => ready(Err(AuthError {
                    message: e.to_string(),
                })),
            },
            None => ready(Err(AuthError {
                message: format!("Missing session token. Provide {} header.", SESSION_TOKEN_HEADER),
            })),
        }
    }
}
