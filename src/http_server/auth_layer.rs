//! Basic-auth middleware applied in front of every route, fallback included.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::errors::ErrorResponse;
use crate::auth::{authenticate, CredentialVerifier};
use crate::observability::{log_event_with_fields, Event};

/// Middleware state: who checks credentials, and the realm to advertise
#[derive(Clone)]
pub struct AuthGuard {
    verifier: Arc<dyn CredentialVerifier>,
    challenge: HeaderValue,
}

impl AuthGuard {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, realm: &str) -> Self {
        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
        Self {
            verifier,
            challenge,
        }
    }

    /// 401 with the `WWW-Authenticate` challenge
    pub fn unauthorized(&self) -> Response {
        let mut response =
            (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("Unauthorized"))).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, self.challenge.clone());
        response
    }
}

pub async fn require_basic_auth(
    State(guard): State<AuthGuard>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match authenticate(guard.verifier.as_ref(), header) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            log_event_with_fields(
                Event::AuthRejected,
                &[
                    ("method", request.method().as_str()),
                    ("path", request.uri().path()),
                    ("reason", e.reason()),
                ],
            );
            guard.unauthorized()
        }
    }
}
