//! Authentication Middleware
//! Mission: Put the Basic Auth gate in front of every route

use crate::auth::{gate::BasicAuthGate, models::Decision};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Gate middleware. Allowed requests are forwarded untouched.
pub async fn basic_auth_middleware(
    State(gate): State<Arc<BasicAuthGate>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match gate.evaluate(req.headers()) {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Deny => Err(AuthError::Unauthorized {
            challenge: gate.challenge().clone(),
        }),
    }
}

/// Auth error types
///
/// A single variant on purpose: missing, malformed and wrong credentials all
/// render the same response.
#[derive(Debug)]
pub enum AuthError {
    Unauthorized { challenge: HeaderValue },
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized { challenge } => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, challenge)],
                "Unauthorized",
            )
                .into_response(),
        }
    }
}
