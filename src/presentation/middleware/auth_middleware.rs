// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::presentation::errors::ApiError;

/// Request gate state
#[derive(Clone)]
pub struct AuthState {
    /// Shared secret accepted via the `x-internal-key` header
    pub internal_key: String,
}

/// Request gate
///
/// Accepts a request if it carries a bearer credential (validity is the
/// upstream identity service's problem, not re-checked here) or the shared
/// internal secret. Runs before any job work begins.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if is_authorized(req.headers(), &state.internal_key) {
        next.run(req).await
    } else {
        debug!(path = %req.uri().path(), "rejecting unauthenticated request");
        ApiError::Unauthorized.into_response()
    }
}

fn is_authorized(headers: &HeaderMap, internal_key: &str) -> bool {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            if !token.trim().is_empty() {
                return true;
            }
        }
    }

    headers
        .get("x-internal-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| !internal_key.is_empty() && key == internal_key)
}
