// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-level error taxonomy
///
/// Per-target scrape failures never become one of these; they are absorbed
/// by the orchestrator and reported as data. Only caller-fatal input, auth
/// failures and orchestration faults produce a non-200 response.
#[derive(Debug)]
pub enum ApiError {
    /// Neither a bearer token nor the internal key was presented
    Unauthorized,
    /// The request body is missing required fields
    BadRequest(String),
    /// Orchestration-level fault; carries diagnostic detail
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Job orchestration failed",
                    "details": err.to_string(),
                })),
            )
                .into_response(),
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
