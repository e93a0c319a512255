// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::run_scrape_job::RunScrapeJob;
use crate::presentation::handlers::job_handler;
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};

/// Assemble the application router
///
/// Health and version stay public; job submission sits behind the request
/// gate. The permissive CORS layer is outermost so preflight requests are
/// answered before authentication.
pub fn routes(use_case: Arc<RunScrapeJob>, auth_state: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let protected_routes = Router::new()
        .route("/v1/jobs/scrape", post(job_handler::run_scrape_job))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(Extension(use_case));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
