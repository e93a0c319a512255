// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use crate::application::dto::scrape_job_request::ScrapeJobRequestDto;
use crate::application::dto::scrape_job_response::ScrapeJobResponseDto;
use crate::application::use_cases::run_scrape_job::RunScrapeJob;
use crate::presentation::errors::ApiError;

/// Run one scrape job synchronously and return the summary
pub async fn run_scrape_job(
    Extension(use_case): Extension<Arc<RunScrapeJob>>,
    Json(payload): Json<ScrapeJobRequestDto>,
) -> Result<impl IntoResponse, ApiError> {
    let (job_id, sites) = payload
        .validate()
        .map_err(ApiError::BadRequest)?;

    match use_case.run(job_id, sites, payload.mode).await {
        Ok(summary) => Ok(Json(ScrapeJobResponseDto::from(summary))),
        Err(err) => {
            error!(job_id, error = %err, "scrape job faulted");
            Err(ApiError::Internal(err.into()))
        }
    }
}
