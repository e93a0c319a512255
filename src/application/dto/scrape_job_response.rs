// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use crate::domain::models::job::JobSummary;

/// Scrape-job response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJobResponseDto {
    pub job_id: String,
    pub success: bool,
    pub total_vehicles: u32,
    pub successful_sites: usize,
}

impl From<JobSummary> for ScrapeJobResponseDto {
    fn from(summary: JobSummary) -> Self {
        Self {
            job_id: summary.job_id,
            success: true,
            total_vehicles: summary.total_vehicles,
            successful_sites: summary.successful_sites,
        }
    }
}
