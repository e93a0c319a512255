// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

use crate::domain::models::site::SiteTarget;
use crate::domain::services::site_scraper::ScrapeMode;

/// Scrape-job request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJobRequestDto {
    pub job_id: Option<String>,
    pub sites: Option<Vec<SiteTarget>>,
    #[serde(default)]
    pub mode: ScrapeMode,
}

impl ScrapeJobRequestDto {
    /// Validate caller input; missing fields are caller-fatal (400)
    pub fn validate(&self) -> Result<(&str, &[SiteTarget]), String> {
        let job_id = match self.job_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err("Missing jobId".to_string()),
        };
        let sites = match self.sites.as_deref() {
            Some(sites) if !sites.is_empty() => sites,
            _ => return Err("Missing sites".to_string()),
        };
        Ok((job_id, sites))
    }
}
