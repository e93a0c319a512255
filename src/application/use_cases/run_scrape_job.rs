// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::domain::models::job::{DomainError, Job, JobSummary};
use crate::domain::models::site::SiteTarget;
use crate::domain::repositories::job_store::{JobPatch, JobStore, JobStoreError};
use crate::domain::services::site_scraper::{ScrapeMode, SiteScraper};

/// Orchestration-level fault; per-target failures never surface here
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Job store unavailable: {0}")]
    StoreUnavailable(#[from] JobStoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Job orchestrator
///
/// Walks the requested target list sequentially, scraping each target with
/// failure isolation, and persists the job lifecycle to the external store.
/// Targets are processed one at a time; outbound concurrency stays at 1 so
/// external hosts are never hammered by a single job.
pub struct RunScrapeJob {
    store: Arc<dyn JobStore>,
    scraper: SiteScraper,
}

impl RunScrapeJob {
    pub fn new(store: Arc<dyn JobStore>, scraper: SiteScraper) -> Self {
        Self { store, scraper }
    }

    #[instrument(skip(self, targets), fields(job_id = %job_id, mode = %mode, targets = targets.len()))]
    pub async fn run(
        &self,
        job_id: &str,
        targets: &[SiteTarget],
        mode: ScrapeMode,
    ) -> Result<JobSummary, JobError> {
        let site_ids: Vec<String> = targets.iter().map(|t| t.id.clone()).collect();
        let mut job = Job::new(job_id, site_ids).start()?;

        // The running transition must be durable before any scraping; a store
        // that is unreachable here is an orchestration-level fault. The failed
        // marker is best-effort since the store may still be down.
        if let Err(err) = self.store.upsert(job_id, &JobPatch::running(&job)).await {
            error!(job_id, error = %err, "failed to mark job running");
            let job = job.fail()?;
            if let Err(mark_err) = self.store.upsert(job_id, &JobPatch::failed(&job)).await {
                warn!(job_id, error = %mark_err, "failed to persist failed status");
            }
            return Err(err.into());
        }

        metrics::counter!("scrape_jobs_total").increment(1);

        for target in targets {
            let result = self.scraper.scrape(target, mode).await;
            if let Err(err) = job.record_result(result) {
                // Duplicate target ids are a caller error; keep going.
                warn!(job_id, target = %target.id, error = %err, "skipping result");
            }
        }

        let job = job.complete()?;
        let summary = JobSummary::from(&job);
        info!(
            job_id,
            total_vehicles = summary.total_vehicles,
            successful_sites = summary.successful_sites,
            total_sites = summary.total_sites,
            "job completed"
        );

        // The caller gets the in-memory summary either way; a persistence
        // failure here is logged and swallowed.
        if let Err(err) = self
            .store
            .upsert(job_id, &JobPatch::completed(&job, &summary))
            .await
        {
            warn!(job_id, error = %err, "failed to persist completed job");
        }

        Ok(summary)
    }
}
