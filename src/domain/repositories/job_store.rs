// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::models::job::{Job, JobStatus, JobSummary};

/// Job store error type
#[derive(Error, Debug)]
pub enum JobStoreError {
    #[error("Store write failed: {0}")]
    WriteFailed(String),

    #[error("Store rejected write: HTTP {0}")]
    Rejected(u16),
}

/// Partial update for the durable job record
///
/// Only set fields are serialized, so every write is a merge against the
/// record keyed by the job id.
#[derive(Debug, Default, Clone, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sites_targeted: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
}

impl JobPatch {
    /// Patch persisted before any target is scraped
    pub fn running(job: &Job) -> Self {
        Self {
            status: Some(JobStatus::Running),
            started_at: job.started_at,
            sites_targeted: Some(job.sites_targeted.clone()),
            ..Self::default()
        }
    }

    /// Patch persisted once every target has been attempted
    pub fn completed(job: &Job, summary: &JobSummary) -> Self {
        Self {
            status: Some(JobStatus::Completed),
            completed_at: job.completed_at,
            results: Some(serde_json::json!({
                "site_results": summary.site_results,
                "total_sites": summary.total_sites,
                "successful_sites": summary.successful_sites,
                "total_vehicles": summary.total_vehicles,
            })),
            ..Self::default()
        }
    }

    /// Patch persisted when the orchestration itself faults
    pub fn failed(job: &Job) -> Self {
        Self {
            status: Some(JobStatus::Failed),
            completed_at: job.completed_at,
            ..Self::default()
        }
    }
}

/// External durable job record client
///
/// Writes are partial updates against the record keyed by `job_id`,
/// authenticated with a service-level credential distinct from the caller's.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn upsert(&self, job_id: &str, patch: &JobPatch) -> Result<(), JobStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_unset_fields() {
        let job = Job::new("j1", vec!["s1".into()]).start().unwrap();
        let patch = serde_json::to_value(JobPatch::running(&job)).unwrap();

        assert_eq!(patch["status"], "running");
        assert!(patch.get("completed_at").is_none());
        assert!(patch.get("results").is_none());
        assert_eq!(patch["sites_targeted"][0], "s1");
    }

    #[test]
    fn test_completed_patch_carries_the_aggregate() {
        let mut job = Job::new("j1", vec!["s1".into()]).start().unwrap();
        job.record_result(crate::domain::models::site::SiteResult::succeeded(
            "s1",
            7,
            Some(100),
            Some(200),
        ))
        .unwrap();
        let job = job.complete().unwrap();
        let summary = JobSummary::from(&job);

        let patch = serde_json::to_value(JobPatch::completed(&job, &summary)).unwrap();
        assert_eq!(patch["status"], "completed");
        assert_eq!(patch["results"]["total_vehicles"], 7);
        assert_eq!(patch["results"]["successful_sites"], 1);
        assert_eq!(patch["results"]["site_results"][0]["siteId"], "s1");
        assert!(patch.get("started_at").is_none());
    }

    #[test]
    fn test_failed_patch_carries_the_terminal_status_only() {
        let job = Job::new("j1", vec!["s1".into()])
            .start()
            .unwrap()
            .fail()
            .unwrap();
        let patch = serde_json::to_value(JobPatch::failed(&job)).unwrap();

        assert_eq!(patch["status"], "failed");
        assert!(patch["completed_at"].is_string());
        assert!(patch.get("results").is_none());
        assert!(patch.get("sites_targeted").is_none());
    }
}
