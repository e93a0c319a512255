// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::settings::JobStoreSettings;
use crate::domain::repositories::job_store::{JobPatch, JobStore, JobStoreError};

/// PostgREST-style job record client
///
/// Upserts against `{base}/scrape_jobs` keyed by `id`, authenticated with
/// the service key. The key is a service-level credential; caller tokens
/// never reach the store.
pub struct RestJobStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestJobStore {
    pub fn new(settings: &JobStoreSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            service_key: settings.service_key.clone(),
        })
    }
}

#[async_trait]
impl JobStore for RestJobStore {
    async fn upsert(&self, job_id: &str, patch: &JobPatch) -> Result<(), JobStoreError> {
        let mut record = serde_json::to_value(patch)
            .map_err(|e| JobStoreError::WriteFailed(e.to_string()))?;
        record["id"] = serde_json::Value::String(job_id.to_string());

        let url = format!("{}/scrape_jobs?on_conflict=id", self.base_url);
        debug!(job_id, %url, "upserting job record");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(|e| JobStoreError::WriteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobStoreError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
