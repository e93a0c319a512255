// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::models::site::SiteResult;

/// One scraping run
///
/// Tracks the lifecycle of a job across its targets. Transitions follow
/// Queued → Running → Completed/Failed; `completed_at` is set exactly when
/// the job reaches a terminal status, and `results` never outgrows
/// `sites_targeted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Opaque caller-supplied identifier, unique per run
    pub id: String,
    /// Lifecycle status
    pub status: JobStatus,
    /// Set once when the job starts running
    pub started_at: Option<DateTime<Utc>>,
    /// Set once when the job reaches a terminal status
    pub completed_at: Option<DateTime<Utc>>,
    /// Ordered target identifiers, fixed at job start
    pub sites_targeted: Vec<String>,
    /// Per-target outcomes, populated incrementally
    pub results: HashMap<String, SiteResult>,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted but not yet started
    #[default]
    Queued,
    /// Targets are being scraped
    Running,
    /// All targets were attempted, regardless of individual outcomes
    Completed,
    /// The orchestration itself faulted; never set for per-target errors
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// Domain error type
#[derive(Error, Debug)]
pub enum DomainError {
    /// The requested status change violates the job state machine
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// Input data violates a domain rule
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Job {
    /// Create a queued job for the given target list
    pub fn new(id: impl Into<String>, sites_targeted: Vec<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            started_at: None,
            completed_at: None,
            sites_targeted,
            results: HashMap::new(),
        }
    }

    /// Transition Queued → Running
    pub fn start(mut self) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Queued => {
                self.status = JobStatus::Running;
                self.started_at = Some(Utc::now());
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// Record the outcome for one target
    ///
    /// Rejects targets outside `sites_targeted` and duplicate recordings,
    /// which keeps `results` bounded by the target list.
    pub fn record_result(&mut self, result: SiteResult) -> Result<(), DomainError> {
        if self.status != JobStatus::Running {
            return Err(DomainError::InvalidStateTransition);
        }
        if !self.sites_targeted.iter().any(|id| *id == result.site_id) {
            return Err(DomainError::ValidationError(format!(
                "unknown target: {}",
                result.site_id
            )));
        }
        if self.results.contains_key(&result.site_id) {
            return Err(DomainError::ValidationError(format!(
                "result already recorded for target: {}",
                result.site_id
            )));
        }
        self.results.insert(result.site_id.clone(), result);
        Ok(())
    }

    /// Transition Running → Completed
    pub fn complete(mut self) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Completed;
                self.completed_at = Some(Utc::now());
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// Transition Queued/Running → Failed, for orchestration-level faults
    pub fn fail(mut self) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Queued | JobStatus::Running => {
                self.status = JobStatus::Failed;
                self.completed_at = Some(Utc::now());
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// Sum of `vehicles_found` across all recorded results
    pub fn total_vehicles(&self) -> u32 {
        self.results.values().map(|r| r.vehicles_found).sum()
    }

    /// Count of results with `success == true`
    pub fn successful_sites(&self) -> usize {
        self.results.values().filter(|r| r.success).count()
    }

    /// Results ordered by the target list
    pub fn ordered_results(&self) -> Vec<SiteResult> {
        self.sites_targeted
            .iter()
            .filter_map(|id| self.results.get(id).cloned())
            .collect()
    }
}

/// In-memory summary returned to the caller once a job completes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JobSummary {
    pub job_id: String,
    pub total_sites: usize,
    pub successful_sites: usize,
    pub total_vehicles: u32,
    pub site_results: Vec<SiteResult>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            total_sites: job.sites_targeted.len(),
            successful_sites: job.successful_sites(),
            total_vehicles: job.total_vehicles(),
            site_results: job.ordered_results(),
        }
    }
}
