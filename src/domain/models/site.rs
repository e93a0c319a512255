// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// External source descriptor
///
/// Supplied by the caller per request; not persisted independently of the
/// job that references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTarget {
    /// Target identifier, unique within one job
    pub id: String,
    /// Human-readable site name
    #[serde(default)]
    pub name: String,
    /// Base URL to fetch in live mode
    pub base_url: String,
    /// Category, only used to pick the demo synthesis profile
    #[serde(default)]
    pub category: String,
}

/// Outcome of scraping one target
///
/// Created exactly once per target per job and immutable afterwards. All
/// failures surface here as data; they never abort the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResult {
    /// Identifier of the target this result belongs to
    pub site_id: String,
    /// Whether the target was scraped successfully
    pub success: bool,
    /// Estimated vehicle count, clamped to [0, 100]
    pub vehicles_found: u32,
    /// Failure description, present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Bytes read from the response body, live mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_size: Option<usize>,
    /// HTTP status code of the final response, live mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl SiteResult {
    pub fn succeeded(
        site_id: impl Into<String>,
        vehicles_found: u32,
        response_size: Option<usize>,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            success: true,
            vehicles_found,
            error: None,
            response_size,
            status_code,
        }
    }

    pub fn failed(site_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            success: false,
            vehicles_found: 0,
            error: Some(error.into()),
            response_size: None,
            status_code: None,
        }
    }

    /// Failure that still carries the upstream HTTP status (e.g. a 404 from
    /// an allow-listed host).
    pub fn failed_with_status(
        site_id: impl Into<String>,
        error: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::failed(site_id, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_carries_error_only() {
        let result = SiteResult::failed("s1", "Host not allowed: 127.0.0.1");
        assert!(!result.success);
        assert_eq!(result.vehicles_found, 0);
        assert!(result.error.as_deref().unwrap().contains("Host not allowed"));
        assert_eq!(result.response_size, None);
        assert_eq!(result.status_code, None);
    }

    #[test]
    fn test_result_serializes_camel_case_and_omits_absent_fields() {
        let json =
            serde_json::to_value(SiteResult::succeeded("s1", 12, Some(2048), Some(200))).unwrap();
        assert_eq!(json["siteId"], "s1");
        assert_eq!(json["vehiclesFound"], 12);
        assert_eq!(json["responseSize"], 2048);
        assert!(json.get("error").is_none());
    }
}
