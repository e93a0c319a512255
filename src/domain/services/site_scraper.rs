// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::site::{SiteResult, SiteTarget};
use crate::domain::services::listing_heuristic::ListingEstimator;
use crate::engines::traits::OutboundFetcher;

/// Upper bound on the reported vehicle count; pattern-matching noise above
/// this is not treated as authoritative.
pub const MAX_REPORTED_VEHICLES: u32 = 100;

/// Execution mode for one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeMode {
    /// Fetch real pages through the guard
    #[default]
    Live,
    /// Synthesize plausible results without any network access
    Demo,
}

impl fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScrapeMode::Live => write!(f, "live"),
            ScrapeMode::Demo => write!(f, "demo"),
        }
    }
}

/// Synthetic data profile used in demo mode, keyed by target category
struct DemoProfile {
    makes: &'static [&'static str],
    price_range: (u32, u32),
}

impl DemoProfile {
    fn for_category(category: &str) -> Self {
        match category.to_ascii_lowercase().as_str() {
            "federal" | "government" => Self {
                makes: &["Ford", "Chevrolet", "Dodge", "GMC"],
                price_range: (5_000, 15_000),
            },
            "insurance" | "salvage" => Self {
                makes: &["Toyota", "Honda", "Nissan", "Hyundai"],
                price_range: (3_000, 12_000),
            },
            "municipal" | "state" => Self {
                makes: &["Ford", "Chevrolet", "International", "Freightliner"],
                price_range: (2_500, 10_000),
            },
            _ => Self {
                makes: &["Ford", "Toyota", "Chevrolet"],
                price_range: (4_000, 12_000),
            },
        }
    }
}

/// Scrapes one target, branching between demo and live modes
///
/// Never errors: every failure becomes a `SiteResult` with `success: false`.
/// Demo mode is a hard short-circuit that returns before the fetcher is
/// touched.
pub struct SiteScraper {
    fetcher: Arc<dyn OutboundFetcher>,
    estimator: Arc<dyn ListingEstimator>,
}

impl SiteScraper {
    pub fn new(fetcher: Arc<dyn OutboundFetcher>, estimator: Arc<dyn ListingEstimator>) -> Self {
        Self { fetcher, estimator }
    }

    pub async fn scrape(&self, target: &SiteTarget, mode: ScrapeMode) -> SiteResult {
        match mode {
            ScrapeMode::Demo => self.demo_result(target),
            ScrapeMode::Live => self.scrape_live(target).await,
        }
    }

    fn demo_result(&self, target: &SiteTarget) -> SiteResult {
        let profile = DemoProfile::for_category(&target.category);
        let mut rng = rand::rng();
        let vehicles_found = rng.random_range(10..=59);
        let avg_price = rng.random_range(profile.price_range.0..=profile.price_range.1);
        debug!(
            site = %target.id,
            vehicles_found,
            avg_price,
            makes = ?profile.makes,
            "synthesized demo result"
        );
        SiteResult::succeeded(&target.id, vehicles_found, None, None)
    }

    async fn scrape_live(&self, target: &SiteTarget) -> SiteResult {
        match self.fetcher.fetch(&target.base_url).await {
            Ok(outcome) => {
                if !(200..300).contains(&outcome.status_code) {
                    warn!(site = %target.id, status = outcome.status_code, "non-success response");
                    return SiteResult::failed_with_status(
                        &target.id,
                        format!("HTTP {}", outcome.status_code),
                        outcome.status_code,
                    );
                }
                let estimate = self.estimator.estimate(&outcome.body);
                SiteResult::succeeded(
                    &target.id,
                    estimate.min(MAX_REPORTED_VEHICLES),
                    Some(outcome.bytes_read),
                    Some(outcome.status_code),
                )
            }
            Err(err) => {
                warn!(site = %target.id, url = %target.base_url, error = %err, "scrape failed");
                SiteResult::failed(&target.id, err.to_string())
            }
        }
    }
}
