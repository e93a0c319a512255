// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use dealerscope_ingest::application::use_cases::run_scrape_job::RunScrapeJob;
use dealerscope_ingest::config::settings::Settings;
use dealerscope_ingest::domain::services::listing_heuristic::PatternHeuristic;
use dealerscope_ingest::domain::services::site_scraper::SiteScraper;
use dealerscope_ingest::engines::allowlist::HostAllowList;
use dealerscope_ingest::engines::fetch_guard::GuardedFetcher;
use dealerscope_ingest::infrastructure::repositories::rest_job_store::RestJobStore;
use dealerscope_ingest::presentation::middleware::auth_middleware::AuthState;
use dealerscope_ingest::presentation::routes;
use dealerscope_ingest::utils::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting dealerscope-ingest...");

    // Initialize Prometheus metrics
    dealerscope_ingest::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Assemble the scraping pipeline: allow-list → fetch guard →
    //    heuristic → scraper → orchestrator
    let fetcher = Arc::new(GuardedFetcher::from_settings(
        HostAllowList::default(),
        &settings.fetch,
    )?);
    let scraper = SiteScraper::new(fetcher, Arc::new(PatternHeuristic));

    let store = Arc::new(RestJobStore::new(&settings.job_store)?);
    let use_case = Arc::new(RunScrapeJob::new(store, scraper));
    info!("Job orchestrator initialized");

    // 4. Start the HTTP server
    let auth_state = AuthState {
        internal_key: settings.auth.internal_key.clone(),
    };
    let app = routes::routes(use_case, auth_state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
