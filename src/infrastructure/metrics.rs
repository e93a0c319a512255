// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub fn init_metrics() {
    let addr: SocketAddr = "0.0.0.0:9000".parse().expect("Invalid metrics address");

    // A failed install usually means the port is taken (second instance in
    // development); keep running without the exporter.
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_counter!("scrape_jobs_total", "Scrape jobs started");
    describe_counter!("outbound_fetch_total", "Guarded outbound fetch attempts");
    describe_counter!(
        "outbound_fetch_blocked_total",
        "Fetches rejected by the host allow-list"
    );
    describe_counter!(
        "outbound_fetch_oversize_total",
        "Fetches aborted by the streaming body size cap"
    );

    info!("Metrics exporter listening on {}", addr);
}
