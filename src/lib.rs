// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application module
///
/// Request/response DTOs and the scrape-job use case
pub mod application;

/// Configuration module
///
/// Layered settings loaded from files and environment variables
pub mod config;

/// Domain module
///
/// Core entities, the job store contract and domain services
pub mod domain;

/// Engines module
///
/// SSRF-guarded outbound fetching and the host allow-list
pub mod engines;

/// Infrastructure module
///
/// External service integrations: durable job store, metrics exporter
pub mod infrastructure;

/// Presentation module
///
/// HTTP routing, handlers, middleware and error mapping
pub mod presentation;

/// Utilities module
///
/// Telemetry bootstrap and shared helpers
pub mod utils;
