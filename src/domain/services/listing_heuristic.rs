// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

/// Listing-count estimation strategy
///
/// Seam between the scraper and whatever extracts counts from raw text, so
/// the crude pattern matcher below can later be swapped for a structured
/// extractor without touching the orchestrator.
pub trait ListingEstimator: Send + Sync {
    fn estimate(&self, html: &str) -> u32;
}

/// Generic vehicle keywords, year+make pairs, and 17-char VINs (I/O/Q are
/// never valid VIN characters).
static LISTING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:vehicle|sedan|suv|pickup|truck|van|coupe|hatchback)\b",
        r"(?i)\b(?:19|20)\d{2}\s+(?:ford|chevrolet|chevy|toyota|honda|nissan|dodge|ram|jeep|gmc|bmw|mercedes|hyundai|kia|subaru)\b",
        r"\b[A-HJ-NPR-Z0-9]{17}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("listing pattern must compile"))
    .collect()
});

/// Pattern-matching listing counter
///
/// Sums match counts across all patterns; a union with duplicates, not a
/// deduplicated entity count. An approximation, never ground truth.
#[derive(Debug, Default, Clone)]
pub struct PatternHeuristic;

impl ListingEstimator for PatternHeuristic {
    fn estimate(&self, html: &str) -> u32 {
        LISTING_PATTERNS
            .iter()
            .map(|pattern| pattern.find_iter(html).count())
            .sum::<usize>() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_estimates_zero() {
        assert_eq!(PatternHeuristic.estimate(""), 0);
        assert_eq!(PatternHeuristic.estimate("<html><body></body></html>"), 0);
    }

    #[test]
    fn test_keyword_and_year_make_matches_are_summed() {
        let html = "Surplus truck auction: 2018 Ford F-150, one pickup and one van.";
        // truck, pickup, van = 3 keywords; "2018 Ford" = 1 year+make
        assert_eq!(PatternHeuristic.estimate(html), 4);
    }

    #[test]
    fn test_vin_pattern_matches_seventeen_chars() {
        let html = "VIN 1FTFW1ET5DFC10312 listed";
        assert_eq!(PatternHeuristic.estimate(html), 1);
        // Contains 'O' and 'Q', not a VIN
        assert_eq!(PatternHeuristic.estimate("OQOQOQOQOQOQOQOQO"), 0);
    }

    #[test]
    fn test_deterministic() {
        let html = "2020 Toyota Camry sedan, VIN 4T1BF1FK5HU999999";
        assert_eq!(
            PatternHeuristic.estimate(html),
            PatternHeuristic.estimate(html)
        );
    }
}
