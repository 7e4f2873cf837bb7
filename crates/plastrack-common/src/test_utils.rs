//! Test utilities and shared test helpers for the tracker workspace.
//!
//! This module provides common testing utilities, fixtures, and helper
//! functions used across the crates for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Record fixtures shared by store, aggregation, and chart tests.
pub mod record_fixtures {
    use crate::UsageRecord;

    /// The three-submission Riverside/Lakeside scenario.
    pub fn riverside_lakeside() -> Vec<UsageRecord> {
        vec![
            UsageRecord::new("Riverside", "2024-01-15", 12.5),
            UsageRecord::new("Riverside", "2024-02-03", 7.0),
            UsageRecord::new("Lakeside", "2024-01-20", 5.0),
        ]
    }

    /// A record whose date cannot be coerced.
    pub fn malformed_date_record() -> UsageRecord {
        UsageRecord::new("Hillcrest", "not-a-date", 3.25)
    }

    /// Daily records for one community over `days` consecutive days of January 2024.
    pub fn daily_series(community: &str, days: u32) -> Vec<UsageRecord> {
        (1..=days)
            .map(|day| {
                UsageRecord::new(
                    community,
                    format!("2024-01-{day:02}"),
                    f64::from(day).mul_add(0.5, 2.0),
                )
            })
            .collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use crate::UsageRecord;
    use proptest::prelude::*;

    /// Strategy for community names drawn from a small pool, so groups collide.
    pub fn community_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Riverside", "Lakeside", "Hillcrest", "Old Town"])
            .prop_map(ToString::to_string)
    }

    /// Strategy for valid ISO record dates across a few years.
    pub fn date_strategy() -> impl Strategy<Value = String> {
        (2022i32..=2025, 1u32..=12, 1u32..=28)
            .prop_map(|(year, month, day)| format!("{year:04}-{month:02}-{day:02}"))
    }

    /// Strategy for non-negative amounts with two decimals.
    pub fn amount_strategy() -> impl Strategy<Value = f64> {
        (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
    }

    /// Strategy for a single well-formed record.
    pub fn record_strategy() -> impl Strategy<Value = UsageRecord> {
        (community_strategy(), date_strategy(), amount_strategy())
            .prop_map(|(community, date, kg)| UsageRecord::new(community, date, kg))
    }

    /// Strategy for a record set of up to `max_len` well-formed records.
    pub fn record_set_strategy(max_len: usize) -> impl Strategy<Value = Vec<UsageRecord>> {
        prop::collection::vec(record_strategy(), 0..=max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_record_fixtures() {
        let records = record_fixtures::riverside_lakeside();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.parsed_date().is_ok()));
        assert!(record_fixtures::malformed_date_record().parsed_date().is_err());

        let series = record_fixtures::daily_series("Riverside", 5);
        assert_eq!(series.len(), 5);
        assert_eq!(series[4].date, "2024-01-05");
        assert_approx_eq(series[0].plastic_used_kg, 2.5, 1e-9);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_generated_records_are_well_formed(record in property_testing::record_strategy()) {
                prop_assert!(record.parsed_date().is_ok());
                prop_assert!(record.plastic_used_kg >= 0.0);
            }
        }
    }
}
