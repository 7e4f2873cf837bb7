//! Aggregation of usage records into per-community and per-month totals.

use plastrack_common::{Result, UsageRecord, YearMonth};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Total kilograms per community.
pub type CommunityTotals = BTreeMap<String, f64>;

/// Total kilograms per community and calendar month.
pub type MonthlyTotals = BTreeMap<(String, YearMonth), f64>;

/// Sums `plastic_used_kg` per community.
///
/// Dates are not inspected, so records with malformed dates still count.
#[instrument(skip(records), fields(records = records.len()))]
pub fn total_by_community(records: &[UsageRecord]) -> CommunityTotals {
    let mut totals = CommunityTotals::new();
    for record in records {
        *totals.entry(record.community.clone()).or_insert(0.0) += record.plastic_used_kg;
    }

    debug!(communities = totals.len(), "Aggregated community totals");
    totals
}

/// Sums `plastic_used_kg` per community and year-month.
///
/// Fails with `InvalidDate` on the first malformed date; no partial result
/// is returned.
#[instrument(skip(records), fields(records = records.len()))]
pub fn monthly_by_community(records: &[UsageRecord]) -> Result<MonthlyTotals> {
    let mut totals = MonthlyTotals::new();
    for record in records {
        let month = record.year_month()?;
        *totals
            .entry((record.community.clone(), month))
            .or_insert(0.0) += record.plastic_used_kg;
    }

    debug!(groups = totals.len(), "Aggregated monthly totals");
    Ok(totals)
}

/// Both aggregate views over one record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Number of records aggregated.
    pub record_count: usize,
    /// Totals per community.
    pub total_by_community: CommunityTotals,
    /// Totals per community and month.
    pub monthly_by_community: MonthlyTotals,
}

impl UsageSummary {
    /// Sum over every community.
    pub fn grand_total(&self) -> f64 {
        self.total_by_community.values().sum()
    }

    /// Monthly totals as flat rows, ordered by community then month.
    pub fn monthly_rows(&self) -> impl Iterator<Item = (&str, YearMonth, f64)> + '_ {
        self.monthly_by_community
            .iter()
            .map(|((community, month), kg)| (community.as_str(), *month, *kg))
    }
}

/// Builds both aggregate views. Fails if any record date is malformed.
pub fn summarize(records: &[UsageRecord]) -> Result<UsageSummary> {
    let monthly_by_community = monthly_by_community(records)?;
    Ok(UsageSummary {
        record_count: records.len(),
        total_by_community: total_by_community(records),
        monthly_by_community,
    })
}
