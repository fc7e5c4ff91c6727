//! Aggregation queries over a [`FundingDataset`](crate::data::model::FundingDataset).
//!
//! Every function here borrows the dataset and returns plain owned data
//! (scalars, ordered `(label, value)` series, small tables) for the
//! presentation layer. Nothing mutates the dataset.

use std::collections::BTreeMap;

use crate::data::model::FundingRecord;

pub mod investor;
pub mod overall;
pub mod startup;

pub use investor::{InvestorMatch, InvestorProfile, RecentInvestment, investor_names, investor_profile};
pub use overall::{
    MonthlyPoint, OverallMetrics, SeriesMode, monthly_series, overall_metrics, sector_ranking,
};
pub use startup::{StartupProfile, startup_investor_breakdown, startup_names, startup_profile};

/// Default length of "top N" lists.
pub const DEFAULT_TOP_N: usize = 5;

/// Sum `amount` per key. Groups come back in ascending key order.
pub(crate) fn sum_by<'a, K, F>(
    records: impl IntoIterator<Item = &'a FundingRecord>,
    key: F,
) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&'a FundingRecord) -> K,
{
    let mut sums = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_insert(0.0) += record.amount;
    }
    sums
}

/// Order groups by value, largest first. Equal values keep their incoming
/// (ascending key) order.
pub(crate) fn descending<K>(groups: impl IntoIterator<Item = (K, f64)>) -> Vec<(K, f64)> {
    let mut out: Vec<(K, f64)> = groups.into_iter().collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}
