use std::collections::BTreeMap;
use std::fmt;

use super::{descending, sum_by};
use crate::data::model::FundingDataset;
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Headline figures for the whole dataset, in crore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallMetrics {
    /// Sum of every amount, rounded.
    pub total: i64,
    /// Largest total raised by a single startup (not the largest single round).
    pub max: f64,
    /// Mean of per-startup totals, rounded.
    pub avg: i64,
    /// Distinct startups.
    pub count: usize,
}

/// Compute [`OverallMetrics`]. An empty dataset has no meaningful maximum or
/// mean, so it is reported as [`QueryError::EmptyDataset`].
pub fn overall_metrics(ds: &FundingDataset) -> Result<OverallMetrics, QueryError> {
    if ds.is_empty() {
        return Err(QueryError::EmptyDataset);
    }

    let per_startup = sum_by(ds.records(), |r| r.startup.as_str());
    let total: f64 = ds.records().iter().map(|r| r.amount).sum();
    let max = per_startup
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let avg = per_startup.values().sum::<f64>() / per_startup.len() as f64;

    Ok(OverallMetrics {
        total: total.round_ties_even() as i64,
        max,
        avg: avg.round_ties_even() as i64,
        count: per_startup.len(),
    })
}

// ---------------------------------------------------------------------------
// Month-over-month series
// ---------------------------------------------------------------------------

/// What each point of the monthly series measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesMode {
    /// Sum of amounts.
    #[default]
    Total,
    /// Number of funding events.
    Count,
}

impl SeriesMode {
    pub const ALL: [SeriesMode; 2] = [SeriesMode::Total, SeriesMode::Count];
}

impl fmt::Display for SeriesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesMode::Total => write!(f, "Total"),
            SeriesMode::Count => write!(f, "Count"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

impl MonthlyPoint {
    /// Axis label, `"{month}-{year}"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }
}

/// One point per (year, month) that has records, oldest first.
pub fn monthly_series(ds: &FundingDataset, mode: SeriesMode) -> Vec<MonthlyPoint> {
    let mut groups: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in ds.records() {
        let slot = groups.entry((r.year, r.month)).or_insert(0.0);
        match mode {
            SeriesMode::Total => *slot += r.amount,
            SeriesMode::Count => *slot += 1.0,
        }
    }
    groups
        .into_iter()
        .map(|((year, month), value)| MonthlyPoint { year, month, value })
        .collect()
}

// ---------------------------------------------------------------------------
// Sector ranking
// ---------------------------------------------------------------------------

/// Verticals by total amount raised, largest first, at most `top_n`.
pub fn sector_ranking(ds: &FundingDataset, top_n: usize) -> Vec<(String, f64)> {
    let sums = sum_by(ds.records(), |r| r.vertical.as_str());
    descending(sums)
        .into_iter()
        .take(top_n)
        .map(|(vertical, total)| (vertical.to_string(), total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DEFAULT_TOP_N;
    use crate::analysis::fixtures::{dataset, ola, record};

    #[test]
    fn ola_example_metrics() {
        let m = overall_metrics(&ola()).unwrap();
        assert_eq!(m, OverallMetrics { total: 150, max: 150.0, avg: 150, count: 1 });
    }

    #[test]
    fn max_is_largest_startup_total() {
        let ds = dataset(vec![
            record("2015-01-01", "Ola", "Transport", "Accel", 60.0),
            record("2015-02-01", "Ola", "Transport", "Tiger", 60.0),
            record("2015-03-01", "Flipkart", "E-Commerce", "Tiger", 100.0),
        ]);
        let m = overall_metrics(&ds).unwrap();
        assert_eq!(m.max, 120.0);
        assert_eq!(m.count, 2);
        assert_eq!(m.avg, 110);
        assert_eq!(m.total, 220);
    }

    #[test]
    fn total_and_avg_are_rounded() {
        let ds = dataset(vec![
            record("2015-01-01", "A", "X", "I", 1.4),
            record("2015-01-01", "B", "X", "I", 1.3),
        ]);
        let m = overall_metrics(&ds).unwrap();
        assert_eq!(m.total, 3);
        assert_eq!(m.avg, 1);
        assert!((m.max - 1.4).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_has_no_metrics() {
        assert_eq!(overall_metrics(&dataset(vec![])), Err(QueryError::EmptyDataset));
    }

    #[test]
    fn monthly_series_is_sorted_and_labelled() {
        let ds = dataset(vec![
            record("2016-02-10", "A", "X", "I", 5.0),
            record("2015-12-01", "B", "X", "I", 1.0),
            record("2016-02-20", "C", "X", "I", 2.0),
            record("2015-03-05", "D", "X", "I", 4.0),
        ]);

        let totals = monthly_series(&ds, SeriesMode::Total);
        let labels: Vec<String> = totals.iter().map(MonthlyPoint::label).collect();
        assert_eq!(labels, vec!["3-2015", "12-2015", "2-2016"]);
        assert_eq!(totals[2].value, 7.0);

        let counts = monthly_series(&ds, SeriesMode::Count);
        let values: Vec<f64> = counts.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn monthly_totals_partition_the_overall_total() {
        let ds = dataset(vec![
            record("2015-01-01", "Ola", "Transport", "Accel", 10.25),
            record("2015-01-15", "Ola", "Transport", "Accel", 3.5),
            record("2017-06-01", "Paytm", "Fintech", "SoftBank", 400.0),
            record("2019-11-30", "Zomato", "Food", "Info Edge", 0.75),
        ]);
        let sum: f64 = monthly_series(&ds, SeriesMode::Total).iter().map(|p| p.value).sum();
        assert_eq!(sum.round_ties_even() as i64, overall_metrics(&ds).unwrap().total);
    }

    #[test]
    fn sector_ranking_takes_top_n_descending() {
        let ds = dataset(vec![
            record("2015-01-01", "A", "Fintech", "I", 10.0),
            record("2015-01-01", "B", "Food", "I", 30.0),
            record("2015-01-01", "C", "Fintech", "I", 25.0),
            record("2015-01-01", "D", "EdTech", "I", 5.0),
        ]);
        assert_eq!(
            sector_ranking(&ds, 2),
            vec![("Fintech".to_string(), 35.0), ("Food".to_string(), 30.0)]
        );
        assert_eq!(sector_ranking(&ola(), DEFAULT_TOP_N), vec![("Transport".to_string(), 150.0)]);
        assert!(sector_ranking(&dataset(vec![]), DEFAULT_TOP_N).is_empty());
    }
}
