use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{DEFAULT_TOP_N, descending, sum_by};
use crate::data::model::{FundingDataset, FundingRecord};

/// How an investor name is matched against a record's `investors` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvestorMatch {
    /// The raw field contains the name anywhere. "Accel" also matches
    /// "Accel Partners" and "Accelerate Ventures".
    #[default]
    Substring,
    /// One of the split, trimmed names equals the query.
    Exact,
}

impl InvestorMatch {
    pub fn matches(self, record: &FundingRecord, investor: &str) -> bool {
        match self {
            InvestorMatch::Substring => record.investors.contains(investor),
            InvestorMatch::Exact => record.investor_names().any(|name| name == investor),
        }
    }
}

/// A funding event as shown in an investor's "most recent" table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentInvestment {
    pub date: NaiveDate,
    pub startup: String,
    pub vertical: String,
    pub city: String,
    pub round: String,
    pub amount: f64,
}

impl From<&FundingRecord> for RecentInvestment {
    fn from(r: &FundingRecord) -> Self {
        RecentInvestment {
            date: r.date,
            startup: r.startup.clone(),
            vertical: r.vertical.clone(),
            city: r.city.clone(),
            round: r.round.clone(),
            amount: r.amount,
        }
    }
}

/// Everything the investor page shows. Every part may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestorProfile {
    /// First five matching rows, in input order.
    pub recent: Vec<RecentInvestment>,
    /// Per-startup totals, largest first, at most five.
    pub top_startups: Vec<(String, f64)>,
    /// Per-vertical totals: the first five verticals alphabetically, not
    /// ranked by amount.
    pub sector_split: Vec<(String, f64)>,
    /// Per-year totals, oldest first.
    pub yearly: Vec<(i32, f64)>,
}

impl InvestorProfile {
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

pub fn investor_profile(ds: &FundingDataset, investor: &str, mode: InvestorMatch) -> InvestorProfile {
    let matches: Vec<&FundingRecord> = ds
        .records()
        .iter()
        .filter(|r| mode.matches(r, investor))
        .collect();

    let recent = matches
        .iter()
        .take(DEFAULT_TOP_N)
        .map(|r| RecentInvestment::from(*r))
        .collect();

    let top_startups = descending(sum_by(matches.iter().copied(), |r| r.startup.as_str()))
        .into_iter()
        .take(DEFAULT_TOP_N)
        .map(|(name, total)| (name.to_string(), total))
        .collect();

    // Truncated in grouping order before any ranking.
    let sector_split = sum_by(matches.iter().copied(), |r| r.vertical.as_str())
        .into_iter()
        .take(DEFAULT_TOP_N)
        .map(|(vertical, total)| (vertical.to_string(), total))
        .collect();

    let yearly = sum_by(matches.iter().copied(), |r| r.year).into_iter().collect();

    InvestorProfile {
        recent,
        top_startups,
        sector_split,
        yearly,
    }
}

/// Every distinct investor name in the dataset, sorted.
pub fn investor_names(ds: &FundingDataset) -> Vec<String> {
    ds.records()
        .iter()
        .flat_map(FundingRecord::investor_names)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{dataset, ola, record};

    #[test]
    fn substring_match_catches_longer_names() {
        let ds = dataset(vec![
            record("2015-01-01", "Swiggy", "Food", "Accel Partners, Foo", 10.0),
            record("2015-02-01", "Ola", "Transport", "Tiger Global", 20.0),
        ]);
        let profile = investor_profile(&ds, "Accel", InvestorMatch::Substring);
        assert_eq!(profile.recent.len(), 1);
        assert_eq!(profile.recent[0].startup, "Swiggy");

        let exact = investor_profile(&ds, "Accel", InvestorMatch::Exact);
        assert!(exact.is_empty());
        let exact = investor_profile(&ds, "Accel Partners", InvestorMatch::Exact);
        assert_eq!(exact.recent.len(), 1);
    }

    #[test]
    fn recent_is_first_five_in_input_order() {
        let ds = dataset(
            (1..=7)
                .map(|m| record(&format!("2015-{m:02}-01"), &format!("S{m}"), "X", "Accel", m as f64))
                .collect(),
        );
        let profile = investor_profile(&ds, "Accel", InvestorMatch::default());
        let names: Vec<&str> = profile.recent.iter().map(|r| r.startup.as_str()).collect();
        assert_eq!(names, vec!["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn top_startups_ranked_and_sector_split_unranked() {
        let ds = dataset(vec![
            record("2015-01-01", "A", "Zeta", "Accel", 1.0),
            record("2015-01-01", "B", "Beta", "Accel", 2.0),
            record("2015-01-01", "C", "Alpha", "Accel", 3.0),
            record("2015-01-01", "D", "Delta", "Accel", 4.0),
            record("2015-01-01", "E", "Gamma", "Accel", 5.0),
            record("2015-01-01", "F", "Epsilon", "Accel", 6.0),
            record("2016-01-01", "F", "Epsilon", "Accel", 10.0),
        ]);
        let profile = investor_profile(&ds, "Accel", InvestorMatch::Substring);

        let top: Vec<&str> = profile.top_startups.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(top, vec!["F", "E", "D", "C", "B"]);
        assert_eq!(profile.top_startups[0].1, 16.0);

        let sectors: Vec<&str> = profile.sector_split.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(sectors, vec!["Alpha", "Beta", "Delta", "Epsilon", "Gamma"]);

        assert_eq!(profile.yearly, vec![(2015, 21.0), (2016, 10.0)]);
    }

    #[test]
    fn unknown_investor_yields_empty_profile() {
        let profile = investor_profile(&ola(), "Sequoia", InvestorMatch::Substring);
        assert_eq!(profile, InvestorProfile::default());
        assert!(profile.is_empty());
    }

    #[test]
    fn investor_names_are_split_deduplicated_and_sorted() {
        let ds = dataset(vec![
            record("2015-01-01", "Ola", "Transport", "Tiger, Accel", 1.0),
            record("2015-01-01", "Ola", "Transport", "Accel,SoftBank ", 1.0),
        ]);
        assert_eq!(investor_names(&ds), vec!["Accel", "SoftBank", "Tiger"]);
    }
}
