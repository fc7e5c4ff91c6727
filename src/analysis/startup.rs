use std::collections::{BTreeMap, BTreeSet};

use super::descending;
use crate::data::model::{FundingDataset, FundingRecord};
use crate::error::QueryError;

/// Where a startup operates and what it does, as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupProfile {
    pub name: String,
    pub cities: String,
    pub verticals: String,
    pub subverticals: String,
    pub rounds: usize,
}

/// Distinct cities, verticals and subverticals of one startup, each joined
/// with `", "` in order of first appearance. Blank values are skipped.
pub fn startup_profile(ds: &FundingDataset, startup: &str) -> Result<StartupProfile, QueryError> {
    let rows: Vec<&FundingRecord> = ds.records_for_startup(startup).collect();
    if rows.is_empty() {
        return Err(QueryError::NotFound(startup.to_string()));
    }

    Ok(StartupProfile {
        name: startup.to_string(),
        cities: distinct_joined(rows.iter().map(|r| r.city.as_str())),
        verticals: distinct_joined(rows.iter().map(|r| r.vertical.as_str())),
        subverticals: distinct_joined(rows.iter().map(|r| r.subvertical.as_str())),
        rounds: rows.len(),
    })
}

fn distinct_joined<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut seen = BTreeSet::new();
    values
        .map(str::trim)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Total credited to each investor of a startup, largest first.
///
/// A round with several investors credits its full amount to every one of
/// them, so the totals can add up to more than the startup raised.
pub fn startup_investor_breakdown(ds: &FundingDataset, startup: &str) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in ds.records_for_startup(startup) {
        for name in record.investor_names() {
            *sums.entry(name).or_insert(0.0) += record.amount;
        }
    }
    descending(sums)
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect()
}

/// Every distinct startup name, sorted.
pub fn startup_names(ds: &FundingDataset) -> Vec<String> {
    ds.records()
        .iter()
        .map(|r| r.startup.as_str())
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
    fn co_investors_each_get_the_full_amount() {
        let breakdown = startup_investor_breakdown(&ola(), "Ola");
        assert_eq!(
            breakdown,
            vec![("Tiger".to_string(), 150.0), ("Accel".to_string(), 100.0)]
        );
        let credited: f64 = breakdown.iter().map(|(_, v)| v).sum();
        assert!(credited > 150.0);
    }

    #[test]
    fn single_row_two_investors_both_get_a() {
        let ds = dataset(vec![record("2015-01-01", "Ola", "Transport", "Accel, Tiger", 40.0)]);
        assert_eq!(
            startup_investor_breakdown(&ds, "Ola"),
            vec![("Accel".to_string(), 40.0), ("Tiger".to_string(), 40.0)]
        );
    }

    #[test]
    fn unknown_startup_breakdown_is_empty() {
        assert!(startup_investor_breakdown(&ola(), "Unknown").is_empty());
    }

    #[test]
    fn profile_lists_distinct_values() {
        let mut a = record("2015-01-01", "Ola", "Transport", "Accel", 1.0);
        a.city = "Bengaluru".into();
        a.subvertical = "Cabs".into();
        let mut b = record("2015-02-01", "Ola", "Transport", "Tiger", 1.0);
        b.city = "Mumbai".into();
        b.subvertical = "Cabs".into();
        let mut c = record("2015-03-01", "Ola", "Mobility", "Tiger", 1.0);
        c.city = "Bengaluru".into();
        let other = record("2015-03-01", "Uber", "Transport", "Tiger", 1.0);

        let profile = startup_profile(&dataset(vec![a, b, c, other]), "Ola").unwrap();
        assert_eq!(profile.cities, "Bengaluru, Mumbai");
        assert_eq!(profile.verticals, "Transport, Mobility");
        assert_eq!(profile.subverticals, "Cabs, Education");
        assert_eq!(profile.rounds, 3);
    }

    #[test]
    fn unknown_startup_is_not_found() {
        assert_eq!(
            startup_profile(&ola(), "Unknown"),
            Err(QueryError::NotFound("Unknown".to_string()))
        );
    }

    #[test]
    fn startup_names_are_sorted_and_unique() {
        let ds = dataset(vec![
            record("2015-01-01", "Zomato", "Food", "I", 1.0),
            record("2015-01-01", "Ola", "Transport", "I", 1.0),
            record("2015-01-01", "Zomato", "Food", "I", 1.0),
        ]);
        assert_eq!(startup_names(&ds), vec!["Ola", "Zomato"]);
    }
}
